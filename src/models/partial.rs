use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::Table;

/// Sparse write payload for one table: the date key plus only the fields
/// the user supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialRecord {
    #[serde(skip)]
    pub table: Table,
    pub date: NaiveDate,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl PartialRecord {
    pub fn new(table: Table, date: NaiveDate) -> Self {
        Self {
            table,
            date,
            fields: Map::new(),
        }
    }

    pub fn insert(&mut self, column: &str, value: Value) {
        self.fields.insert(column.to_string(), value);
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Number of keys in the payload, counting `date`.
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// True when the payload carries anything besides the date key.
    pub fn has_data(&self) -> bool {
        !self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The JSON object sent to the store, `date` included.
    pub fn to_record(&self) -> Value {
        let mut record = self.fields.clone();
        record.insert("date".into(), Value::String(self.date.to_string()));
        Value::Object(record)
    }
}
