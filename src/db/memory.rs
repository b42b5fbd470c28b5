use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{RecordStore, Row, StoreError};
use crate::models::daily_log::HistoryQuery;
use crate::models::schema::Table;

/// In-process store with field-level merge on upsert.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<Table, BTreeMap<String, Row>>,
    upserts: Vec<(Table, Value)>,
    failing: HashSet<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call against `table` fail with a 503.
    pub async fn fail_table(&self, table: Table) {
        self.inner.lock().await.failing.insert(table);
    }

    /// Every upsert payload received, in order.
    pub async fn upserts(&self) -> Vec<(Table, Value)> {
        self.inner.lock().await.upserts.clone()
    }

    pub async fn row(&self, table: Table, date: &str) -> Option<Row> {
        let inner = self.inner.lock().await;
        inner.tables.get(&table).and_then(|t| t.get(date)).cloned()
    }

    pub async fn snapshot(&self) -> HashMap<Table, BTreeMap<String, Row>> {
        self.inner.lock().await.tables.clone()
    }
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        body: "service unavailable".into(),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&self, table: Table, record: &Value) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.upserts.push((table, record.clone()));
        if inner.failing.contains(&table) {
            return Err(unavailable());
        }

        let Value::Object(fields) = record else {
            return Err(StoreError::Decode("record must be an object".into()));
        };
        let date = fields
            .get("date")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode("record has no date".into()))?
            .to_string();

        let row = inner.tables.entry(table).or_default().entry(date).or_default();
        for (k, v) in fields {
            row.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    async fn select(&self, table: Table, range: &HistoryQuery) -> Result<Vec<Row>, StoreError> {
        let inner = self.inner.lock().await;
        if inner.failing.contains(&table) {
            return Err(unavailable());
        }
        let Some(rows) = inner.tables.get(&table) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .rev()
            .filter(|(date, _)| {
                date.parse::<NaiveDate>()
                    .map(|d| range.contains(d))
                    .unwrap_or(false)
            })
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.inner.lock().await.failing.contains(&Table::DailyLogs) {
            return Err(unavailable());
        }
        Ok(())
    }
}
