pub mod biometrics;
pub mod daily_logs;
pub mod entries;
pub mod health;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::db::{Row, StoreError};

/// Decode store rows into typed records; a row that does not fit means
/// the table no longer matches what this service writes.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row)).map_err(|e| StoreError::Decode(e.to_string()))
        })
        .collect()
}
