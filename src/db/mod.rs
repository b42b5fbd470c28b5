use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::models::daily_log::HistoryQuery;
use crate::models::schema::Table;

#[cfg(test)]
pub mod memory;
pub mod postgrest;

pub use postgrest::PostgrestStore;

pub type Row = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected store response: {0}")]
    Decode(String),
}

/// Keyed record store holding one row per date per table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the row for `record["date"]`, or overwrite the submitted
    /// columns of the existing one.
    async fn upsert(&self, table: Table, record: &Value) -> Result<(), StoreError>;

    /// Rows within `range`, newest date first.
    async fn select(&self, table: Table, range: &HistoryQuery) -> Result<Vec<Row>, StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
