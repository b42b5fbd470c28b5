use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::RecordStore;
use crate::models::partial::PartialRecord;

/// What happened to one table during a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum WriteOutcome {
    Written,
    /// Payload held only the date key; no store call was made
    Skipped,
    Failed(String),
}

impl WriteOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, WriteOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveReceipt {
    pub date: NaiveDate,
    pub daily_logs: WriteOutcome,
    pub biometrics: WriteOutcome,
    pub message: String,
}

/// At least one attempted upsert failed. The other table's outcome is
/// reported as-is; nothing is rolled back or retried.
#[derive(Debug, Clone)]
pub struct PersistError {
    pub date: NaiveDate,
    pub daily_logs: WriteOutcome,
    pub biometrics: WriteOutcome,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error saving to database:")?;
        let mut sep = " ";
        for (table, outcome) in [("daily_logs", &self.daily_logs), ("biometrics", &self.biometrics)] {
            if let WriteOutcome::Failed(msg) = outcome {
                write!(f, "{}{}: {}", sep, table, msg)?;
                sep = "; ";
            }
        }
        Ok(())
    }
}

impl std::error::Error for PersistError {}

/// Writes assembled payloads to their tables, keyed by date.
#[derive(Clone)]
pub struct UpsertGateway {
    store: Arc<dyn RecordStore>,
}

impl UpsertGateway {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Upsert each payload that carries more than the date key.
    ///
    /// The two writes are independent: both are attempted even when the
    /// first fails.
    pub async fn save(
        &self,
        daily_log: &PartialRecord,
        biometrics: &PartialRecord,
    ) -> Result<SaveReceipt, PersistError> {
        let date = daily_log.date;
        let daily_logs = self.write(daily_log).await;
        let biometrics = self.write(biometrics).await;

        if daily_logs.is_failed() || biometrics.is_failed() {
            return Err(PersistError {
                date,
                daily_logs,
                biometrics,
            });
        }

        let message = if daily_logs == WriteOutcome::Skipped && biometrics == WriteOutcome::Skipped {
            format!("Nothing to save for {}", date.format("%d %B"))
        } else {
            format!("Data saved for {}", date.format("%d %B"))
        };

        Ok(SaveReceipt {
            date,
            daily_logs,
            biometrics,
            message,
        })
    }

    async fn write(&self, partial: &PartialRecord) -> WriteOutcome {
        if !partial.has_data() {
            tracing::debug!(table = %partial.table, date = %partial.date, "Nothing entered, skipping upsert");
            return WriteOutcome::Skipped;
        }

        match self.store.upsert(partial.table, &partial.to_record()).await {
            Ok(()) => {
                tracing::info!(
                    table = %partial.table,
                    date = %partial.date,
                    fields = partial.len() - 1,
                    "Record upserted"
                );
                WriteOutcome::Written
            }
            Err(e) => {
                tracing::error!(table = %partial.table, date = %partial.date, error = %e, "Upsert failed");
                WriteOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::models::schema::Table;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn partials() -> (PartialRecord, PartialRecord) {
        let mut daily = PartialRecord::new(Table::DailyLogs, date());
        daily.insert("weight_kg", json!(82.5));
        let mut bio = PartialRecord::new(Table::Biometrics, date());
        bio.insert("body_fat_percent", json!(24.0));
        (daily, bio)
    }

    #[tokio::test]
    async fn test_writes_both_tables() {
        let store = MemoryStore::new();
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let (daily, bio) = partials();

        let receipt = gateway.save(&daily, &bio).await.unwrap();
        assert_eq!(receipt.daily_logs, WriteOutcome::Written);
        assert_eq!(receipt.biometrics, WriteOutcome::Written);
        assert_eq!(receipt.message, "Data saved for 01 March");

        let upserts = store.upserts().await;
        assert_eq!(upserts.len(), 2);
        assert_eq!(upserts[0], (Table::DailyLogs, json!({ "date": "2024-03-01", "weight_kg": 82.5 })));
        assert_eq!(
            upserts[1],
            (Table::Biometrics, json!({ "date": "2024-03-01", "body_fat_percent": 24.0 }))
        );
    }

    #[tokio::test]
    async fn test_date_only_payloads_make_no_calls() {
        let store = MemoryStore::new();
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let daily = PartialRecord::new(Table::DailyLogs, date());
        let bio = PartialRecord::new(Table::Biometrics, date());

        let receipt = gateway.save(&daily, &bio).await.unwrap();
        assert_eq!(receipt.daily_logs, WriteOutcome::Skipped);
        assert_eq!(receipt.biometrics, WriteOutcome::Skipped);
        assert_eq!(receipt.message, "Nothing to save for 01 March");
        assert!(store.upserts().await.is_empty());
    }

    #[tokio::test]
    async fn test_skip_one_table() {
        let store = MemoryStore::new();
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let (daily, _) = partials();
        let bio = PartialRecord::new(Table::Biometrics, date());

        let receipt = gateway.save(&daily, &bio).await.unwrap();
        assert_eq!(receipt.daily_logs, WriteOutcome::Written);
        assert_eq!(receipt.biometrics, WriteOutcome::Skipped);
        assert_eq!(store.upserts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let store = MemoryStore::new();
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let (daily, bio) = partials();

        gateway.save(&daily, &bio).await.unwrap();
        let once = store.snapshot().await;
        gateway.save(&daily, &bio).await.unwrap();
        assert_eq!(store.snapshot().await, once);
    }

    #[tokio::test]
    async fn test_resubmission_overwrites_submitted_fields_only() {
        let store = MemoryStore::new();
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let (daily, bio) = partials();
        gateway.save(&daily, &bio).await.unwrap();

        let mut later = PartialRecord::new(Table::DailyLogs, date());
        later.insert("weight_kg", json!(81.9));
        later.insert("notes", json!("evening weigh-in"));
        gateway
            .save(&later, &PartialRecord::new(Table::Biometrics, date()))
            .await
            .unwrap();

        let row = store.row(Table::DailyLogs, "2024-03-01").await.unwrap();
        assert_eq!(row["weight_kg"], json!(81.9));
        assert_eq!(row["notes"], json!("evening weigh-in"));
        let bio_row = store.row(Table::Biometrics, "2024-03-01").await.unwrap();
        assert_eq!(bio_row["body_fat_percent"], json!(24.0));
    }

    #[tokio::test]
    async fn test_failure_does_not_block_other_table() {
        let store = MemoryStore::new();
        store.fail_table(Table::DailyLogs).await;
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let (daily, bio) = partials();

        let err = gateway.save(&daily, &bio).await.unwrap_err();
        assert!(err.daily_logs.is_failed());
        assert_eq!(err.biometrics, WriteOutcome::Written);
        assert!(err.to_string().starts_with("Error saving to database: daily_logs:"));
        assert!(!err.to_string().contains("biometrics"));

        assert!(store.row(Table::DailyLogs, "2024-03-01").await.is_none());
        assert!(store.row(Table::Biometrics, "2024-03-01").await.is_some());
    }

    #[tokio::test]
    async fn test_both_failures_reported() {
        let store = MemoryStore::new();
        store.fail_table(Table::DailyLogs).await;
        store.fail_table(Table::Biometrics).await;
        let gateway = UpsertGateway::new(Arc::new(store.clone()));
        let (daily, bio) = partials();

        let err = gateway.save(&daily, &bio).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("daily_logs: "));
        assert!(msg.contains("; biometrics: "));
        // Not retried
        assert_eq!(store.upserts().await.len(), 2);
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(serde_json::to_value(WriteOutcome::Written).unwrap(), json!({ "status": "written" }));
        assert_eq!(
            serde_json::to_value(WriteOutcome::Failed("boom".into())).unwrap(),
            json!({ "status": "failed", "error": "boom" })
        );
    }
}
