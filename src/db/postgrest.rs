use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use super::{RecordStore, Row, StoreError};
use crate::config::Config;
use crate::models::daily_log::HistoryQuery;
use crate::models::schema::Table;

/// Upserts merge the submitted columns into the existing row for the date.
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

/// Client for the hosted store's PostgREST endpoint.
///
/// Does not derive Debug: the default headers carry the access key.
#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| StoreError::Decode("access key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| StoreError::Decode("access key is not a valid header value".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        Self::new(
            &config.store_url,
            &config.store_key,
            Duration::from_secs(config.store_timeout_secs),
        )
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }
}

/// Query parameters for a history read, newest first.
fn select_params(range: &HistoryQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string()), ("order", "date.desc".to_string())];
    if let Some(start) = range.start_date {
        params.push(("date", format!("gte.{}", start)));
    }
    if let Some(end) = range.end_date {
        params.push(("date", format!("lte.{}", end)));
    }
    params
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn upsert(&self, table: Table, record: &Value) -> Result<(), StoreError> {
        tracing::debug!(table = %table, "Upserting record");

        let response = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", "date")])
            .header("Prefer", UPSERT_PREFER)
            .json(record)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn select(&self, table: Table, range: &HistoryQuery) -> Result<Vec<Row>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(&select_params(range))
            .send()
            .await?;

        let rows: Vec<Value> = check_status(response).await?.json().await?;
        rows.into_iter()
            .map(|row| match row {
                Value::Object(map) => Ok(map),
                other => Err(StoreError::Decode(format!("expected a row object, got {}", other))),
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(self.table_url(Table::DailyLogs))
            .query(&[("select", "date"), ("limit", "1")])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
