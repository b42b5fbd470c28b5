//! Request/response shapes for the entry form API.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::schema::FieldSpec;
use crate::models::source::SourceSet;
use crate::services::assembler::RawInputs;

/// POST /api/entries
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    /// Entry date. Default: today (UTC)
    pub date: Option<NaiveDate>,

    /// Selected data sources. Default: scale + symptoms
    pub sources: Option<SourceSet>,

    /// Collected field values keyed by column name. Checked by the assembler
    /// for the selected sources only.
    #[serde(default)]
    pub values: RawInputs,
}

/// GET /api/form query params
#[derive(Debug, Deserialize)]
pub struct FormQuery {
    /// Comma-separated source names, e.g. "scale,wearable"
    pub sources: Option<String>,
}

impl FormQuery {
    pub fn source_set(&self) -> Result<SourceSet, String> {
        match self.sources.as_deref() {
            Some(raw) => SourceSet::parse_list(raw),
            None => Ok(SourceSet::form_default()),
        }
    }
}

/// GET /api/form — the inputs to render for a selection
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub sources: SourceSet,
    pub fields: Vec<&'static FieldSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::source::Source;

    #[test]
    fn test_save_request_minimal() {
        let req: SaveEntryRequest = serde_json::from_str("{}").unwrap();
        assert!(req.date.is_none());
        assert!(req.sources.is_none());
        assert!(req.values.weight_kg.is_none());
    }

    #[test]
    fn test_save_request_full() {
        let json = r#"{
            "date": "2024-03-01",
            "sources": ["scale"],
            "values": { "weight_kg": 82.5, "body_fat_percent": 24.0 }
        }"#;
        let req: SaveEntryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(req.sources.unwrap().contains(Source::Scale));
        assert_eq!(req.values.weight_kg, Some(82.5));
    }

    #[test]
    fn test_save_request_bad_date_fails() {
        let json = r#"{"date":"01/03/2024"}"#;
        assert!(serde_json::from_str::<SaveEntryRequest>(json).is_err());
    }

    #[test]
    fn test_save_request_long_notes_deserialize() {
        let json = format!(r#"{{"values":{{"notes":"{}"}}}}"#, "x".repeat(5001));
        let req: SaveEntryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.values.notes.map(|n| n.len()), Some(5001));
    }

    #[test]
    fn test_form_query_default_selection() {
        let q = FormQuery { sources: None };
        assert_eq!(q.source_set().unwrap(), SourceSet::form_default());
        let q = FormQuery {
            sources: Some(String::new()),
        };
        assert!(q.source_set().unwrap().is_empty());
    }
}
