use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A stored row of the `daily_logs` table, one per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub sleep_score: Option<i32>,
    /// Self-reported anxiety, 0-10
    pub stress_level: Option<i32>,
    pub gout_pain_level: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "ordered_range"))]
pub struct HistoryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn ordered_range(query: &HistoryQuery) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            let mut err = ValidationError::new("range");
            err.message = Some("start_date must not be after end_date".into());
            return Err(err);
        }
    }
    Ok(())
}

impl HistoryQuery {
    #[cfg(test)]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |s| date >= s) && self.end_date.map_or(true, |e| date <= e)
    }
}
