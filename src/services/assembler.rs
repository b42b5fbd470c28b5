//! Form assembly: turns the values collected for the selected sources into
//! the two sparse write payloads.
//!
//! Pure transformation, no I/O. Values belonging to a source that is not
//! selected are ignored outright, even when the input layer still holds a
//! stale value for them.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::models::partial::PartialRecord;
use crate::models::schema::{fields_for, Field, FieldKind, FieldSpec, Table};
use crate::models::source::SourceSet;

/// Decides which collected values count as "entered".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InclusionPolicy {
    /// Zero means "not entered": only values > 0 are written.
    #[default]
    PositiveOnly,
    /// Any provided value is written, zero included.
    Explicit,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be a whole number (got {value})")]
    NotInteger { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Raw values as collected by the input layer; `None` means not entered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInputs {
    pub weight_kg: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub visceral_fat: Option<f64>,
    pub bone_mass_kg: Option<f64>,
    pub water_kg: Option<f64>,
    pub metabolic_age: Option<f64>,
    pub protein_kg: Option<f64>,
    pub bmr: Option<f64>,

    pub sleep_score: Option<f64>,
    pub resting_hr: Option<f64>,
    pub steps: Option<f64>,
    pub body_battery_high: Option<f64>,
    pub body_battery_low: Option<f64>,
    pub calories_active: Option<f64>,
    pub calories_resting: Option<f64>,

    #[serde(alias = "gout_pain")]
    pub gout_pain_level: Option<f64>,
    #[serde(alias = "anxiety")]
    pub stress_level: Option<f64>,
    /// Length is checked after trimming, and only when symptoms are selected
    pub notes: Option<String>,
}

impl RawInputs {
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::WeightKg => self.weight_kg,
            Field::BodyFatPercent => self.body_fat_percent,
            Field::MuscleMassKg => self.muscle_mass_kg,
            Field::VisceralFat => self.visceral_fat,
            Field::BoneMassKg => self.bone_mass_kg,
            Field::WaterKg => self.water_kg,
            Field::MetabolicAge => self.metabolic_age,
            Field::ProteinKg => self.protein_kg,
            Field::Bmr => self.bmr,
            Field::SleepScore => self.sleep_score,
            Field::RestingHr => self.resting_hr,
            Field::Steps => self.steps,
            Field::BodyBatteryHigh => self.body_battery_high,
            Field::BodyBatteryLow => self.body_battery_low,
            Field::CaloriesActive => self.calories_active,
            Field::CaloriesResting => self.calories_resting,
            Field::GoutPainLevel => self.gout_pain_level,
            Field::StressLevel => self.stress_level,
            Field::Notes => None,
        }
    }
}

/// The two payloads produced for one entry date.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub daily_log: PartialRecord,
    pub biometrics: PartialRecord,
}

pub fn assemble(
    date: NaiveDate,
    sources: &SourceSet,
    raw: &RawInputs,
    policy: InclusionPolicy,
) -> Result<Assembled, FieldError> {
    let mut daily_log = PartialRecord::new(Table::DailyLogs, date);
    let mut biometrics = PartialRecord::new(Table::Biometrics, date);

    for spec in fields_for(sources) {
        let Some(value) = collect(spec, raw, policy)? else {
            continue;
        };
        match spec.destination {
            Table::DailyLogs => daily_log.insert(spec.column, value),
            Table::Biometrics => biometrics.insert(spec.column, value),
        }
    }

    Ok(Assembled {
        daily_log,
        biometrics,
    })
}

/// The payload value for one active field, or `None` if it is not entered.
fn collect(
    spec: &FieldSpec,
    raw: &RawInputs,
    policy: InclusionPolicy,
) -> Result<Option<Value>, FieldError> {
    if spec.kind == FieldKind::Text {
        let Some(text) = raw.notes.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let max = spec.max as usize;
        if text.chars().count() > max {
            return Err(FieldError::TooLong {
                field: spec.column,
                max,
            });
        }
        return Ok(Some(Value::String(text.to_string())));
    }

    let Some(value) = raw.numeric(spec.field) else {
        return Ok(None);
    };
    if !value.is_finite() {
        return Err(FieldError::NotFinite { field: spec.column });
    }
    if !spec.in_range(value) {
        return Err(FieldError::OutOfRange {
            field: spec.column,
            min: spec.min,
            max: spec.max,
            value,
        });
    }
    if spec.kind == FieldKind::Integer && value.fract() != 0.0 {
        return Err(FieldError::NotInteger {
            field: spec.column,
            value,
        });
    }

    let entered = match policy {
        InclusionPolicy::PositiveOnly => value > 0.0,
        InclusionPolicy::Explicit => true,
    };
    if !entered {
        return Ok(None);
    }

    Ok(Some(match spec.kind {
        FieldKind::Integer => Value::from(value as i64),
        _ => Value::from(value),
    }))
}
