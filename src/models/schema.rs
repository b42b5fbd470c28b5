//! Field schema shared by the form endpoint and the assembler.
//!
//! Every collectable field is listed once in [`SCHEMA`] with its source
//! category, its destination table, its value kind and its valid range.
//! Destination is stated per field rather than derived from the category:
//! `weight_kg` is a scale reading stored on the daily log, and
//! `sleep_score` is a wearable reading stored on the daily log.
//! `sleep_score` is collected whenever the wearable source is selected,
//! whether or not symptoms are selected too.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::source::{Source, SourceSet};

/// Longest accepted free-text note
pub const NOTES_MAX_CHARS: usize = 5000;

/// Store tables written by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    DailyLogs,
    Biometrics,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::DailyLogs => "daily_logs",
            Table::Biometrics => "biometrics",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    WeightKg,
    BodyFatPercent,
    MuscleMassKg,
    VisceralFat,
    BoneMassKg,
    WaterKg,
    MetabolicAge,
    ProteinKg,
    Bmr,
    SleepScore,
    RestingHr,
    Steps,
    BodyBatteryHigh,
    BodyBatteryLow,
    CaloriesActive,
    CaloriesResting,
    GoutPainLevel,
    StressLevel,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    /// Column name in the destination table
    pub column: &'static str,
    pub label: &'static str,
    pub source: Source,
    pub destination: Table,
    pub kind: FieldKind,
    pub min: f64,
    /// For text fields, the maximum length in characters
    pub max: f64,
}

#[allow(clippy::too_many_arguments)]
const fn spec(
    field: Field,
    column: &'static str,
    label: &'static str,
    source: Source,
    destination: Table,
    kind: FieldKind,
    min: f64,
    max: f64,
) -> FieldSpec {
    FieldSpec {
        field,
        column,
        label,
        source,
        destination,
        kind,
        min,
        max,
    }
}

use Field::*;
use FieldKind::{Decimal, Integer, Text};
use Source::{Scale, Symptoms, Wearable};
use Table::{Biometrics, DailyLogs};

pub static SCHEMA: [FieldSpec; 19] = [
    // Scale
    spec(WeightKg, "weight_kg", "Weight (kg)", Scale, DailyLogs, Decimal, 0.0, 300.0),
    spec(BodyFatPercent, "body_fat_percent", "Body Fat (%)", Scale, Biometrics, Decimal, 0.0, 100.0),
    spec(MuscleMassKg, "muscle_mass_kg", "Muscle Mass (kg)", Scale, Biometrics, Decimal, 0.0, 200.0),
    spec(VisceralFat, "visceral_fat", "Visceral Fat", Scale, Biometrics, Integer, 0.0, 50.0),
    spec(BoneMassKg, "bone_mass_kg", "Bone Mass (kg)", Scale, Biometrics, Decimal, 0.0, 20.0),
    spec(WaterKg, "water_kg", "Body Water (kg)", Scale, Biometrics, Decimal, 0.0, 200.0),
    spec(MetabolicAge, "metabolic_age", "Metabolic Age", Scale, Biometrics, Integer, 0.0, 120.0),
    spec(ProteinKg, "protein_kg", "Protein (kg)", Scale, Biometrics, Decimal, 0.0, 50.0),
    spec(Bmr, "bmr", "BMR (kcal)", Scale, Biometrics, Integer, 0.0, 5000.0),
    // Wearable
    spec(SleepScore, "sleep_score", "Sleep Score (0-100)", Wearable, DailyLogs, Integer, 0.0, 100.0),
    spec(RestingHr, "resting_hr", "Resting HR", Wearable, Biometrics, Integer, 0.0, 200.0),
    spec(Steps, "steps", "Steps", Wearable, Biometrics, Integer, 0.0, 50000.0),
    spec(BodyBatteryHigh, "body_battery_high", "Body Battery (High)", Wearable, Biometrics, Integer, 0.0, 100.0),
    spec(BodyBatteryLow, "body_battery_low", "Body Battery (Low)", Wearable, Biometrics, Integer, 0.0, 100.0),
    spec(CaloriesActive, "calories_active", "Active Calories", Wearable, Biometrics, Integer, 0.0, 5000.0),
    spec(CaloriesResting, "calories_resting", "Resting Calories", Wearable, Biometrics, Integer, 0.0, 3000.0),
    // Symptoms
    spec(GoutPainLevel, "gout_pain_level", "Gout Pain (0=None, 10=Severe)", Symptoms, DailyLogs, Integer, 0.0, 10.0),
    spec(StressLevel, "stress_level", "Anxiety Level (0=Calm, 10=Panic)", Symptoms, DailyLogs, Integer, 0.0, 10.0),
    spec(Notes, "notes", "Notes (Triggers, Meds, Mood)", Symptoms, DailyLogs, Text, 0.0, NOTES_MAX_CHARS as f64),
];

impl Field {
    pub fn spec(&self) -> &'static FieldSpec {
        SCHEMA
            .iter()
            .find(|s| s.field == *self)
            .unwrap_or_else(|| unreachable!("every field has a schema entry"))
    }
}

impl FieldSpec {
    /// Whether `value` lies within this field's inclusive range
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Fields to present for the selected sources, in schema order.
pub fn fields_for(sources: &SourceSet) -> Vec<&'static FieldSpec> {
    SCHEMA
        .iter()
        .filter(|s| sources.contains(s.source))
        .collect()
}
