use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored row of the `biometrics` table, one per date.
///
/// Scale readings and wearable readings share the row; either half may be
/// entirely empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricsEntry {
    pub date: NaiveDate,

    // Scale
    pub body_fat_percent: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub visceral_fat: Option<i32>,
    pub bone_mass_kg: Option<f64>,
    pub water_kg: Option<f64>,
    pub metabolic_age: Option<i32>,
    pub protein_kg: Option<f64>,
    pub bmr: Option<i32>,

    // Wearable
    pub resting_hr: Option<i32>,
    pub steps: Option<i32>,
    pub body_battery_high: Option<i32>,
    pub body_battery_low: Option<i32>,
    pub calories_active: Option<i32>,
    pub calories_resting: Option<i32>,
}
