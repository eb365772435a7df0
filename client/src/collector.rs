//! Turns raw form text into a [`HealthMetrics`] payload.
//!
//! Two paths exist. [`build_payload`] never fails: anything that does not
//! parse becomes `NaN` and is sent as-is. [`parse_payload`] is the checked
//! path and refuses to produce a payload from bad input.

use crate::models::{HealthMetrics, ValidationError};
use serde::{Deserialize, Serialize};

/// The six raw values as typed by the user, keyed by their form names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub age: String,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: String,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: String,
    pub heart_rate: String,
    pub body_temp: String,
    pub blood_sugar: String,
}

impl FormFields {
    pub fn new(
        age: impl Into<String>,
        systolic_bp: impl Into<String>,
        diastolic_bp: impl Into<String>,
        heart_rate: impl Into<String>,
        body_temp: impl Into<String>,
        blood_sugar: impl Into<String>,
    ) -> Self {
        Self {
            age: age.into(),
            systolic_bp: systolic_bp.into(),
            diastolic_bp: diastolic_bp.into(),
            heart_rate: heart_rate.into(),
            body_temp: body_temp.into(),
            blood_sugar: blood_sugar.into(),
        }
    }
}

/// Lenient numeric coercion. Surrounding whitespace is ignored; empty or
/// unparsable text yields `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn build_payload(fields: &FormFields) -> HealthMetrics {
    HealthMetrics {
        age: coerce_number(&fields.age),
        systolic_bp: coerce_number(&fields.systolic_bp),
        diastolic_bp: coerce_number(&fields.diastolic_bp),
        heart_rate: coerce_number(&fields.heart_rate),
        body_temp: coerce_number(&fields.body_temp),
        blood_sugar: coerce_number(&fields.blood_sugar),
    }
}

/// Checked variant of [`build_payload`]: only finite, in-range values get through.
pub fn parse_payload(fields: &FormFields) -> Result<HealthMetrics, ValidationError> {
    let metrics = build_payload(fields);
    metrics.validate()?;
    Ok(metrics)
}
