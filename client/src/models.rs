use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown for every failed submission, whatever the underlying cause.
pub const FAILURE_MESSAGE: &str = "An error occurred while predicting risk. Please try again.";

/// Request payload sent to the prediction service.
///
/// Field order and wire names follow the service contract. A `NaN` value
/// serializes as JSON `null`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HealthMetrics {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "SystolicBP")]
    pub systolic_bp: f64,
    #[serde(rename = "DiastolicBP")]
    pub diastolic_bp: f64,
    #[serde(rename = "HeartRate")]
    pub heart_rate: f64,
    #[serde(rename = "BodyTemp")]
    pub body_temp: f64,
    #[serde(rename = "BS")]
    pub blood_sugar: f64,
}

/// Plausible bounds for each measurement, `(label, min, max)`.
///
/// Body temperature is in °F and blood sugar in mmol/L, matching the units
/// the service was trained on.
pub const METRIC_BOUNDS: [(&str, f64, f64); 6] = [
    ("Age", 1.0, 120.0),
    ("Systolic BP", 50.0, 250.0),
    ("Diastolic BP", 30.0, 200.0),
    ("Heart Rate", 20.0, 250.0),
    ("Body Temperature", 90.0, 110.0),
    ("Blood Sugar", 1.0, 30.0),
];

impl HealthMetrics {
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.age,
            self.systolic_bp,
            self.diastolic_bp,
            self.heart_rate,
            self.body_temp,
            self.blood_sugar,
        ]
    }

    /// Rejects non-finite and out-of-range values, reporting the first one found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (value, (field, min, max)) in self.to_array().into_iter().zip(METRIC_BOUNDS) {
            if !value.is_finite() {
                return Err(ValidationError::NotANumber { field });
            }
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Decoded success body. Only `prediction` is required; other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionResult {
    pub prediction: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotANumber { field } | ValidationError::OutOfRange { field, .. } => {
                field
            }
        }
    }
}

/// Why a submission ended in `Failed`. Logged, never shown to the user.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service responded with status {0}")]
    Status(u16),
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Lifecycle of the most recent submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting { request_id: u64 },
    Succeeded(PredictionResult),
    Failed(String),
    Invalid(ValidationError),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_) | SubmissionState::Invalid(_)
        )
    }
}
