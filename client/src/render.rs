use crate::models::SubmissionState;
use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Serializable view of a [`SubmissionState`].
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StateView<'a> {
    Idle,
    Submitting { request_id: u64 },
    Succeeded { prediction: &'a str },
    Failed { message: &'a str },
    Invalid { field: &'a str, message: String },
}

impl<'a> From<&'a SubmissionState> for StateView<'a> {
    fn from(state: &'a SubmissionState) -> Self {
        match state {
            SubmissionState::Idle => StateView::Idle,
            SubmissionState::Submitting { request_id } => StateView::Submitting {
                request_id: *request_id,
            },
            SubmissionState::Succeeded(result) => StateView::Succeeded {
                prediction: &result.prediction,
            },
            SubmissionState::Failed(message) => StateView::Failed { message },
            SubmissionState::Invalid(err) => StateView::Invalid {
                field: err.field(),
                message: err.to_string(),
            },
        }
    }
}

/// The single line the user sees for `state`. `Idle` renders nothing.
pub fn render(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => String::new(),
        SubmissionState::Submitting { .. } => "Predicting...".to_string(),
        SubmissionState::Succeeded(result) => {
            format!("Predicted Risk Level: {}", result.prediction)
        }
        SubmissionState::Failed(message) => format!("Error: {}", message),
        SubmissionState::Invalid(err) => format!("Invalid input: {}", err),
    }
}

pub fn render_json(state: &SubmissionState) -> serde_json::Result<String> {
    let ok = !matches!(
        state,
        SubmissionState::Failed(_) | SubmissionState::Invalid(_)
    );
    serde_json::to_string_pretty(&JsonOut {
        ok,
        data: StateView::from(state),
    })
}
