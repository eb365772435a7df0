//! Client side of the maternal health risk predictor.
//!
//! - `collector`: raw form text to [`HealthMetrics`].
//! - `controller`: one-request-at-a-time submission state machine.
//! - `transport`: HTTP POST to the prediction route.
//! - `render`: text and JSON views of the current state.

pub mod collector;
pub mod controller;
pub mod models;
pub mod render;
pub mod transport;

pub use collector::{build_payload, parse_payload, FormFields};
pub use controller::SubmissionController;
pub use models::{
    HealthMetrics, PredictionResult, SubmissionState, SubmitError, ValidationError,
    FAILURE_MESSAGE,
};
pub use transport::{HttpTransport, RawResponse, Transport, PREDICT_PATH};
