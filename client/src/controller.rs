//! Submission lifecycle: `Idle -> Submitting -> Succeeded | Failed`.
//!
//! The controller is single-threaded. Every call to [`SubmissionController::submit`]
//! moves the state to `Submitting` before its future is first polled, and the
//! future always leaves a terminal state behind. Each submission takes a fresh
//! request id; a response that settles after a newer submission started is
//! dropped so the visible state tracks the most recent request.

use crate::collector::{parse_payload, FormFields};
use crate::models::{
    HealthMetrics, PredictionResult, SubmissionState, SubmitError, ValidationError,
    FAILURE_MESSAGE,
};
use crate::transport::Transport;
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::future::Future;

pub struct SubmissionController<T: Transport> {
    transport: T,
    state: RefCell<SubmissionState>,
    latest_request: Cell<u64>,
}

impl<T: Transport> SubmissionController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: RefCell::new(SubmissionState::Idle),
            latest_request: Cell::new(0),
        }
    }

    /// Snapshot for the rendering layer.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Back to `Idle`. Any request still in flight is treated as stale.
    pub fn reset(&self) {
        self.next_request_id();
        self.set_state(SubmissionState::Idle);
    }

    /// Sends `payload` as it is, without validation.
    pub fn submit(&self, payload: HealthMetrics) -> impl Future<Output = SubmissionState> + '_ {
        let request_id = self.begin();
        async move {
            let outcome = self.send(&payload).await;
            self.settle(request_id, outcome)
        }
    }

    /// Validates the form first. Bad input ends in `Invalid` and nothing is sent.
    pub fn submit_form<'a>(
        &'a self,
        fields: &FormFields,
    ) -> impl Future<Output = SubmissionState> + 'a {
        let pending = match parse_payload(fields) {
            Ok(payload) => Some(self.submit(payload)),
            Err(err) => {
                self.reject(err);
                None
            }
        };
        async move {
            match pending {
                Some(request) => request.await,
                None => self.state(),
            }
        }
    }

    fn begin(&self) -> u64 {
        let request_id = self.next_request_id();
        self.set_state(SubmissionState::Submitting { request_id });
        info!("Submitting prediction request {}", request_id);
        request_id
    }

    fn reject(&self, err: ValidationError) {
        warn!("Rejected form input: {}", err);
        self.next_request_id();
        self.set_state(SubmissionState::Invalid(err));
    }

    async fn send(&self, payload: &HealthMetrics) -> Result<PredictionResult, SubmitError> {
        let response = self.transport.post_json(payload).await?;
        if !response.is_success() {
            return Err(SubmitError::Status(response.status));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    fn settle(
        &self,
        request_id: u64,
        outcome: Result<PredictionResult, SubmitError>,
    ) -> SubmissionState {
        if request_id != self.latest_request.get() {
            debug!(
                "Discarding stale response for request {} (latest is {})",
                request_id,
                self.latest_request.get()
            );
            return self.state();
        }

        let next = match outcome {
            Ok(result) => {
                info!(
                    "Prediction request {} succeeded: {}",
                    request_id, result.prediction
                );
                SubmissionState::Succeeded(result)
            }
            Err(e) => {
                error!("Prediction request {} failed: {}", request_id, e);
                SubmissionState::Failed(FAILURE_MESSAGE.to_string())
            }
        };
        debug_assert!(next.is_terminal());
        self.set_state(next.clone());
        next
    }

    fn next_request_id(&self) -> u64 {
        let id = self.latest_request.get() + 1;
        self.latest_request.set(id);
        id
    }

    fn set_state(&self, next: SubmissionState) {
        *self.state.borrow_mut() = next;
    }
}
