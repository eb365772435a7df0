use crate::models::{HealthMetrics, SubmitError};
use awc::http::header;
use awc::Client;
use log::debug;

/// Route the hosting application exposes for predictions.
pub const PREDICT_PATH: &str = "/predict";

/// Upper bound on a response body we are willing to buffer.
const MAX_RESPONSE_BYTES: usize = 256 * 1024;

/// Status and raw body of a settled request; interpretation is left to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one payload and waits for the service's answer.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, payload: &HealthMetrics) -> Result<RawResponse, SubmitError>;
}

/// `awc`-backed transport. Not `Send`: it lives on the current actix runtime.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(service_url: &str) -> Self {
        // Requests run until the transport settles them.
        let client = Client::builder().disable_timeout().finish();
        let endpoint = format!("{}{}", service_url.trim_end_matches('/'), PREDICT_PATH);

        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, payload: &HealthMetrics) -> Result<RawResponse, SubmitError> {
        debug!("POST {}", self.endpoint);

        let mut response = self
            .client
            .post(self.endpoint.as_str())
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .send_json(payload)
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let body = response
            .body()
            .limit(MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Ok(RawResponse::new(response.status().as_u16(), body.to_vec()))
    }
}
