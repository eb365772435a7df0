use serde::Serialize;
use std::time::Instant;

/// Envelope for every response the gateway answers itself.
/// Relayed `/predict` responses pass through untouched.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_elapsed_ms: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::new(Some(data), None)
    }

    pub fn error(message: &str) -> Self {
        Self::new(None, Some(message.to_string()))
    }

    /// Records how long the upstream call took before it failed or answered.
    pub fn elapsed(mut self, since: Instant) -> Self {
        self.upstream_elapsed_ms = Some(since.elapsed().as_millis() as u64);
        self
    }

    fn new(data: Option<T>, error: Option<String>) -> Self {
        ApiResponse {
            success: error.is_none(),
            data,
            error,
            timestamp: chrono::Utc::now().to_rfc3339(),
            upstream_elapsed_ms: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub service: String,
    pub version: String,
    pub upstream: String,
}
