use std::time::Duration;

use reqwest::header::HeaderMap;

use super::exception::ExceptionInfo;

/// Outcome of one request. `status_code` is 0 when no response was received.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub id: usize,
    pub status_code: u16,
    pub headers: HeaderMap,
    pub content: String,
    pub content_length: u64,
    pub latency: Duration,
    pub exception: Option<ExceptionInfo>,
    pub current_concurrent_connections: usize,
}

impl Response {
    /// A response that never reached the server, or failed mid-flight.
    #[must_use]
    pub fn failed(
        id: usize,
        exception: ExceptionInfo,
        latency: Duration,
        current_concurrent_connections: usize,
    ) -> Self {
        Self {
            id,
            status_code: 0,
            latency,
            exception: Some(exception),
            current_concurrent_connections,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.exception.is_none() && self.status_code >= 200 && self.status_code < 300
    }

    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "seconds to milliseconds")]
    pub const fn latency_ms(&self) -> f64 {
        self.latency.as_secs_f64() * 1000.0
    }
}
