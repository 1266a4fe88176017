use std::time::Duration;

use super::response::Response;

/// Everything a run produced, consolidated once after the last request.
#[derive(Debug, Clone, Default)]
pub struct PulseResult {
    pub results: Vec<Response>,
    pub total_completed: u64,
    pub success_rate: f64,
    pub total_duration: Duration,
}

/// Percentage of `successes` over `completed`, rounded to two decimals.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "percentage rounded to two decimals")]
pub fn success_rate(successes: u64, completed: u64) -> f64 {
    if completed == 0 {
        return 0.0;
    }
    let rate = successes as f64 / completed as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
