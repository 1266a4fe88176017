use std::num::NonZeroUsize;
use std::time::Duration;

use super::types::TimeoutSetting;
use crate::error::ValidationError;

fn parse_i64(s: &str) -> Result<i64, ValidationError> {
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .map_err(|err| ValidationError::InvalidNumber {
            value: trimmed.to_owned(),
            source: err,
        })
}

fn millis(value: i64) -> Duration {
    Duration::from_millis(u64::try_from(value).unwrap_or(0))
}

/// Request count; anything below 1 falls back to 1.
pub(crate) fn parse_request_count(s: &str) -> Result<usize, ValidationError> {
    let value = parse_i64(s)?;
    Ok(usize::try_from(value.max(1)).unwrap_or(usize::MAX))
}

pub(crate) fn parse_connections(s: &str) -> Result<NonZeroUsize, ValidationError> {
    let value = parse_i64(s)?;
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(ValidationError::ValueTooSmall { min: 1 })
}

/// Delay in milliseconds; negative values clamp to zero.
pub(crate) fn parse_delay(s: &str) -> Result<Duration, ValidationError> {
    parse_i64(s).map(millis)
}

/// Timeout in milliseconds; zero or negative means no timeout.
pub(crate) fn parse_timeout(s: &str) -> Result<TimeoutSetting, ValidationError> {
    let value = parse_i64(s)?;
    if value <= 0 {
        return Ok(TimeoutSetting(None));
    }
    Ok(TimeoutSetting(Some(millis(value))))
}
