use std::path::Path;

use clap::Parser;

use crate::args::PulseArgs;
use crate::config::{RequestDetails, load_request_details, validate_request};
use crate::domain::CancellationSignal;
use crate::error::AppResult;
use crate::summary::stats::{Summary, get_summary};

/// Parses command-line tokens and maps them to run parameters.
///
/// # Errors
///
/// Returns an error when clap rejects the arguments.
pub fn parse_args_input(tokens: &[&str]) -> AppResult<()> {
    let args = PulseArgs::try_parse_from(tokens)?;
    let params = args.to_parameters(CancellationSignal::new());
    debug_assert!(params.requests >= 1);
    Ok(())
}

/// Loads and validates a request file.
///
/// # Errors
///
/// Returns an error when reading, parsing or validation fails.
pub fn load_request_file_input(path: &Path) -> AppResult<()> {
    let details = load_request_details(path)?;
    validate_request(&details.request)
}

/// Parses request JSON and returns the estimated request size.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn parse_request_json_input(input: &[u8]) -> AppResult<u64> {
    let details: RequestDetails = serde_json::from_slice(input)?;
    validate_request(&details.request)?;
    Ok(details.request.request_size_bytes())
}

#[must_use]
pub fn summarize_values_input(values: &mut [f64], remove_outliers: bool) -> Summary {
    get_summary(values, remove_outliers)
}
