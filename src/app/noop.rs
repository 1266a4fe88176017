use serde::Serialize;

use crate::config::RequestDetails;
use crate::domain::RunParameters;
use crate::entry::plan::ResolvedRun;
use crate::error::{AppError, AppResult, ValidationError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedConfiguration<'run> {
    details: &'run RequestDetails,
    parameters: ParametersView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParametersView {
    requests: usize,
    execution_mode: &'static str,
    max_connections: usize,
    max_connections_modified: bool,
    delay_ms: u64,
    timeout_ms: Option<u64>,
    export: bool,
    use_full_equality: bool,
    format_json: bool,
    verbose: bool,
    output_folder: String,
}

impl From<&RunParameters> for ParametersView {
    fn from(params: &RunParameters) -> Self {
        Self {
            requests: params.requests,
            execution_mode: params.execution_mode.as_str(),
            max_connections: params.max_connections(),
            max_connections_modified: params.max_connections_modified(),
            delay_ms: millis(params.delay),
            timeout_ms: params.timeout.map(millis),
            export: params.export,
            use_full_equality: params.use_full_equality,
            format_json: params.format_json,
            verbose: params.verbose,
            output_folder: params.output_folder.display().to_string(),
        }
    }
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn configuration_json(resolved: &ResolvedRun) -> AppResult<String> {
    let configuration = ResolvedConfiguration {
        details: &resolved.details,
        parameters: ParametersView::from(&resolved.params),
    };
    serde_json::to_string_pretty(&configuration)
        .map_err(|source| AppError::validation(ValidationError::SerializeConfiguration { source }))
}

/// Prints the resolved configuration as pretty JSON and sends nothing.
pub(crate) fn print_configuration(resolved: &ResolvedRun) -> AppResult<()> {
    let json = configuration_json(resolved)?;
    println!("{json}");
    Ok(())
}
