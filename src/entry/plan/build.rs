use crate::args::{Command, PulseArgs};
use crate::config::{RequestDetails, load_request_details, validate_request};
use crate::domain::CancellationSignal;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ResolvedRun, RunPlan};

pub(crate) fn build_plan(mut args: PulseArgs) -> AppResult<RunPlan> {
    if let Some(Command::GetSample(sample_args)) = args.command.take() {
        return Ok(RunPlan::GetSample(sample_args));
    }

    let mut details = match (args.request_file.as_deref(), args.url.as_ref()) {
        (Some(path), _) => load_request_details(path)?,
        (None, Some(_)) => RequestDetails::default(),
        (None, None) => return Err(AppError::config(ConfigError::MissingRequestFile)),
    };
    if let Some(url) = args.url.take() {
        details.request.url = url;
    }
    validate_request(&details.request)?;

    let resolved = Box::new(ResolvedRun {
        params: args.to_parameters(CancellationSignal::new()),
        details,
    });
    if args.noop {
        return Ok(RunPlan::Noop(resolved));
    }
    Ok(RunPlan::Run(resolved))
}
