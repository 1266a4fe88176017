use clap::Parser;
use tempfile::tempdir;

use super::build_plan;
use super::types::RunPlan;
use crate::args::PulseArgs;
use crate::error::{AppError, ConfigError};

fn plan_for(args: &[&str]) -> Result<RunPlan, String> {
    let parsed = PulseArgs::try_parse_from(args).map_err(|err| format!("parse failed: {}", err))?;
    build_plan(parsed).map_err(|err| format!("plan failed: {}", err))
}

#[test]
fn missing_request_file_is_rejected() -> Result<(), String> {
    let parsed = PulseArgs::try_parse_from(["pulse"]).map_err(|err| format!("parse failed: {}", err))?;
    match build_plan(parsed) {
        Err(AppError::Config(ConfigError::MissingRequestFile)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected missing request file".to_owned()),
    }
}

#[test]
fn url_override_without_file_uses_defaults() -> Result<(), String> {
    match plan_for(&["pulse", "-u", "http://localhost:8080/health", "--noop"])? {
        RunPlan::Noop(resolved) if resolved.details.request.url == "http://localhost:8080/health" => Ok(()),
        RunPlan::Noop(_) | RunPlan::Run(_) | RunPlan::GetSample(_) => {
            Err("Expected a noop plan with the overridden url".to_owned())
        }
    }
}

#[test]
fn url_override_replaces_file_url() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("request.json");
    std::fs::write(&path, r#"{"request":{"url":"http://example.invalid/a"}}"#)
        .map_err(|err| format!("write failed: {}", err))?;
    let path_arg = path.to_string_lossy().into_owned();
    match plan_for(&["pulse", path_arg.as_str(), "-u", "http://127.0.0.1:1/b", "-n", "3"])? {
        RunPlan::Run(resolved) => {
            if resolved.details.request.url != "http://127.0.0.1:1/b" || resolved.params.requests != 3 {
                return Err("Override not applied".to_owned());
            }
            Ok(())
        }
        RunPlan::Noop(_) | RunPlan::GetSample(_) => Err("Expected a run plan".to_owned()),
    }
}

#[test]
fn invalid_url_is_rejected_before_dispatch() -> Result<(), String> {
    let parsed = PulseArgs::try_parse_from(["pulse", "-u", "::not a url::"])
        .map_err(|err| format!("parse failed: {}", err))?;
    match build_plan(parsed) {
        Err(AppError::Config(ConfigError::InvalidUrl { .. })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected invalid url".to_owned()),
    }
}

#[test]
fn get_sample_plan() -> Result<(), String> {
    match plan_for(&["pulse", "get-sample"])? {
        RunPlan::GetSample(_) => Ok(()),
        RunPlan::Noop(_) | RunPlan::Run(_) => Err("Expected get-sample plan".to_owned()),
    }
}
