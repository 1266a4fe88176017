use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::domain::run::DEFAULT_OUTPUT_FOLDER;
use crate::domain::{CancellationSignal, ExecutionMode, RunParameters};

use super::parsers::{parse_connections, parse_delay, parse_request_count, parse_timeout};
use super::types::{ModeArg, TimeoutSetting};

pub const DEFAULT_SAMPLE_PATH: &str = "sample.json";

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Write a sample request file and exit
    GetSample(GetSampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct GetSampleArgs {
    /// Where to write the sample request file
    #[arg(long = "path", default_value = DEFAULT_SAMPLE_PATH)]
    pub path: PathBuf,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "pulse",
    version,
    about = "Async HTTP request tester - sequential, bounded or unbounded dispatch with live metrics, outlier-filtered statistics and deduplicated response export.",
    args_conflicts_with_subcommands = true
)]
pub struct PulseArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Request file (JSON or TOML)
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: Option<PathBuf>,

    /// Number of requests to send (values below 1 become 1)
    #[arg(
        short = 'n',
        long = "number",
        default_value = "1",
        value_parser = parse_request_count,
        allow_negative_numbers = true
    )]
    pub requests: usize,

    /// Execution mode
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        ignore_case = true,
        default_value_t = ModeArg::Parallel
    )]
    pub mode: ModeArg,

    /// Maximum concurrent connections (parallel mode)
    #[arg(short = 'c', long = "connections", value_parser = parse_connections)]
    pub connections: Option<NonZeroUsize>,

    /// Delay between requests in milliseconds (sequential mode only)
    #[arg(
        long = "delay",
        default_value = "0",
        value_parser = parse_delay,
        allow_negative_numbers = true
    )]
    pub delay: Duration,

    /// Request timeout in milliseconds (-1 or 0 for none)
    #[arg(
        short = 't',
        long = "timeout",
        default_value = "-1",
        value_parser = parse_timeout,
        allow_negative_numbers = true
    )]
    pub timeout: TimeoutSetting,

    /// Pretty-print JSON response bodies on export
    #[arg(long = "json")]
    pub format_json: bool,

    /// Compare response content exactly when deduplicating
    #[arg(short = 'f', long = "full-equality")]
    pub full_equality: bool,

    /// Do not save or export response content
    #[arg(long = "no-export")]
    pub no_export: bool,

    /// Print every request and response instead of aggregate metrics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Output folder for exported responses
    #[arg(
        short = 'o',
        long = "output",
        env = "PULSE_OUTPUT",
        default_value = DEFAULT_OUTPUT_FOLDER
    )]
    pub output: PathBuf,

    /// Override the request URL
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Print the resolved configuration and exit
    #[arg(long = "noop")]
    pub noop: bool,
}

impl PulseArgs {
    /// Maps flags onto the immutable parameters of one run.
    #[must_use]
    pub fn to_parameters(&self, cancellation: CancellationSignal) -> RunParameters {
        let execution_mode = ExecutionMode::from(self.mode);
        let delay = if execution_mode == ExecutionMode::Sequential {
            self.delay
        } else {
            if !self.delay.is_zero() {
                warn!("--delay is ignored unless --mode sequential is used.");
            }
            Duration::ZERO
        };
        RunParameters {
            requests: self.requests,
            execution_mode,
            max_connections: self.connections,
            delay,
            timeout: self.timeout.get(),
            export: !self.no_export,
            use_full_equality: self.full_equality,
            format_json: self.format_json,
            verbose: self.verbose,
            output_folder: self.output.clone(),
            cancellation,
        }
    }
}
