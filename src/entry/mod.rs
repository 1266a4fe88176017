pub(crate) mod plan;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use crate::args::PulseArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

const CANCELLED_MESSAGE: &str = "Cancellation requested and handled gracefully.";

/// Parses the command line, runs the requested plan and maps the outcome
/// to the process exit code.
#[must_use]
pub fn run() -> ExitCode {
    let args = match PulseArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let informational = matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            if let Err(print_err) = err.print() {
                eprintln!("Failed to print usage: {}", print_err);
            }
            return if informational {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    crate::system::logger::init_logging(args.verbose);

    match run_with_runtime(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_cancelled() => {
            eprintln!("{CANCELLED_MESSAGE}");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_with_runtime(args: PulseArgs) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: PulseArgs) -> AppResult<()> {
    let plan = build_plan(args)?;
    execute_plan(plan).await
}
