use std::sync::Arc;

use tracing::{info, warn};

use crate::dispatch;
use crate::entry::plan::ResolvedRun;
use crate::error::AppResult;
use crate::export::{clear_files, export_unique_responses};
use crate::http::build_client;
use crate::monitor::{LiveRenderer, TerminalRenderer, create_monitor};
use crate::summary::PulseSummary;
use crate::summary::print::print_report;
use crate::system::shutdown_handlers::setup_signal_handler;

/// Runs one complete pulse: dispatch, summarize, print and export.
pub(crate) async fn run_pulse(resolved: ResolvedRun) -> AppResult<()> {
    let ResolvedRun { details, params } = resolved;
    let client = build_client(&details.proxy, params.timeout)?;

    if params.export {
        clear_files(&params.output_folder).await?;
    }

    let signal_task = setup_signal_handler(&params.cancellation);
    let renderer: Arc<dyn LiveRenderer> = Arc::new(TerminalRenderer::new());
    let request_size_bytes = details.request.request_size_bytes();
    let monitor = create_monitor(client, details.request, &params, renderer);

    let outcome = dispatch::run(&params, monitor).await;
    signal_task.abort();
    let result = outcome?;

    let summary = PulseSummary {
        result,
        parameters: &params,
        request_size_bytes,
    }
    .summarize();

    print_report(&summary.report)?;

    if summary.export_required {
        let written = export_unique_responses(
            &params.output_folder,
            &summary.unique_responses,
            params.format_json,
        )
        .await?;
        if written < summary.unique_responses.len() {
            warn!(
                "{} of {} unique response(s) could not be exported",
                summary.unique_responses.len().saturating_sub(written),
                summary.unique_responses.len()
            );
        }
    } else {
        info!("Export disabled; skipping response files.");
    }
    Ok(())
}
