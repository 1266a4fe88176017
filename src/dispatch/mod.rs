//! Dispatch strategies: how the N requests of a run are scheduled.
mod bounded;
mod sequential;
mod unbounded;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::info;

use crate::domain::{ExecutionMode, PulseResult, RunParameters};
use crate::error::RunError;
use crate::monitor::Monitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    Bounded(usize),
    Unbounded,
}

impl Strategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Bounded(_) => "bounded",
            Strategy::Unbounded => "unbounded",
        }
    }
}

#[must_use]
pub fn select_strategy(params: &RunParameters) -> Strategy {
    if params.requests <= 1 || params.execution_mode == ExecutionMode::Sequential {
        Strategy::Sequential
    } else if params.max_connections_modified() {
        Strategy::Bounded(params.max_connections())
    } else {
        Strategy::Unbounded
    }
}

/// Runs every request through `monitor` and consolidates the results.
///
/// # Errors
///
/// Returns [`RunError::Cancelled`] when the run is aborted and
/// [`RunError::TaskFailed`] when a request task panics.
pub async fn run(params: &RunParameters, monitor: Arc<dyn Monitor>) -> Result<PulseResult, RunError> {
    let strategy = select_strategy(params);
    info!(
        "Dispatching {} request(s) with the {} strategy",
        params.requests,
        strategy.as_str()
    );
    match strategy {
        Strategy::Sequential => {
            sequential::run(params.requests, params.delay, &params.cancellation, monitor.as_ref())
                .await?;
        }
        Strategy::Bounded(limit) => {
            bounded::run(params.requests, limit, &params.cancellation, &monitor).await?;
        }
        Strategy::Unbounded => {
            unbounded::run(params.requests, &monitor).await?;
        }
    }
    Ok(monitor.consolidate())
}

/// Joins every task; the first failure aborts the rest.
async fn join_all(mut tasks: JoinSet<Result<(), RunError>>) -> Result<(), RunError> {
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(|source| RunError::TaskFailed { source });
        if let Err(err) = outcome.and_then(|result| result) {
            tasks.abort_all();
            while tasks.join_next().await.is_some() {}
            return Err(err);
        }
    }
    Ok(())
}
