//! Request monitors: execute one request per `send` and aggregate the run.
mod collector;
pub mod compact;
pub mod counters;
pub mod render;
pub mod verbose;


use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::RequestRecipe;
use crate::domain::{PulseResult, RunParameters};
use crate::error::RunError;

pub use compact::CompactMonitor;
pub use render::{LiveRenderer, NoopRenderer, ProgressSnapshot, TerminalRenderer};
pub use verbose::VerboseMonitor;

#[async_trait]
pub trait Monitor: Send + Sync {
    /// Executes request `id` and records its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Cancelled`] when the run is aborted mid-request.
    async fn send(&self, id: usize) -> Result<(), RunError>;

    /// Collects every recorded response. Called once, after the last `send`.
    fn consolidate(&self) -> PulseResult;
}

/// Picks the monitor implementation for this run.
#[must_use]
pub fn create_monitor(
    client: Client,
    recipe: RequestRecipe,
    params: &RunParameters,
    renderer: Arc<dyn LiveRenderer>,
) -> Arc<dyn Monitor> {
    if params.verbose {
        Arc::new(VerboseMonitor::new(
            client,
            recipe,
            params.export,
            params.cancellation.clone(),
            renderer,
        ))
    } else {
        Arc::new(CompactMonitor::new(
            client,
            recipe,
            params.requests,
            params.export,
            params.cancellation.clone(),
            renderer,
        ))
    }
}
