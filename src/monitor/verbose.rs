use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::Instant;

use crate::config::RequestRecipe;
use crate::domain::result::success_rate;
use crate::domain::{CancellationSignal, PulseResult};
use crate::error::RunError;
use crate::http::ExecutionContext;

use super::Monitor;
use super::collector::ResultCollector;
use super::render::LiveRenderer;

/// Per-request monitor: reports every send and every response.
pub struct VerboseMonitor {
    client: Client,
    recipe: RequestRecipe,
    save_content: bool,
    cancellation: CancellationSignal,
    context: ExecutionContext,
    completed: AtomicU64,
    successes: AtomicU64,
    collector: ResultCollector,
    renderer: Arc<dyn LiveRenderer>,
    start: Instant,
}

impl VerboseMonitor {
    #[must_use]
    pub fn new(
        client: Client,
        recipe: RequestRecipe,
        save_content: bool,
        cancellation: CancellationSignal,
        renderer: Arc<dyn LiveRenderer>,
    ) -> Self {
        Self {
            client,
            recipe,
            save_content,
            cancellation,
            context: ExecutionContext::new(),
            completed: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            collector: ResultCollector::new(),
            renderer,
            start: Instant::now(),
        }
    }
}

#[async_trait]
impl Monitor for VerboseMonitor {
    async fn send(&self, id: usize) -> Result<(), RunError> {
        self.renderer.request_sent(id);
        let response = self
            .context
            .send(
                id,
                &self.recipe,
                &self.client,
                self.save_content,
                &self.cancellation,
            )
            .await?;
        self.completed.fetch_add(1, Ordering::AcqRel);
        if (200..300).contains(&response.status_code) {
            self.successes.fetch_add(1, Ordering::AcqRel);
        }
        self.renderer.response_received(id, response.status_code);
        self.collector.push(response);
        Ok(())
    }

    fn consolidate(&self) -> PulseResult {
        let completed = self.completed.load(Ordering::Acquire);
        let successes = self.successes.load(Ordering::Acquire);
        let result = PulseResult {
            results: self.collector.drain(),
            total_completed: completed,
            success_rate: success_rate(successes, completed),
            total_duration: self.start.elapsed(),
        };
        self.renderer.finish();
        result
    }
}
