use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

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
use super::counters::StatusCounters;
use super::render::{LiveRenderer, ProgressSnapshot};

/// Minimum spacing between two live renders.
pub const RENDER_INTERVAL: Duration = Duration::from_millis(50);

/// Aggregating monitor: status-class counters plus a rate-limited live view.
pub struct CompactMonitor {
    client: Client,
    recipe: RequestRecipe,
    total: usize,
    save_content: bool,
    cancellation: CancellationSignal,
    context: ExecutionContext,
    counters: StatusCounters,
    collector: ResultCollector,
    renderer: Arc<dyn LiveRenderer>,
    start: Instant,
    last_render_ms: AtomicU64,
}

impl CompactMonitor {
    #[must_use]
    pub fn new(
        client: Client,
        recipe: RequestRecipe,
        total: usize,
        save_content: bool,
        cancellation: CancellationSignal,
        renderer: Arc<dyn LiveRenderer>,
    ) -> Self {
        renderer.progress(&ProgressSnapshot::initial(total));
        Self {
            client,
            recipe,
            total,
            save_content,
            cancellation,
            context: ExecutionContext::new(),
            counters: StatusCounters::new(),
            collector: ResultCollector::new(),
            renderer,
            start: Instant::now(),
            last_render_ms: AtomicU64::new(0),
        }
    }

    fn maybe_render(&self, completed: u64) {
        let is_final = u64::try_from(self.total).is_ok_and(|total| completed >= total);
        let elapsed = self.start.elapsed();
        if !is_final {
            let now_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
            let interval_ms = u64::try_from(RENDER_INTERVAL.as_millis()).unwrap_or(u64::MAX);
            let last = self.last_render_ms.load(Ordering::Acquire);
            if now_ms.saturating_sub(last) < interval_ms {
                return;
            }
            if self
                .last_render_ms
                .compare_exchange(last, now_ms, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
        }
        let snapshot = ProgressSnapshot::from_counters(&self.counters.snapshot(), self.total, elapsed);
        self.renderer.progress(&snapshot);
    }
}

#[async_trait]
impl Monitor for CompactMonitor {
    async fn send(&self, id: usize) -> Result<(), RunError> {
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
        let completed = self.counters.record(response.status_code);
        self.collector.push(response);
        self.maybe_render(completed);
        Ok(())
    }

    fn consolidate(&self) -> PulseResult {
        let counters = self.counters.snapshot();
        let result = PulseResult {
            results: self.collector.drain(),
            total_completed: counters.completed,
            success_rate: success_rate(counters.successes(), counters.completed),
            total_duration: self.start.elapsed(),
        };
        self.renderer.finish();
        result
    }
}
