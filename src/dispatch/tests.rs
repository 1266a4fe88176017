use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{Strategy, run, select_strategy};
use crate::config::{ProxyConfig, RequestRecipe};
use crate::domain::exception::TIMEOUT_EXCEPTION;
use crate::domain::{ExecutionMode, PulseResult, Response, RunParameters};
use crate::error::{AppError, AppResult, RunError};
use crate::http::build_client;
use crate::monitor::{Monitor, NoopRenderer, create_monitor};
use crate::test_support::{Reply, run_async_test, spawn_http_server};

#[derive(Default)]
struct FakeMonitor {
    seen: Mutex<Vec<usize>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    consolidated: AtomicBool,
    cancel_at: Option<usize>,
    hold: Duration,
}

impl FakeMonitor {
    fn holding(hold: Duration) -> Self {
        Self {
            hold,
            ..Self::default()
        }
    }

    fn seen(&self) -> Vec<usize> {
        let mut seen = self.seen.lock().map(|seen| seen.clone()).unwrap_or_default();
        seen.sort_unstable();
        seen
    }
}

#[async_trait]
impl Monitor for FakeMonitor {
    async fn send(&self, id: usize) -> Result<(), RunError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.peak.fetch_max(current, Ordering::SeqCst);
        if !self.hold.is_zero() {
            tokio::time::sleep(self.hold).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.cancel_at == Some(id) {
            return Err(RunError::Cancelled);
        }
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(id);
        }
        Ok(())
    }

    fn consolidate(&self) -> PulseResult {
        self.consolidated.store(true, Ordering::SeqCst);
        let results: Vec<Response> = self
            .seen()
            .into_iter()
            .map(|id| Response {
                id,
                status_code: 200,
                ..Response::default()
            })
            .collect();
        PulseResult {
            total_completed: u64::try_from(results.len()).unwrap_or(u64::MAX),
            results,
            ..PulseResult::default()
        }
    }
}

fn params(requests: usize, mode: ExecutionMode, connections: Option<usize>) -> RunParameters {
    RunParameters {
        requests,
        execution_mode: mode,
        max_connections: connections.and_then(NonZeroUsize::new),
        ..RunParameters::default()
    }
}

fn expect_ids(monitor: &FakeMonitor, requests: usize) -> AppResult<()> {
    let expected: Vec<usize> = (1..=requests).collect();
    if monitor.seen() != expected {
        return Err(AppError::validation(format!(
            "Expected every id exactly once, got {:?}",
            monitor.seen()
        )));
    }
    Ok(())
}

#[test]
fn strategy_selection() -> AppResult<()> {
    let cases = [
        (params(1, ExecutionMode::Parallel, Some(4)), Strategy::Sequential),
        (params(10, ExecutionMode::Sequential, None), Strategy::Sequential),
        (params(10, ExecutionMode::Parallel, Some(4)), Strategy::Bounded(4)),
        (params(10, ExecutionMode::Parallel, None), Strategy::Unbounded),
    ];
    for (params, expected) in cases {
        let actual = select_strategy(&params);
        if actual != expected {
            return Err(AppError::validation(format!(
                "Expected {:?}, got {:?}",
                expected, actual
            )));
        }
    }
    Ok(())
}

#[test]
fn sequential_runs_in_order_one_at_a_time() -> AppResult<()> {
    run_async_test(async {
        let monitor = Arc::new(FakeMonitor::holding(Duration::from_millis(1)));
        let result = run(&params(5, ExecutionMode::Sequential, None), monitor.clone()).await?;
        let ordered = monitor.seen.lock().map(|seen| seen.clone()).unwrap_or_default();
        if ordered != vec![1, 2, 3, 4, 5] {
            return Err(AppError::validation(format!("Out of order: {:?}", ordered)));
        }
        if monitor.peak.load(Ordering::SeqCst) != 1 || result.results.len() != 5 {
            return Err(AppError::validation("Sequential must never overlap"));
        }
        Ok(())
    })
}

#[test]
fn bounded_never_exceeds_limit() -> AppResult<()> {
    run_async_test(async {
        let monitor = Arc::new(FakeMonitor::holding(Duration::from_millis(5)));
        let result = run(&params(100, ExecutionMode::Parallel, Some(10)), monitor.clone()).await?;
        let peak = monitor.peak.load(Ordering::SeqCst);
        if peak > 10 || peak == 0 {
            return Err(AppError::validation(format!("Unexpected peak {}", peak)));
        }
        if result.results.len() != 100 {
            return Err(AppError::validation("Expected 100 results"));
        }
        expect_ids(&monitor, 100)
    })
}

#[test]
fn unbounded_issues_every_request() -> AppResult<()> {
    run_async_test(async {
        let monitor = Arc::new(FakeMonitor::holding(Duration::from_millis(20)));
        run(&params(50, ExecutionMode::Parallel, None), monitor.clone()).await?;
        if monitor.peak.load(Ordering::SeqCst) <= 1 {
            return Err(AppError::validation("Unbounded should overlap requests"));
        }
        expect_ids(&monitor, 50)
    })
}

#[test]
fn cancellation_propagates_without_consolidation() -> AppResult<()> {
    run_async_test(async {
        for connections in [None, Some(3)] {
            let monitor = Arc::new(FakeMonitor {
                cancel_at: Some(3),
                ..FakeMonitor::default()
            });
            let outcome = run(&params(20, ExecutionMode::Parallel, connections), monitor.clone()).await;
            if !matches!(outcome, Err(RunError::Cancelled)) {
                return Err(AppError::validation("Expected cancellation to propagate"));
            }
            if monitor.consolidated.load(Ordering::SeqCst) {
                return Err(AppError::validation("Aborted runs must not consolidate"));
            }
        }
        Ok(())
    })
}

#[test]
fn sequential_delay_races_cancellation() -> AppResult<()> {
    run_async_test(async {
        let monitor = Arc::new(FakeMonitor::default());
        let mut run_params = params(3, ExecutionMode::Sequential, None);
        run_params.delay = Duration::from_secs(30);
        let trigger = run_params.cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let outcome = tokio::time::timeout(Duration::from_secs(5), run(&run_params, monitor.clone()))
            .await
            .map_err(|err| AppError::validation(format!("Delay ignored cancellation: {}", err)))?;
        if !matches!(outcome, Err(RunError::Cancelled)) {
            return Err(AppError::validation("Expected cancellation during delay"));
        }
        if monitor.seen() != vec![1] {
            return Err(AppError::validation("Only the first request should have run"));
        }
        Ok(())
    })
}

#[test]
fn bounded_stops_acquiring_after_cancel() -> AppResult<()> {
    run_async_test(async {
        let monitor = Arc::new(FakeMonitor::holding(Duration::from_secs(30)));
        let run_params = params(10, ExecutionMode::Parallel, Some(2));
        let trigger = run_params.cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });
        let outcome = tokio::time::timeout(Duration::from_secs(5), run(&run_params, monitor.clone()))
            .await
            .map_err(|err| AppError::validation(format!("Permit wait ignored cancellation: {}", err)))?;
        if !matches!(outcome, Err(RunError::Cancelled)) {
            return Err(AppError::validation("Expected cancellation while waiting for a permit"));
        }
        Ok(())
    })
}

fn http_monitor(url: &str, params: &RunParameters) -> AppResult<Arc<dyn Monitor>> {
    let client = build_client(&ProxyConfig::default(), params.timeout)?;
    let recipe = RequestRecipe {
        url: url.to_owned(),
        ..RequestRecipe::default()
    };
    Ok(create_monitor(client, recipe, params, Arc::new(NoopRenderer)))
}

fn sorted_ids(result: &PulseResult) -> Vec<usize> {
    let mut ids: Vec<usize> = result.results.iter().map(|response| response.id).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn bounded_http_run_reports_concurrency_within_limit() -> AppResult<()> {
    run_async_test(async {
        let (url, server) =
            spawn_http_server(|_| Reply::ok("pong").delayed(Duration::from_millis(10)))?;
        let run_params = params(100, ExecutionMode::Parallel, Some(10));
        let monitor = http_monitor(&url, &run_params)?;
        let result = run(&run_params, monitor).await?;

        if result.results.len() != 100 || result.total_completed != 100 {
            return Err(AppError::validation(format!(
                "Expected 100 results, got {}",
                result.results.len()
            )));
        }
        let expected: Vec<usize> = (1..=100).collect();
        if sorted_ids(&result) != expected {
            return Err(AppError::validation("Every id must appear exactly once"));
        }
        let peak = result
            .results
            .iter()
            .map(|response| response.current_concurrent_connections)
            .max()
            .unwrap_or(0);
        if peak == 0 || peak > 10 {
            return Err(AppError::validation(format!(
                "Concurrent connections {} outside 1..=10",
                peak
            )));
        }
        if result.results.iter().any(|response| response.status_code != 200) {
            return Err(AppError::validation("Expected only 200 responses"));
        }
        if server.served() != 100 {
            return Err(AppError::validation(format!(
                "Server saw {} requests",
                server.served()
            )));
        }
        Ok(())
    })
}

#[test]
fn client_timeouts_are_recorded_without_aborting_the_run() -> AppResult<()> {
    run_async_test(async {
        let (url, _server) =
            spawn_http_server(|_| Reply::ok("late").delayed(Duration::from_millis(300)))?;
        let run_params = RunParameters {
            timeout: Some(Duration::from_millis(30)),
            export: false,
            ..params(20, ExecutionMode::Parallel, None)
        };
        let monitor = http_monitor(&url, &run_params)?;
        let result = run(&run_params, monitor).await?;

        let expected: Vec<usize> = (1..=20).collect();
        if sorted_ids(&result) != expected {
            return Err(AppError::validation(format!(
                "Expected ids 1..=20, got {:?}",
                sorted_ids(&result)
            )));
        }
        let timeouts = result
            .results
            .iter()
            .filter(|response| {
                response.status_code == 0
                    && response
                        .exception
                        .as_ref()
                        .is_some_and(|exception| exception.kind == TIMEOUT_EXCEPTION)
            })
            .count();
        if timeouts != 20 {
            return Err(AppError::validation(format!(
                "Expected 20 timeouts, got {}",
                timeouts
            )));
        }
        if result.results.iter().any(|response| response.latency.is_zero()) {
            return Err(AppError::validation("Timed out requests must record latency"));
        }
        Ok(())
    })
}
