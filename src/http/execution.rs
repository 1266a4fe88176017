use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_LENGTH;
use tokio::time::Instant;
use tracing::debug;

use crate::config::RequestRecipe;
use crate::domain::exception::REQUEST_BUILD_ERROR;
use crate::domain::{CancellationSignal, ExceptionInfo, Response};
use crate::error::RunError;

/// Counts a request as in flight until dropped.
struct InflightGuard<'counter> {
    counter: &'counter AtomicUsize,
    snapshot: usize,
}

impl<'counter> InflightGuard<'counter> {
    fn acquire(counter: &'counter AtomicUsize) -> Self {
        let snapshot = counter.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        Self { counter, snapshot }
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        loop {
            let current = self.counter.load(Ordering::Acquire);
            let Some(next) = current.checked_sub(1) else {
                break;
            };
            if self
                .counter
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                break;
            }
        }
    }
}

/// Shared state for executing requests of one run.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    in_flight: AtomicUsize,
}

impl ExecutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Sends one request built from `recipe` and records its outcome.
    ///
    /// Transport failures and timeouts are recorded on the returned
    /// [`Response`]; only run-wide cancellation is an error.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Cancelled`] when `cancellation` fires before the
    /// request completes or while it is failing.
    pub async fn send(
        &self,
        id: usize,
        recipe: &RequestRecipe,
        client: &Client,
        save_content: bool,
        cancellation: &CancellationSignal,
    ) -> Result<Response, RunError> {
        let request = match recipe.build_request(client) {
            Ok(request) => request,
            Err(err) => {
                let mut info = ExceptionInfo::from_reqwest(&err);
                info.kind = REQUEST_BUILD_ERROR.to_owned();
                debug!("Request {} could not be built: {}", id, err);
                return Ok(Response::failed(id, info, Duration::ZERO, self.in_flight()));
            }
        };

        let start = Instant::now();
        let guard = InflightGuard::acquire(&self.in_flight);
        let concurrent = guard.snapshot;
        let outcome = tokio::select! {
            () = cancellation.cancelled() => return Err(RunError::Cancelled),
            result = client.execute(request) => result,
        };
        drop(guard);

        let response = match outcome {
            Ok(response) => response,
            Err(err) => return record_failure(id, &err, start.elapsed(), concurrent, cancellation),
        };

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let declared_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let header_latency = start.elapsed();

        let body = tokio::select! {
            () = cancellation.cancelled() => return Err(RunError::Cancelled),
            body = read_body(response, save_content) => body,
        };
        let (content, measured_length) = match body {
            Ok(body) => body,
            Err(err) => return record_failure(id, &err, start.elapsed(), concurrent, cancellation),
        };
        let latency = if save_content {
            start.elapsed()
        } else {
            header_latency
        };

        debug!(
            "Request {} completed with status {} in {} ms",
            id,
            status_code,
            latency.as_millis()
        );
        Ok(Response {
            id,
            status_code,
            headers,
            content,
            content_length: declared_length.unwrap_or(measured_length),
            latency,
            exception: None,
            current_concurrent_connections: concurrent,
        })
    }
}

/// Decides whether an interrupted request is a recorded timeout or a run abort.
///
/// # Errors
///
/// Returns [`RunError::Cancelled`] when the run-wide signal is set.
pub fn classify_interruption(
    id: usize,
    elapsed: Duration,
    cancellation: &CancellationSignal,
) -> Result<ExceptionInfo, RunError> {
    if cancellation.is_cancelled() {
        return Err(RunError::Cancelled);
    }
    Ok(ExceptionInfo::timeout(id, elapsed.as_millis()))
}

fn record_failure(
    id: usize,
    err: &reqwest::Error,
    elapsed: Duration,
    concurrent: usize,
    cancellation: &CancellationSignal,
) -> Result<Response, RunError> {
    let info = if err.is_timeout() || cancellation.is_cancelled() {
        classify_interruption(id, elapsed, cancellation)?
    } else {
        ExceptionInfo::from_reqwest(err)
    };
    debug!("Request {} failed: {}", id, info);
    Ok(Response::failed(id, info, elapsed, concurrent))
}

async fn read_body(
    response: reqwest::Response,
    save_content: bool,
) -> Result<(String, u64), reqwest::Error> {
    if save_content {
        let content = response.text().await?;
        let length = u64::try_from(content.len()).unwrap_or(u64::MAX);
        return Ok((content, length));
    }
    Ok((String::new(), drain_response_body(response).await?))
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
