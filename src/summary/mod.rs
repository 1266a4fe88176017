//! Post-run statistics, response deduplication and the export decision.
pub mod dedup;
pub mod print;
pub mod stats;


use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::{PulseResult, Response, RunParameters};

use dedup::{ResponseComparer, UniqueResponses};
use stats::{Summary, get_summary};

/// Inputs of the summarizer for one finished run.
#[derive(Debug)]
pub struct PulseSummary<'run> {
    pub result: PulseResult,
    pub parameters: &'run RunParameters,
    pub request_size_bytes: u64,
}

#[derive(Debug)]
pub struct SummaryOutcome {
    pub export_required: bool,
    pub unique_responses: Vec<Response>,
    pub report: SummaryReport,
}

#[derive(Debug)]
pub enum SummaryReport {
    Single(Box<Response>),
    Aggregate(AggregateReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub requests: usize,
    pub total_completed: u64,
    pub peak_concurrent_connections: usize,
    pub total_duration: Duration,
    pub success_rate: f64,
    pub latency: Summary,
    pub content_size: Summary,
    pub throughput_bytes_per_sec: f64,
    pub status_codes: BTreeMap<u16, usize>,
}

impl PulseSummary<'_> {
    #[must_use]
    pub fn summarize(self) -> SummaryOutcome {
        let export = self.parameters.export;
        if let [single] = self.result.results.as_slice() {
            return SummaryOutcome {
                export_required: export,
                unique_responses: vec![single.clone()],
                report: SummaryReport::Single(Box::new(single.clone())),
            };
        }

        let results = &self.result.results;
        let mut status_codes: BTreeMap<u16, usize> = BTreeMap::new();
        let mut peak_concurrent_connections = 0usize;
        let mut latencies = Vec::with_capacity(results.len());
        let mut sizes = Vec::with_capacity(results.len());
        let mut content_bytes: u64 = 0;
        let mut unique = UniqueResponses::new(ResponseComparer::new(self.parameters.use_full_equality));

        for response in results {
            let count = status_codes.entry(response.status_code).or_insert(0);
            *count = count.saturating_add(1);
            peak_concurrent_connections =
                peak_concurrent_connections.max(response.current_concurrent_connections);
            if response.exception.is_none() {
                latencies.push(response.latency_ms());
                sizes.push(response.content_length as f64);
            }
            content_bytes = content_bytes.saturating_add(response.content_length);
            unique.insert(response);
        }

        let latency = get_summary(&mut latencies, true);
        let content_size = get_summary(&mut sizes, true);

        let mut total_bytes = self
            .request_size_bytes
            .saturating_mul(self.result.total_completed);
        if export {
            total_bytes = total_bytes.saturating_add(content_bytes);
        }
        let throughput_bytes_per_sec = throughput(total_bytes, self.result.total_duration);

        tracing::debug!(
            "Summarized {} response(s) into {} unique outcome(s)",
            results.len(),
            unique.len()
        );

        SummaryOutcome {
            export_required: export && !results.is_empty(),
            report: SummaryReport::Aggregate(AggregateReport {
                requests: self.parameters.requests,
                total_completed: self.result.total_completed,
                peak_concurrent_connections,
                total_duration: self.result.total_duration,
                success_rate: self.result.success_rate,
                latency,
                content_size,
                throughput_bytes_per_sec,
                status_codes,
            }),
            unique_responses: unique.into_vec(),
        }
    }
}

/// Bytes per second over `duration`; 0 for an instantaneous run.
#[expect(clippy::float_arithmetic, reason = "bytes per second")]
const fn throughput(total_bytes: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        total_bytes as f64 / seconds
    } else {
        0.0
    }
}
