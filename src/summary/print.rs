use std::io::{IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::domain::Response;
use crate::system::palette::{Segment, percentage_color, plain_text, status_color};

use super::stats::Summary;
use super::{AggregateReport, SummaryReport};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Writes the report to stdout, colored only on a terminal.
///
/// # Errors
///
/// Returns an error when stdout cannot be written.
pub fn print_report(report: &SummaryReport) -> Result<(), std::io::Error> {
    let lines = report_lines(report);
    let use_color = std::io::stdout().is_terminal();
    let mut out = std::io::stdout().lock();
    queue!(out, Print("\n"))?;
    for line in &lines {
        for segment in line {
            match segment.color {
                Some(color) if use_color => queue!(
                    out,
                    SetForegroundColor(color),
                    Print(&segment.text),
                    ResetColor
                )?,
                Some(_) | None => queue!(out, Print(&segment.text))?,
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

/// Plain-text rendering of the report, one entry per line.
#[must_use]
pub fn report_text(report: &SummaryReport) -> Vec<String> {
    report_lines(report)
        .iter()
        .map(|line| plain_text(line))
        .collect()
}

fn report_lines(report: &SummaryReport) -> Vec<Vec<Segment>> {
    match report {
        SummaryReport::Single(response) => single_lines(response),
        SummaryReport::Aggregate(report) => aggregate_lines(report),
    }
}

fn single_lines(response: &Response) -> Vec<Vec<Segment>> {
    let mut lines = vec![
        vec![Segment::colored("Summary:", Color::Green)],
        vec![
            Segment::plain("Request id: "),
            Segment::colored(response.id.to_string(), Color::Yellow),
        ],
        vec![
            Segment::plain("Status code: "),
            Segment::colored(
                response.status_code.to_string(),
                status_color(response.status_code),
            ),
        ],
        vec![
            Segment::plain("Latency: "),
            Segment::colored(format_millis(response.latency_ms()), Color::Yellow),
        ],
        vec![
            Segment::plain("Content length: "),
            Segment::colored(format_bytes(response.content_length as f64), Color::Yellow),
        ],
    ];
    if let Some(exception) = response.exception.as_ref() {
        lines.push(vec![
            Segment::plain("Exception type: "),
            Segment::colored(exception.kind.clone(), Color::Yellow),
        ]);
        lines.push(vec![
            Segment::plain("Message: "),
            Segment::colored(exception.to_string(), Color::Red),
        ]);
    }
    lines
}

fn aggregate_lines(report: &AggregateReport) -> Vec<Vec<Segment>> {
    let mut lines = vec![
        vec![Segment::colored("Summary:", Color::Green)],
        vec![
            Segment::plain("Request count: "),
            Segment::colored(report.requests.to_string(), Color::Yellow),
        ],
        vec![
            Segment::plain("Concurrent connections: "),
            Segment::colored(report.peak_concurrent_connections.to_string(), Color::Yellow),
        ],
        vec![
            Segment::plain("Total duration: "),
            Segment::colored(format_duration(report.total_duration), Color::Yellow),
        ],
        vec![
            Segment::plain("Success rate: "),
            Segment::colored(
                format!("{}%", report.success_rate),
                percentage_color(report.success_rate),
            ),
        ],
        summary_line("Latency:          ", &report.latency, format_millis),
        summary_line("Content Size:     ", &report.content_size, format_bytes),
        vec![
            Segment::plain("Total throughput: "),
            Segment::colored(
                format!("{}/s", format_bytes(report.throughput_bytes_per_sec)),
                Color::Yellow,
            ),
        ],
        vec![Segment::plain("Status codes:")],
    ];
    for (code, count) in &report.status_codes {
        lines.push(vec![
            Segment::colored(format!("{code:>5}"), status_color(*code)),
            Segment::plain(format!(" --> {count}")),
        ]);
    }
    lines
}

fn summary_line(label: &str, summary: &Summary, format: fn(f64) -> String) -> Vec<Segment> {
    let mut line = vec![
        Segment::plain(label),
        Segment::plain("Min: "),
        Segment::colored(format(summary.min), Color::Cyan),
        Segment::plain(", Mean: "),
        Segment::colored(format(summary.mean), Color::Yellow),
        Segment::plain(", Max: "),
        Segment::colored(format(summary.max), Color::Red),
    ];
    if summary.removed > 0 {
        line.push(Segment::plain(", Removed: "));
        line.push(Segment::colored(summary.removed.to_string(), Color::Yellow));
    }
    line
}

#[must_use]
pub fn format_millis(millis: f64) -> String {
    format!("{millis:.2}ms")
}

#[must_use]
#[expect(clippy::float_arithmetic, reason = "seconds to milliseconds")]
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_secs_f64() * 1000.0;
    if millis < 1000.0 {
        format_millis(millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Formats a byte count with binary unit prefixes.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "scaling by binary unit prefixes")]
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes.max(0.0);
    let mut unit = BYTE_UNITS.first().copied().unwrap_or("B");
    for next in BYTE_UNITS.iter().skip(1) {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    if unit == "B" {
        format!("{value:.0} {unit}")
    } else {
        format!("{value:.2} {unit}")
    }
}
