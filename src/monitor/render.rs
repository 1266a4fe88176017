use std::io::{IsTerminal, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::system::palette::{Segment, percentage_color, plain_text, status_color};

use super::counters::{CounterSnapshot, STATUS_BUCKETS};

/// Live progress of a run as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: u64,
    pub total: usize,
    pub success_rate: f64,
    pub eta: Option<Duration>,
    pub buckets: [u64; STATUS_BUCKETS],
}

impl ProgressSnapshot {
    #[must_use]
    pub const fn initial(total: usize) -> Self {
        Self {
            completed: 0,
            total,
            success_rate: 0.0,
            eta: None,
            buckets: [0; STATUS_BUCKETS],
        }
    }

    #[must_use]
    pub fn from_counters(counters: &CounterSnapshot, total: usize, elapsed: Duration) -> Self {
        let completed = counters.completed;
        let remaining = u64::try_from(total)
            .unwrap_or(u64::MAX)
            .saturating_sub(completed);
        let eta = estimate_eta(elapsed, completed, remaining);
        Self {
            completed,
            total,
            success_rate: crate::domain::result::success_rate(counters.successes(), completed),
            eta,
            buckets: counters.buckets,
        }
    }
}

/// Remaining time if the observed mean pace per request holds.
#[expect(clippy::float_arithmetic, reason = "pace extrapolation")]
fn estimate_eta(elapsed: Duration, completed: u64, remaining: u64) -> Option<Duration> {
    if completed == 0 {
        return None;
    }
    let per_request = elapsed.as_secs_f64() / completed as f64;
    Some(Duration::try_from_secs_f64(per_request * remaining as f64).unwrap_or(Duration::MAX))
}

/// Sink for the live view of a run.
pub trait LiveRenderer: Send + Sync {
    fn progress(&self, snapshot: &ProgressSnapshot);
    fn request_sent(&self, id: usize);
    fn response_received(&self, id: usize, status_code: u16);
    fn finish(&self);
}

#[derive(Debug, Default)]
pub struct NoopRenderer;

impl LiveRenderer for NoopRenderer {
    fn progress(&self, _snapshot: &ProgressSnapshot) {}
    fn request_sent(&self, _id: usize) {}
    fn response_received(&self, _id: usize, _status_code: u16) {}
    fn finish(&self) {}
}

#[derive(Debug, Default)]
struct TerminalState {
    last_completed: Option<u64>,
    drawn: bool,
}

/// Renders to stderr. Progress lines are redrawn in place and only when
/// stderr is a terminal.
#[derive(Debug)]
pub struct TerminalRenderer {
    state: Mutex<TerminalState>,
    interactive: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TerminalState::default()),
            interactive: std::io::stderr().is_terminal(),
        }
    }

    fn draw(&self, segments: &[Vec<Segment>]) -> Result<(), std::io::Error> {
        let mut out = std::io::stderr().lock();
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        for (index, line) in segments.iter().enumerate() {
            if index > 0 {
                queue!(out, Print("\n"))?;
            }
            for segment in line {
                match segment.color {
                    Some(color) => queue!(
                        out,
                        SetForegroundColor(color),
                        Print(&segment.text),
                        ResetColor
                    )?,
                    None => queue!(out, Print(&segment.text))?,
                }
            }
        }
        let up = u16::try_from(segments.len().saturating_sub(1)).unwrap_or(0);
        if up > 0 {
            queue!(out, cursor::MoveUp(up))?;
        }
        queue!(out, cursor::MoveToColumn(0))?;
        out.flush()
    }
}

impl LiveRenderer for TerminalRenderer {
    fn progress(&self, snapshot: &ProgressSnapshot) {
        if !self.interactive {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state
            .last_completed
            .is_some_and(|last| last > snapshot.completed)
        {
            return;
        }
        state.last_completed = Some(snapshot.completed);
        state.drawn = true;
        if let Err(err) = self.draw(&progress_segments(snapshot)) {
            tracing::debug!("Failed to render progress: {}", err);
        }
    }

    fn request_sent(&self, id: usize) {
        let _state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        eprintln!("Sending request id: {id}");
    }

    fn response_received(&self, id: usize, status_code: u16) {
        let _state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.interactive {
            let mut out = std::io::stderr().lock();
            let written = queue!(
                out,
                Print(format!("Received response id: {id}, status code: ")),
                SetForegroundColor(status_color(status_code)),
                Print(status_code),
                ResetColor,
                Print("\n")
            )
            .and_then(|()| out.flush());
            if let Err(err) = written {
                tracing::debug!("Failed to render response line: {}", err);
            }
        } else {
            eprintln!("Received response id: {id}, status code: {status_code}");
        }
    }

    fn finish(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.drawn {
            eprint!("\n\n");
            state.drawn = false;
        }
    }
}

const BUCKET_LABELS: [(&str, u16); STATUS_BUCKETS] = [
    ("1xx: ", 100),
    (", 2xx: ", 200),
    (", 3xx: ", 300),
    (", 4xx: ", 400),
    (", 5xx: ", 500),
    (", others: ", 0),
];

pub(crate) fn progress_segments(snapshot: &ProgressSnapshot) -> Vec<Vec<Segment>> {
    let eta = snapshot.eta.map_or_else(|| "NaN".to_owned(), format_eta);
    let first = vec![
        Segment::plain("Completed: "),
        Segment::colored(snapshot.completed.to_string(), Color::Yellow),
        Segment::plain("/"),
        Segment::colored(snapshot.total.to_string(), Color::Yellow),
        Segment::plain(", SR: "),
        Segment::colored(
            format!("{}%", snapshot.success_rate),
            percentage_color(snapshot.success_rate),
        ),
        Segment::plain(", ETA: "),
        Segment::colored(eta, Color::Yellow),
    ];

    let mut second = Vec::with_capacity(STATUS_BUCKETS.saturating_mul(2));
    for (label, representative) in BUCKET_LABELS {
        let count = snapshot
            .buckets
            .get(super::counters::bucket_index(representative))
            .copied()
            .unwrap_or(0);
        second.push(Segment::plain(label));
        second.push(Segment::colored(count.to_string(), status_color(representative)));
    }
    vec![first, second]
}

/// Plain-text rendering of the progress lines.
#[must_use]
pub fn progress_lines(snapshot: &ProgressSnapshot) -> Vec<String> {
    progress_segments(snapshot)
        .into_iter()
        .map(|line| plain_text(&line))
        .collect()
}

#[must_use]
pub fn format_eta(eta: Duration) -> String {
    let total_secs = eta.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, _) => format!("{minutes}m {seconds}s"),
        _ => format!("{hours}h {minutes}m {seconds}s"),
    }
}
