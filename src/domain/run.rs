use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Default output folder for exported responses.
pub const DEFAULT_OUTPUT_FOLDER: &str = "results";
/// Concurrency limit reported when the user did not bound connections.
pub const DEFAULT_MAX_CONNECTIONS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Parallel,
}

impl ExecutionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

/// Run-wide abort signal. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once `cancel` has been called; never resolves otherwise.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Immutable parameters of one run.
#[derive(Debug, Clone)]
pub struct RunParameters {
    pub requests: usize,
    pub execution_mode: ExecutionMode,
    pub max_connections: Option<NonZeroUsize>,
    pub delay: Duration,
    pub timeout: Option<Duration>,
    pub export: bool,
    pub use_full_equality: bool,
    pub format_json: bool,
    pub verbose: bool,
    pub output_folder: PathBuf,
    pub cancellation: CancellationSignal,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            requests: 1,
            execution_mode: ExecutionMode::Parallel,
            max_connections: None,
            delay: Duration::ZERO,
            timeout: None,
            export: true,
            use_full_equality: false,
            format_json: false,
            verbose: false,
            output_folder: PathBuf::from(DEFAULT_OUTPUT_FOLDER),
            cancellation: CancellationSignal::new(),
        }
    }
}

impl RunParameters {
    #[must_use]
    pub fn max_connections(&self) -> usize {
        self.max_connections
            .map_or(DEFAULT_MAX_CONNECTIONS, NonZeroUsize::get)
    }

    #[must_use]
    pub const fn max_connections_modified(&self) -> bool {
        self.max_connections.is_some()
    }
}
