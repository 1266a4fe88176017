use thiserror::Error;

/// Failures that abort a whole run instead of being recorded on a single
/// response.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Run cancelled by user request.")]
    Cancelled,
    #[error("Request task failed: {source}")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl RunError {
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled)
    }
}
