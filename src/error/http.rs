use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid proxy host '{host}': {source}")]
    InvalidProxy {
        host: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
