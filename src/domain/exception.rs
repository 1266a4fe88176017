use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on nested `inner` records kept or displayed.
pub const MAX_EXCEPTION_DEPTH: usize = 8;

pub const TIMEOUT_EXCEPTION: &str = "TimeoutException";
pub const REQUEST_BUILD_ERROR: &str = "RequestBuildError";

/// Serializable snapshot of a request failure and its cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<ExceptionInfo>>,
}

impl ExceptionInfo {
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            detail: None,
            inner: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn timeout(id: usize, elapsed_ms: u128) -> Self {
        Self::new(
            TIMEOUT_EXCEPTION,
            format!("Request {id} timeout after {elapsed_ms} ms"),
        )
    }

    /// Classifies a transport error and captures its `source()` chain.
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let kind = if error.is_connect() {
            "ConnectError"
        } else if error.is_redirect() {
            "RedirectError"
        } else if error.is_body() {
            "BodyError"
        } else if error.is_decode() {
            "DecodeError"
        } else if error.is_request() {
            "RequestError"
        } else {
            "HttpRequestException"
        };

        let detail = match (error.url(), error.status()) {
            (Some(url), Some(status)) => Some(format!("url: {url}, status: {status}")),
            (Some(url), None) => Some(format!("url: {url}")),
            (None, Some(status)) => Some(format!("status: {status}")),
            (None, None) => None,
        };

        Self {
            kind: kind.to_owned(),
            message: error.to_string(),
            detail,
            inner: error
                .source()
                .map(|source| Box::new(Self::from_source(source, 1))),
        }
    }

    fn from_source(error: &(dyn StdError + 'static), depth: usize) -> Self {
        let mut info = if let Some(io) = error.downcast_ref::<std::io::Error>() {
            let detail = io.raw_os_error().map_or_else(
                || format!("kind: {:?}", io.kind()),
                |code| format!("kind: {:?}, os error: {code}", io.kind()),
            );
            Self::new("IoError", io.to_string()).with_detail(detail)
        } else if let Some(inner) = error.downcast_ref::<reqwest::Error>() {
            let mut info = Self::from_reqwest(inner);
            info.inner = None;
            info
        } else {
            Self::new("Error", error.to_string())
        };

        if depth < MAX_EXCEPTION_DEPTH
            && let Some(source) = error.source()
        {
            info.inner = Some(Box::new(Self::from_source(source, depth.saturating_add(1))));
        }
        info
    }

    /// Number of records in the chain, this one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1usize;
        let mut current = self.inner.as_deref();
        while let Some(next) = current {
            depth = depth.saturating_add(1);
            current = next.inner.as_deref();
        }
        depth
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        let mut current = self.inner.as_deref();
        let mut depth = 1usize;
        while let Some(inner) = current {
            if depth >= MAX_EXCEPTION_DEPTH {
                write!(f, " ---> ...")?;
                break;
            }
            write!(f, " ---> {}: {}", inner.kind, inner.message)?;
            current = inner.inner.as_deref();
            depth = depth.saturating_add(1);
        }
        Ok(())
    }
}
