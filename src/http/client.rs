use std::time::Duration;

use reqwest::{Client, Proxy};
use tracing::{debug, error};

use crate::config::ProxyConfig;
use crate::error::{AppError, AppResult, HttpError};

pub const DEFAULT_USER_AGENT: &str = concat!("pulse/", env!("CARGO_PKG_VERSION"));

/// Proxy the client will route through, after bypass and blank-host rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    pub host: String,
    pub credentials: Option<(String, String)>,
}

#[must_use]
pub fn resolve_proxy(proxy: &ProxyConfig) -> Option<ProxyTarget> {
    if proxy.bypass {
        return None;
    }
    let host = proxy.host.as_deref().map(str::trim).filter(|host| !host.is_empty())?;
    let credentials = match (proxy.username.as_deref(), proxy.password.as_deref()) {
        (Some(username), Some(password))
            if !username.trim().is_empty() && !password.trim().is_empty() =>
        {
            Some((username.to_owned(), password.to_owned()))
        }
        (Some(_) | None, Some(_) | None) => None,
    };
    Some(ProxyTarget {
        host: host.to_owned(),
        credentials,
    })
}

/// Builds the one pooled client shared by every request of a run.
///
/// # Errors
///
/// Returns an error when the proxy host is not a valid URL or the TLS
/// backend cannot be initialized.
pub fn build_client(proxy: &ProxyConfig, timeout: Option<Duration>) -> AppResult<Client> {
    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);

    if let Some(timeout) = timeout {
        client_builder = client_builder.timeout(timeout);
    }

    if proxy.ignore_ssl {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    match resolve_proxy(proxy) {
        Some(target) => {
            let mut reqwest_proxy = Proxy::all(target.host.as_str()).map_err(|err| {
                error!("Invalid proxy host '{}': {}", target.host, err);
                AppError::http(HttpError::InvalidProxy {
                    host: target.host.clone(),
                    source: err,
                })
            })?;
            if let Some((username, password)) = target.credentials.as_ref() {
                reqwest_proxy = reqwest_proxy.basic_auth(username, password);
            }
            debug!("Routing requests through proxy {}", target.host);
            client_builder = client_builder.proxy(reqwest_proxy);
        }
        None => {
            client_builder = client_builder.no_proxy();
        }
    }

    client_builder.build().map_err(|err| {
        error!("Failed to build HTTP client: {}", err);
        AppError::http(HttpError::BuildClientFailed { source: err })
    })
}
