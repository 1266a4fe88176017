use std::collections::BTreeMap;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_URL: &str = "https://ipinfo.io/geo";
const DEFAULT_TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
/// ": " plus CRLF around every header line.
const HEADER_LINE_OVERHEAD: usize = 4;

/// Root of a request file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub request: RequestRecipe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    #[serde(default = "default_bypass")]
    pub bypass: bool,
    #[serde(default, rename = "ignoreSSL", alias = "ignoreSsl")]
    pub ignore_ssl: bool,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bypass: default_bypass(),
            ignore_ssl: false,
            host: None,
            username: None,
            password: None,
        }
    }
}

const fn default_bypass() -> bool {
    true
}

/// Immutable template from which every request of a run is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecipe {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default, with = "method_serde")]
    pub method: Method,
    #[serde(default)]
    pub headers: BTreeMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub body: String,
}

impl Default for RequestRecipe {
    fn default() -> Self {
        Self {
            url: default_url(),
            method: Method::GET,
            headers: BTreeMap::new(),
            content: None,
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_owned()
}

impl RequestRecipe {
    /// Builds a fresh request; header errors surface here.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL, a header name or a header value is invalid.
    pub fn build_request(&self, client: &reqwest::Client) -> Result<reqwest::Request, reqwest::Error> {
        let mut builder = client.request(self.method.clone(), self.url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_deref().unwrap_or_default());
        }
        if let Some(content) = &self.content {
            let has_explicit_type = self
                .headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !has_explicit_type {
                builder = builder.header(
                    CONTENT_TYPE,
                    content
                        .content_type
                        .as_deref()
                        .unwrap_or(DEFAULT_TEXT_CONTENT_TYPE),
                );
            }
            builder = builder.body(content.body.clone());
        }
        builder.build()
    }

    /// Approximate bytes one request puts on the wire.
    #[must_use]
    pub fn request_size_bytes(&self) -> u64 {
        let headers: usize = self
            .headers
            .iter()
            .map(|(name, value)| {
                name.len()
                    .saturating_add(value.as_deref().map_or(0, str::len))
                    .saturating_add(HEADER_LINE_OVERHEAD)
            })
            .sum();
        let body = self.content.as_ref().map_or(0, |content| {
            content.body.len().saturating_add(
                content
                    .content_type
                    .as_deref()
                    .map_or(0, str::len),
            )
        });
        let total = self
            .method
            .as_str()
            .len()
            .saturating_add(self.url.len())
            .saturating_add(headers)
            .saturating_add(body);
        u64::try_from(total).unwrap_or(u64::MAX)
    }
}

mod method_serde {
    use reqwest::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(method: &Method, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(method.as_str())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Method, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())
            .map_err(|err| serde::de::Error::custom(format!("invalid method '{raw}': {err}")))
    }
}
