use std::path::Path;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::{RequestDetails, RequestRecipe};

/// Reads a request file, choosing the format from its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed or validated.
pub fn load_request_details(path: &Path) -> AppResult<RequestDetails> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadRequestFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let details: RequestDetails = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("json") | None => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some(ext) => {
            return Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
    };
    tracing::debug!("Loaded request file {}", path.display());
    Ok(details)
}

/// Rejects recipes that could never produce a valid request.
///
/// # Errors
///
/// Returns an error for an unparsable URL or a malformed header.
pub fn validate_request(recipe: &RequestRecipe) -> AppResult<()> {
    url::Url::parse(&recipe.url).map_err(|err| {
        AppError::config(ConfigError::InvalidUrl {
            url: recipe.url.clone(),
            source: err,
        })
    })?;
    for (name, value) in &recipe.headers {
        let valid_name = HeaderName::from_bytes(name.as_bytes()).is_ok();
        let valid_value = HeaderValue::from_str(value.as_deref().unwrap_or_default()).is_ok();
        if !valid_name || !valid_value {
            return Err(AppError::config(ConfigError::InvalidHeader { name: name.clone() }));
        }
    }
    Ok(())
}
