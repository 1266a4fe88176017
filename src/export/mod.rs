//! Writes one file per unique response into the output folder.
pub mod html;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use reqwest::header::HeaderMap;
use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

use crate::domain::{ExceptionInfo, Response};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExceptionDocument<'response> {
    status_code: u16,
    headers: BTreeMap<String, Vec<String>>,
    exception: &'response ExceptionInfo,
}

/// Removes every regular file in `dir`, creating it when missing.
///
/// # Errors
///
/// Returns an error when the folder cannot be created, listed or cleaned.
pub async fn clear_files(dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(dir).await?;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file()
            && let Err(err) = tokio::fs::remove_file(entry.path()).await
            && err.kind() != std::io::ErrorKind::NotFound
        {
            return Err(err);
        }
    }
    Ok(())
}

#[must_use]
pub fn file_name(id: usize, status_code: u16, extension: &str) -> String {
    format!("response-{id}-status-code-{status_code}.{extension}")
}

/// Exports every response; a file that fails to write is logged and skipped.
///
/// # Errors
///
/// Returns an error when the output folder cannot be created.
pub async fn export_unique_responses(
    dir: &Path,
    responses: &[Response],
    format_json: bool,
) -> Result<usize, std::io::Error> {
    tokio::fs::create_dir_all(dir).await?;
    let mut written = 0usize;
    for response in responses {
        match export_response(dir, response, format_json).await {
            Ok(path) => {
                tracing::debug!("Exported response {} to {}", response.id, path.display());
                written = written.saturating_add(1);
            }
            Err(err) => warn!("Failed to export response {}: {}", response.id, err),
        }
    }
    info!(
        "Exported {} unique response(s) to {}",
        written,
        dir.display()
    );
    Ok(written)
}

/// Writes a single response and returns the path written.
///
/// # Errors
///
/// Returns an error when the file cannot be created or serialized.
pub async fn export_response(
    dir: &Path,
    response: &Response,
    format_json: bool,
) -> Result<PathBuf, std::io::Error> {
    let (extension, payload) = render_response(response, format_json)?;
    let path = dir.join(file_name(response.id, response.status_code, extension));
    let file = tokio::fs::File::create(&path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(payload.as_bytes()).await?;
    writer.flush().await?;
    Ok(path)
}

fn render_response(
    response: &Response,
    format_json: bool,
) -> Result<(&'static str, String), std::io::Error> {
    if let Some(exception) = response.exception.as_ref() {
        let document = ExceptionDocument {
            status_code: response.status_code,
            headers: headers_to_map(&response.headers),
            exception,
        };
        let json = serde_json::to_string_pretty(&document).map_err(std::io::Error::other)?;
        return Ok(("json", json));
    }

    if format_json
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(&response.content)
    {
        let json = serde_json::to_string_pretty(&value).map_err(std::io::Error::other)?;
        return Ok(("json", json));
    }

    Ok((
        "html",
        html::render_page(
            response.id,
            response.status_code,
            &response.headers,
            &response.content,
        ),
    ))
}

fn headers_to_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
