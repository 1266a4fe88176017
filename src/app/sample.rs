use std::path::Path;

use crate::config::RequestDetails;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

/// Writes the default request file to `path`.
pub(crate) async fn write_sample(path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(&RequestDetails::default())
        .map_err(|source| AppError::validation(ValidationError::SerializeConfiguration { source }))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| {
            AppError::config(ConfigError::WriteSample {
                path: path.to_path_buf(),
                source,
            })
        })?;
    println!("Sample request file written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::write_sample;
    use crate::config::{RequestDetails, load_request_details};
    use crate::error::{AppError, AppResult, ConfigError};

    fn run<F: Future<Output = AppResult<()>>>(future: F) -> AppResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(future)
    }

    #[test]
    fn sample_round_trips_through_loader() -> AppResult<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sample.json");
        run(write_sample(&path))?;
        let loaded = load_request_details(&path)?;
        let expected = RequestDetails::default();
        if loaded.request != expected.request || loaded.proxy != expected.proxy {
            return Err(AppError::validation("Sample did not load back to defaults"));
        }
        Ok(())
    }

    #[test]
    fn sample_into_missing_folder_fails() -> AppResult<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missing").join("sample.json");
        match run(write_sample(&path)) {
            Err(AppError::Config(ConfigError::WriteSample { .. })) => Ok(()),
            Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
            Ok(()) => Err(AppError::validation("Expected write failure")),
        }
    }
}
