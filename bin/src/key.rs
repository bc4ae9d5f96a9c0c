//! API key resolution for the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use fmp_wrapper::{ClientConfig, KEY_FILE_NAME};

/// Build the client configuration from the first available key source.
///
/// Order: an explicit `--key-file`, then `fmp_key.txt` in the working
/// directory, then `FMP_API_KEY` (environment or `.env`).
pub(crate) fn resolve_config(key_file: Option<&Path>) -> Result<ClientConfig> {
    if let Some(path) = key_file {
        return ClientConfig::from_key_file(path)
            .with_context(|| format!("loading API key from {}", path.display()));
    }

    if Path::new(KEY_FILE_NAME).is_file() {
        tracing::debug!(file = KEY_FILE_NAME, "using key file from working directory");
        return ClientConfig::load().context("loading API key");
    }

    ClientConfig::from_env()
        .with_context(|| format!("no --key-file given and no {KEY_FILE_NAME} found"))
}
