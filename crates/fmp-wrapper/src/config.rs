//! Client configuration and API key loading.

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use reqwest::Url;

use crate::{Result, error::FmpError, types::OutputFormat};

/// Root of the FMP API, without the version segment.
pub const DEFAULT_API_URL: &str = "https://financialmodelingprep.com/api";

/// API version segment appended to [`DEFAULT_API_URL`].
pub const DEFAULT_API_VERSION: &str = "v3";

/// File the API key is read from by [`ClientConfig::load`].
pub const KEY_FILE_NAME: &str = "fmp_key.txt";

/// Environment variable read by [`ClientConfig::from_env`].
pub const API_KEY_VAR: &str = "FMP_API_KEY";

/// Settings for an [`FmpClient`](crate::FmpClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
    api_version: String,
    api_key: String,
    output: OutputFormat,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("api_key", &"<redacted>")
            .field("output", &self.output)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration for the public API with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::EmptyApiKey`] if the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(FmpError::EmptyApiKey);
        }
        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key,
            output: OutputFormat::default(),
        })
    }

    /// Read the API key from [`KEY_FILE_NAME`] in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds no key.
    pub fn load() -> Result<Self> {
        let dir = env::current_dir().map_err(|source| FmpError::KeyFile {
            path: PathBuf::from(KEY_FILE_NAME),
            source,
        })?;
        Self::from_key_file(dir.join(KEY_FILE_NAME))
    }

    /// Read the API key from a plain-text file. Surrounding whitespace is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds no key.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| FmpError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(contents)
    }

    /// Read the API key from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or empty.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let api_key = env::var(API_KEY_VAR).map_err(|_| FmpError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Point the client at another API root, e.g. a mock server.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Use another API version segment.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the initial output format.
    #[must_use]
    pub const fn with_output_format(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// API root without the version segment.
    #[must_use]
    pub const fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// API version segment.
    #[must_use]
    pub const fn api_version(&self) -> &str {
        self.api_version.as_str()
    }

    /// The API key.
    #[must_use]
    pub const fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    /// Output format new clients start with.
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        self.output
    }

    /// The versioned API root every endpoint path is joined to.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::InvalidBaseUrl`] if the API URL does not parse or
    /// cannot carry path segments.
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| FmpError::InvalidBaseUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| FmpError::InvalidBaseUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push(&self.api_version);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_key_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("fmp-wrapper-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key").unwrap();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.api_version(), "v3");
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://financialmodelingprep.com/api/v3"
        );
    }

    #[test]
    fn test_key_file_is_trimmed() {
        let path = temp_key_file("trim", "  abc123\n");
        let config = ClientConfig::from_key_file(&path).unwrap();
        assert_eq!(config.api_key(), "abc123");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_key_file() {
        let err = ClientConfig::from_key_file("/nonexistent/fmp_key.txt").unwrap_err();
        assert!(matches!(err, FmpError::KeyFile { .. }));
        assert!(err.to_string().contains("/nonexistent/fmp_key.txt"));
    }

    #[test]
    fn test_blank_key_file() {
        let path = temp_key_file("blank", " \n");
        let err = ClientConfig::from_key_file(&path).unwrap_err();
        assert!(matches!(err, FmpError::EmptyApiKey));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::new("k")
            .unwrap()
            .with_api_url("http://127.0.0.1:9000/")
            .with_api_version("v4")
            .with_output_format(OutputFormat::Table);
        assert_eq!(config.output_format(), OutputFormat::Table);
        assert_eq!(config.base_url().unwrap().as_str(), "http://127.0.0.1:9000/v4");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new("k").unwrap().with_api_url("not a url");
        assert!(matches!(config.base_url(), Err(FmpError::InvalidBaseUrl(_))));

        let config = ClientConfig::new("k").unwrap().with_api_url("mailto:x@y.z");
        assert!(matches!(config.base_url(), Err(FmpError::InvalidBaseUrl(_))));
    }
}
