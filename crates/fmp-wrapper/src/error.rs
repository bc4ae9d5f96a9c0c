//! Error types for the FMP API client.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when using the FMP API.
///
/// Variants fall into five groups: configuration (raised while building a
/// [`ClientConfig`](crate::ClientConfig)), validation (raised before any
/// network I/O), transport, decoding, and tabular conversion.
#[derive(Debug, Error)]
pub enum FmpError {
    /// The API key file could not be read.
    #[error("Failed to read API key from {}: {source}", .path.display())]
    KeyFile {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The API key source was present but empty.
    #[error("API key is empty")]
    EmptyApiKey,

    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),

    /// The configured API URL cannot carry path segments.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// Unrecognized financial statement type.
    #[error("Statement type '{given}' is invalid. Use one of: {}", .valid.join(", "))]
    InvalidStatementType {
        /// The rejected input.
        given: String,
        /// Accepted statement type names.
        valid: &'static [&'static str],
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded (HTTP 429)")]
    RateLimitExceeded,

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error message in a successful response that was
    /// requested as a table.
    #[error("FMP API error: {0}")]
    Api(String),

    /// An expected field was absent from the response.
    #[error("Response from {endpoint} has no '{field}' field")]
    MissingField {
        /// Endpoint name.
        endpoint: &'static str,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The response cannot be shaped into a table.
    #[error("Cannot build table: {0}")]
    Table(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
