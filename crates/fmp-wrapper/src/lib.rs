#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fmp-wrapper/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial Modeling Prep (FMP) API client.
//!
//! One method per endpoint of the FMP v3 REST API. Each call performs a
//! single blocking GET, decodes the JSON body and returns it either as-is or
//! as a polars [`DataFrame`](polars::prelude::DataFrame).
//!
//! # Usage
//!
//! ```rust,no_run
//! use fmp_wrapper::{FmpClient, OutputFormat, Period};
//!
//! fn main() -> fmp_wrapper::Result<()> {
//!     // Reads the key from ./fmp_key.txt
//!     let mut client = FmpClient::load()?;
//!
//!     let profile = client.profile("AAPL")?;
//!     println!("{:?}", profile.as_json());
//!
//!     client.set_output_format(OutputFormat::Table);
//!     let income = client.financial_statements("AAPL", "income", Period::Annual)?;
//!     println!("{:?}", income.as_table());
//!
//!     Ok(())
//! }
//! ```
//!
//! # API key
//!
//! [`ClientConfig::load`] reads `fmp_key.txt` from the working directory.
//! [`ClientConfig::from_env`] reads `FMP_API_KEY` from the environment or a
//! `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod config;
pub mod endpoint;
mod error;
mod table;
mod transport;
mod types;

pub use client::FmpClient;
pub use config::{API_KEY_VAR, ClientConfig, DEFAULT_API_URL, DEFAULT_API_VERSION, KEY_FILE_NAME};
pub use endpoint::{Endpoint, Params};
pub use error::FmpError;
pub use table::to_table;
pub use transport::{HttpTransport, Transport};
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;

/// The version of the fmp-wrapper crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
