//! Blocking HTTP transport.

use std::time::Duration;

use reqwest::{StatusCode, Url, blocking::Client};

use crate::{Result, error::FmpError};

/// Issues a GET and hands back the body of a successful response.
///
/// [`FmpClient`](crate::FmpClient) is generic over this trait so the network
/// layer can be replaced, e.g. by a recording mock in tests.
pub trait Transport {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    fn get(&self, url: &Url) -> Result<String>;
}

/// [`Transport`] over a `reqwest` blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create a transport with `reqwest`'s default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FmpError::Status { status, body });
        }

        Ok(response.text()?)
    }
}
