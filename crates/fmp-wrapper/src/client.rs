//! FMP API client implementation.

use reqwest::Url;
use serde_json::Value;

use crate::{
    Result,
    config::ClientConfig,
    endpoint::{self, Endpoint, Params},
    error::FmpError,
    table::to_table,
    transport::{HttpTransport, Transport},
    types::{OutputFormat, Period, Response, StatementType},
};

/// Financial Modeling Prep API client.
///
/// Every endpoint method builds its URL, performs one blocking GET through
/// the [`Transport`], decodes the JSON body and returns it as a [`Response`]
/// shaped by the current [`OutputFormat`].
#[derive(Debug, Clone)]
pub struct FmpClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    base_url: Url,
    output: OutputFormat,
}

impl FmpClient<HttpTransport> {
    /// Create a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API URL is unusable.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Create a client with the key stored in `fmp_key.txt` in the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key file cannot be read.
    pub fn load() -> Result<Self> {
        Self::new(ClientConfig::load()?)
    }

    /// Create a client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> FmpClient<T> {
    /// Create a client that sends its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API URL is unusable.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let base_url = config.base_url()?;
        Ok(Self {
            transport,
            output: config.output_format(),
            config,
            base_url,
        })
    }

    /// The configuration the client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Output format used by the next call.
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        self.output
    }

    /// Switch between JSON and tabular output.
    pub const fn set_output_format(&mut self, output: OutputFormat) {
        self.output = output;
    }

    /// The URL a call to `endpoint` with `params` would request, API key
    /// included.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint needs a statement type and `params`
    /// has none.
    pub fn url_for(&self, endpoint: &Endpoint, params: &Params) -> Result<Url> {
        endpoint.url(&self.base_url, self.config.api_key(), params)
    }

    /// Fetch `endpoint` and route the decoded body.
    ///
    /// The endpoint's sub-field, if any, is extracted before the output
    /// format is applied, so JSON and tabular output carry the same records.
    /// In JSON mode a 2xx `{"Error Message": ...}` body is handed back as
    /// decoded; only tabular mode turns it into [`FmpError::Api`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not JSON, the
    /// sub-field is missing, or the table cannot be built.
    pub fn request(&self, endpoint: &Endpoint, params: &Params) -> Result<Response> {
        let url = self.url_for(endpoint, params)?;
        tracing::debug!(
            endpoint = endpoint.name,
            symbol = %params.symbol,
            period = endpoint.periodic.then_some(params.period.as_str()),
            "requesting"
        );

        let body = self.transport.get(&url)?;
        let value: Value = serde_json::from_str(&body)?;

        match self.output {
            OutputFormat::Json => Ok(Response::Json(endpoint.extract(value)?)),
            OutputFormat::Table => {
                if let Some(message) = api_error_message(&value) {
                    return Err(FmpError::Api(message.to_string()));
                }
                let data = endpoint.extract(value)?;
                Ok(Response::Table(to_table(&data)?))
            }
        }
    }

    /// Get a company's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn profile(&self, symbol: &str) -> Result<Response> {
        self.request(&endpoint::PROFILE, &Params::symbol(symbol))
    }

    /// Get real-time quotes for any number of symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn quote<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Response> {
        self.request(&endpoint::QUOTE, &Params::symbols(symbols))
    }

    /// Get a company's financial statements.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `statement` - `income`, `balance-sheet` or `cash-flow`
    /// * `period` - Annual or quarterly
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::InvalidStatementType`] without touching the
    /// network if `statement` is not recognized, otherwise an error if the
    /// API request fails or the response has no `financials` field.
    pub fn financial_statements(
        &self,
        symbol: &str,
        statement: &str,
        period: Period,
    ) -> Result<Response> {
        let statement: StatementType = statement.parse()?;
        let params = Params::symbol(symbol)
            .with_period(period)
            .with_statement(statement);
        self.request(&endpoint::FINANCIAL_STATEMENTS, &params)
    }

    /// Get the daily price history of a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response has no
    /// `historical` field.
    pub fn price_history(&self, symbol: &str) -> Result<Response> {
        self.request(&endpoint::PRICE_HISTORY, &Params::symbol(symbol))
    }

    /// Get financial ratios for any number of symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn financial_ratios<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Response> {
        self.request(&endpoint::FINANCIAL_RATIOS, &Params::symbols(symbols))
    }

    /// Get enterprise value history.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn enterprise_value(&self, symbol: &str, period: Period) -> Result<Response> {
        let params = Params::symbol(symbol).with_period(period);
        self.request(&endpoint::ENTERPRISE_VALUE, &params)
    }

    /// Get key metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn key_metrics(&self, symbol: &str, period: Period) -> Result<Response> {
        let params = Params::symbol(symbol).with_period(period);
        self.request(&endpoint::KEY_METRICS, &params)
    }

    /// Get financial statement growth.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn financial_growth(&self, symbol: &str, period: Period) -> Result<Response> {
        let params = Params::symbol(symbol).with_period(period);
        self.request(&endpoint::FINANCIAL_GROWTH, &params)
    }

    /// Get a company's rating.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn company_rating(&self, symbol: &str) -> Result<Response> {
        self.request(&endpoint::COMPANY_RATING, &Params::symbol(symbol))
    }

    /// Get the discounted cash flow valuation.
    ///
    /// With `historical` unset this is the current valuation and `period` is
    /// ignored; otherwise the per-period history is fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub fn discounted_cash_flow(
        &self,
        symbol: &str,
        period: Period,
        historical: bool,
    ) -> Result<Response> {
        let params = Params::symbol(symbol).with_period(period);
        if historical {
            self.request(&endpoint::HISTORICAL_DISCOUNTED_CASH_FLOW, &params)
        } else {
            self.request(&endpoint::DISCOUNTED_CASH_FLOW, &params)
        }
    }
}

/// The message of an `{"Error Message": "..."}` body.
fn api_error_message(value: &Value) -> Option<&str> {
    value.get("Error Message").and_then(Value::as_str)
}
