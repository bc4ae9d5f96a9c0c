//! Declarative endpoint descriptors.
//!
//! Every client method is backed by one [`Endpoint`]: the fixed path template,
//! whether the `period` query parameter is sent, an optional sub-field to
//! extract from the decoded body, and whether the path needs a validated
//! [`StatementType`]. [`FmpClient::request`](crate::FmpClient::request) is the
//! single routine that consumes them.

use reqwest::Url;
use serde_json::Value;

use crate::{
    Result,
    error::FmpError,
    types::{Period, StatementType},
};

/// Path placeholder replaced by [`StatementType::path`].
pub const STATEMENT: &str = "{statement}";

/// Static description of one API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Name used in logs and errors.
    pub name: &'static str,
    /// Path segments below the versioned base URL, before the symbol.
    pub path: &'static [&'static str],
    /// Whether `period=<p>` is sent ahead of the API key.
    pub periodic: bool,
    /// Sub-field holding the records, extracted before tabulation.
    pub field: Option<&'static str>,
    /// Whether the path contains [`STATEMENT`] and needs a statement type.
    pub requires_statement: bool,
}

/// Company profile.
pub const PROFILE: Endpoint = Endpoint {
    name: "profile",
    path: &["company", "profile"],
    periodic: false,
    field: None,
    requires_statement: false,
};

/// Real-time quotes for a comma-joined symbol list.
pub const QUOTE: Endpoint = Endpoint {
    name: "quote",
    path: &["quote"],
    periodic: false,
    field: None,
    requires_statement: false,
};

/// Income, balance sheet and cash flow statements.
pub const FINANCIAL_STATEMENTS: Endpoint = Endpoint {
    name: "financial_statements",
    path: &["financials", STATEMENT],
    periodic: true,
    field: Some("financials"),
    requires_statement: true,
};

/// Full daily price history.
pub const PRICE_HISTORY: Endpoint = Endpoint {
    name: "price_history",
    path: &["historical-price-full"],
    periodic: false,
    field: Some("historical"),
    requires_statement: false,
};

/// Financial ratios for a comma-joined symbol list.
pub const FINANCIAL_RATIOS: Endpoint = Endpoint {
    name: "financial_ratios",
    path: &["financial-ratios"],
    periodic: false,
    field: None,
    requires_statement: false,
};

/// Enterprise value.
pub const ENTERPRISE_VALUE: Endpoint = Endpoint {
    name: "enterprise_value",
    path: &["enterprise-value"],
    periodic: true,
    field: None,
    requires_statement: false,
};

/// Key metrics.
pub const KEY_METRICS: Endpoint = Endpoint {
    name: "key_metrics",
    path: &["company-key-metrics"],
    periodic: true,
    field: None,
    requires_statement: false,
};

/// Financial statement growth.
pub const FINANCIAL_GROWTH: Endpoint = Endpoint {
    name: "financial_growth",
    path: &["financial-statement-growth"],
    periodic: true,
    field: None,
    requires_statement: false,
};

/// Company rating.
pub const COMPANY_RATING: Endpoint = Endpoint {
    name: "company_rating",
    path: &["company", "rating"],
    periodic: false,
    field: None,
    requires_statement: false,
};

/// Current discounted cash flow valuation.
pub const DISCOUNTED_CASH_FLOW: Endpoint = Endpoint {
    name: "discounted_cash_flow",
    path: &["discounted-cash-flow"],
    periodic: false,
    field: None,
    requires_statement: false,
};

/// Discounted cash flow history.
pub const HISTORICAL_DISCOUNTED_CASH_FLOW: Endpoint = Endpoint {
    name: "historical_discounted_cash_flow",
    path: &["historical-discounted-cash-flow"],
    periodic: true,
    field: None,
    requires_statement: false,
};

/// Every endpoint the client knows about.
pub const CATALOG: &[Endpoint] = &[
    PROFILE,
    QUOTE,
    FINANCIAL_STATEMENTS,
    PRICE_HISTORY,
    FINANCIAL_RATIOS,
    ENTERPRISE_VALUE,
    KEY_METRICS,
    FINANCIAL_GROWTH,
    COMPANY_RATING,
    DISCOUNTED_CASH_FLOW,
    HISTORICAL_DISCOUNTED_CASH_FLOW,
];

/// Per-call arguments for an [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Symbol path segment; batch endpoints pass a comma-joined list.
    pub symbol: String,
    /// Reporting period, only sent by periodic endpoints.
    pub period: Period,
    /// Statement type for [`FINANCIAL_STATEMENTS`].
    pub statement: Option<StatementType>,
}

impl Params {
    /// Arguments for a single symbol with the default period.
    #[must_use]
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            period: Period::default(),
            statement: None,
        }
    }

    /// Arguments for a batch of symbols, joined with commas.
    #[must_use]
    pub fn symbols<S: AsRef<str>>(symbols: &[S]) -> Self {
        let joined = symbols
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        Self::symbol(joined)
    }

    /// Set the reporting period.
    #[must_use]
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Set the statement type.
    #[must_use]
    pub const fn with_statement(mut self, statement: StatementType) -> Self {
        self.statement = Some(statement);
        self
    }
}

impl Endpoint {
    /// Build the request URL below `base` (the versioned API root).
    ///
    /// The symbol is pushed as one percent-escaped path segment. The API key
    /// is always the last query parameter, preceded by `period` on periodic
    /// endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` cannot carry path segments, or if the
    /// endpoint needs a statement type and `params` has none.
    pub fn url(&self, base: &Url, api_key: &str, params: &Params) -> Result<Url> {
        let statement = match (self.requires_statement, params.statement) {
            (true, None) => {
                return Err(FmpError::InvalidStatementType {
                    given: String::new(),
                    valid: StatementType::VALID,
                });
            }
            (_, statement) => statement,
        };

        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FmpError::InvalidBaseUrl(base.to_string()))?;
            segments.pop_if_empty();
            for segment in self.path {
                match (*segment, statement) {
                    (STATEMENT, Some(statement)) => segments.push(statement.path()),
                    (segment, _) => segments.push(segment),
                };
            }
            segments.push(&params.symbol);
        }
        {
            let mut query = url.query_pairs_mut();
            if self.periodic {
                query.append_pair("period", params.period.as_str());
            }
            query.append_pair("apikey", api_key);
        }
        Ok(url)
    }

    /// Take the records out of a decoded body.
    ///
    /// Endpoints without a sub-field return the body unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::MissingField`] if the body is not an object holding
    /// the sub-field.
    pub fn extract(&self, body: Value) -> Result<Value> {
        let Some(field) = self.field else {
            return Ok(body);
        };
        let missing = || FmpError::MissingField {
            endpoint: self.name,
            field,
        };
        match body {
            Value::Object(mut map) => map.remove(field).ok_or_else(missing),
            _ => Err(missing()),
        }
    }
}
