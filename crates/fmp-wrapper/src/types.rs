//! Request parameters and response containers.

use std::{fmt, str::FromStr};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FmpError;

/// Reporting period for period-scoped endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "annual" | "year" => Ok(Self::Annual),
            "quarter" | "quarterly" => Ok(Self::Quarter),
            other => Err(format!("unknown period '{other}', expected annual or quarter")),
        }
    }
}

/// Kind of financial statement served under `financials/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementType {
    /// Income statement.
    Income,
    /// Balance sheet statement.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
}

impl StatementType {
    /// Names accepted by [`FromStr`], as reported in validation errors.
    pub const VALID: &'static [&'static str] = &["income", "balance-sheet", "cash-flow"];

    /// Short name of the statement type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::BalanceSheet => "balance-sheet",
            Self::CashFlow => "cash-flow",
        }
    }

    /// Path segment the API uses for this statement.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Income => "income-statement",
            Self::BalanceSheet => "balance-sheet-statement",
            Self::CashFlow => "cash-flow-statement",
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementType {
    type Err = FmpError;

    /// Accepts the short names (`income`, `balance-sheet`, `cash-flow`), their
    /// first word (`balance`, `cash`) and the full API path names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" | "income-statement" => Ok(Self::Income),
            "balance" | "balance-sheet" | "balance-sheet-statement" => Ok(Self::BalanceSheet),
            "cash" | "cash-flow" | "cash-flow-statement" => Ok(Self::CashFlow),
            _ => Err(FmpError::InvalidStatementType {
                given: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

/// Output shape returned by endpoint methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Decoded JSON, passed through.
    #[default]
    Json,
    /// Tabular projection as a polars [`DataFrame`].
    Table,
}

/// Result of an endpoint call, routed by the client's [`OutputFormat`].
#[derive(Debug, Clone)]
pub enum Response {
    /// Decoded JSON (or the extracted sub-field).
    Json(Value),
    /// Tabular projection of the same data.
    Table(DataFrame),
}

impl Response {
    /// Returns `true` for a tabular response.
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// Borrow the JSON payload, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Table(_) => None,
        }
    }

    /// Borrow the table, if any.
    #[must_use]
    pub const fn as_table(&self) -> Option<&DataFrame> {
        match self {
            Self::Table(df) => Some(df),
            Self::Json(_) => None,
        }
    }

    /// Take the JSON payload, if any.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Table(_) => None,
        }
    }

    /// Take the table, if any.
    #[must_use]
    pub fn into_table(self) -> Option<DataFrame> {
        match self {
            Self::Table(df) => Some(df),
            Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trip() {
        assert_eq!(Period::default(), Period::Annual);
        assert_eq!(Period::Quarter.as_str(), "quarter");
        assert_eq!("quarterly".parse::<Period>().unwrap(), Period::Quarter);
        assert!("monthly".parse::<Period>().is_err());
    }

    #[test]
    fn test_statement_type_aliases() {
        for name in ["income", "income-statement"] {
            assert_eq!(name.parse::<StatementType>().unwrap(), StatementType::Income);
        }
        for name in ["balance", "balance-sheet", "balance-sheet-statement"] {
            assert_eq!(
                name.parse::<StatementType>().unwrap(),
                StatementType::BalanceSheet
            );
        }
        for name in ["cash", "cash-flow", "cash-flow-statement"] {
            assert_eq!(name.parse::<StatementType>().unwrap(), StatementType::CashFlow);
        }
        assert_eq!(StatementType::CashFlow.path(), "cash-flow-statement");
    }

    #[test]
    fn test_statement_type_rejects_unknown() {
        let err = "unknown".parse::<StatementType>().unwrap_err();
        match err {
            FmpError::InvalidStatementType { given, valid } => {
                assert_eq!(given, "unknown");
                assert_eq!(valid, StatementType::VALID);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_response_accessors() {
        let response = Response::Json(serde_json::json!([1, 2]));
        assert!(!response.is_table());
        assert!(response.as_table().is_none());
        assert_eq!(response.into_json().unwrap(), serde_json::json!([1, 2]));
    }
}
