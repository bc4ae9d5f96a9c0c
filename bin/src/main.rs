//! fmp CLI binary.
//!
//! Thin command-line front end over the `fmp-wrapper` client: one
//! subcommand per endpoint, JSON or table output.

mod key;
mod output;

use std::{path::PathBuf, process, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use fmp_wrapper::{FmpClient, HttpTransport, OutputFormat, Period, Response};

#[derive(Debug, Parser)]
#[command(name = "fmp")]
#[command(about = "Query the Financial Modeling Prep API", long_about = None)]
#[command(version)]
struct Cli {
    /// Print a table instead of JSON
    #[arg(long, global = true)]
    table: bool,

    /// File holding the API key (defaults to ./fmp_key.txt, then FMP_API_KEY)
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    /// Give up on a request after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Override the API root (e.g. for a local mock)
    #[arg(long, global = true, hide = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Company profile
    Profile {
        /// Ticker symbol
        symbol: String,
    },

    /// Real-time quotes
    Quote {
        /// Ticker symbols
        #[arg(value_delimiter = ',', required = true)]
        symbols: Vec<String>,
    },

    /// Financial statements
    Statements {
        /// Ticker symbol
        symbol: String,

        /// Statement type (income, balance-sheet, cash-flow)
        #[arg(short = 't', long = "type", default_value = "income")]
        statement: String,

        /// Reporting period (annual or quarter)
        #[arg(short, long, default_value = "annual")]
        period: Period,
    },

    /// Daily price history
    History {
        /// Ticker symbol
        symbol: String,
    },

    /// Financial ratios
    Ratios {
        /// Ticker symbols
        #[arg(value_delimiter = ',', required = true)]
        symbols: Vec<String>,
    },

    /// Enterprise value
    EnterpriseValue {
        /// Ticker symbol
        symbol: String,

        /// Reporting period (annual or quarter)
        #[arg(short, long, default_value = "annual")]
        period: Period,
    },

    /// Key metrics
    KeyMetrics {
        /// Ticker symbol
        symbol: String,

        /// Reporting period (annual or quarter)
        #[arg(short, long, default_value = "annual")]
        period: Period,
    },

    /// Financial statement growth
    Growth {
        /// Ticker symbol
        symbol: String,

        /// Reporting period (annual or quarter)
        #[arg(short, long, default_value = "annual")]
        period: Period,
    },

    /// Company rating
    Rating {
        /// Ticker symbol
        symbol: String,
    },

    /// Discounted cash flow valuation
    Dcf {
        /// Ticker symbol
        symbol: String,

        /// Fetch the per-period history instead of the current value
        #[arg(long)]
        historical: bool,

        /// Reporting period for the history (annual or quarter)
        #[arg(short, long, default_value = "annual")]
        period: Period,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = key::resolve_config(cli.key_file.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    let transport = match cli.timeout {
        Some(secs) => HttpTransport::with_timeout(Duration::from_secs(secs))?,
        None => HttpTransport::new(),
    };
    let mut client = FmpClient::with_transport(config, transport)?;
    if cli.table {
        client.set_output_format(OutputFormat::Table);
    }

    let response = dispatch(&client, &cli.command)?;
    output::print_response(&response)
}

fn dispatch(client: &FmpClient, command: &Commands) -> fmp_wrapper::Result<Response> {
    match command {
        Commands::Profile { symbol } => client.profile(symbol),
        Commands::Quote { symbols } => client.quote(symbols),
        Commands::Statements {
            symbol,
            statement,
            period,
        } => client.financial_statements(symbol, statement, *period),
        Commands::History { symbol } => client.price_history(symbol),
        Commands::Ratios { symbols } => client.financial_ratios(symbols),
        Commands::EnterpriseValue { symbol, period } => client.enterprise_value(symbol, *period),
        Commands::KeyMetrics { symbol, period } => client.key_metrics(symbol, *period),
        Commands::Growth { symbol, period } => client.financial_growth(symbol, *period),
        Commands::Rating { symbol } => client.company_rating(symbol),
        Commands::Dcf {
            symbol,
            historical,
            period,
        } => client.discounted_cash_flow(symbol, *period, *historical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_statements() {
        let cli = Cli::try_parse_from([
            "fmp", "--table", "statements", "AAPL", "--type", "cash-flow", "-p", "quarter",
        ])
        .unwrap();

        assert!(cli.table);
        match cli.command {
            Commands::Statements {
                symbol,
                statement,
                period,
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(statement, "cash-flow");
                assert_eq!(period, Period::Quarter);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_quote_list() {
        let cli = Cli::try_parse_from(["fmp", "quote", "AAPL,MSFT", "GOOG"]).unwrap();
        match cli.command {
            Commands::Quote { symbols } => assert_eq!(symbols, ["AAPL", "MSFT", "GOOG"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_dcf_defaults_to_current() {
        let cli = Cli::try_parse_from(["fmp", "dcf", "AAPL"]).unwrap();
        assert!(!cli.table);
        assert!(matches!(
            cli.command,
            Commands::Dcf {
                historical: false,
                period: Period::Annual,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_timeout() {
        let cli = Cli::try_parse_from(["fmp", "rating", "AAPL", "--timeout", "5"]).unwrap();
        assert_eq!(cli.timeout, Some(5));

        let cli = Cli::try_parse_from(["fmp", "rating", "AAPL"]).unwrap();
        assert_eq!(cli.timeout, None);
    }

    #[test]
    fn test_rejects_unknown_period() {
        assert!(Cli::try_parse_from(["fmp", "key-metrics", "AAPL", "-p", "monthly"]).is_err());
    }
}
