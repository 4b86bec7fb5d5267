//! CLI argument definitions for stockscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Fetch one ticker and print stats plus a chart |
//! | `presets` | List the popular-stock quick picks |
//! | `session` | Interactive lookup loop over stdin |
//!
//! # Examples
//!
//! ```bash
//! stockscope analyze msft --range 3M
//! stockscope analyze AAPL --chart high-low --format json --pretty
//! STOCKSCOPE_ALPHAVANTAGE_API_KEY=... stockscope session --symbol NVDA
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use stockscope_core::config::DEFAULT_TIMEOUT_MS;
use stockscope_core::{ChartKind, TimeRange};

/// Daily stock price lookup with summary stats and a terminal chart.
#[derive(Debug, Parser)]
#[command(
    name = "stockscope",
    author,
    version,
    about = "Daily stock price lookup with summary stats and a terminal chart",
    long_about = "stockscope fetches daily price and volume history from Alpha Vantage, \
derives summary statistics over a trailing window, and draws a terminal chart.\n\
\n\
Set STOCKSCOPE_ALPHAVANTAGE_API_KEY (or put it in .env) to look up any ticker; \
without a key only the demo symbol MSFT is available."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Alpha Vantage API key; overrides the environment.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable stats and chart.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a ticker and print its stats and chart.
    Analyze(AnalyzeArgs),
    /// List the popular-stock quick picks.
    Presets,
    /// Interactive lookup loop reading commands from stdin.
    Session(SessionArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Trailing window: 1W, 1M, 3M, 6M, 1Y or ALL.
    #[arg(long, default_value_t = TimeRange::OneMonth)]
    pub range: TimeRange,

    /// Chart style: area or high-low.
    #[arg(long, default_value_t = ChartKind::Area)]
    pub chart: ChartKind,

    /// Chart width in columns.
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Price plot height in rows.
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Print stats only.
    #[arg(long, default_value_t = false)]
    pub no_chart: bool,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Ticker symbol, e.g. AAPL.
    pub symbol: String,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Ticker fetched when the session starts.
    #[arg(long, default_value = stockscope_core::presets::INITIAL_SYMBOL)]
    pub symbol: String,

    #[command(flatten)]
    pub view: ViewArgs,
}
