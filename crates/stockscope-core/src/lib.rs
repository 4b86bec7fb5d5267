//! # Stockscope Core
//!
//! Daily price lookup and summary statistics for a single ticker.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Credential and endpoint configuration |
//! | [`domain`] | Symbol, daily bars, series, time ranges |
//! | [`error`] | Validation and fetch errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | Alpha Vantage `TIME_SERIES_DAILY` fetch and normalization |
//! | [`presets`] | Popular tickers for quick selection |
//! | [`state`] | Whole-snapshot view state with a request-sequence guard |
//! | [`stats`] | Summary metrics over a window |
//! | [`window`] | Trailing window selection |
//!
//! ## Flow
//!
//! ```text
//! Symbol ──▶ StockDataPipeline::fetch ──▶ StockSeries (ascending)
//!                                              │
//!                          Window::select(range)  (most recent first)
//!                                              │
//!                              ┌───────────────┴───────────────┐
//!                              ▼                               ▼
//!                     StockStats::from_window          chart rendering
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockscope_core::{PipelineConfig, StockDataPipeline, StockStats, Symbol, TimeRange, Window};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = StockDataPipeline::new(PipelineConfig::from_env());
//!     let series = pipeline.fetch(&Symbol::parse("msft")?).await?;
//!     let window = Window::select(&series, TimeRange::OneMonth);
//!     if let Some(stats) = StockStats::from_window(&window) {
//!         println!("MSFT ${:.2} ({:+.2}%)", stats.current_price, stats.price_change_percent);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! The API key is read from the environment and never logged; request URLs
//! are logged with the key redacted.

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod presets;
pub mod state;
pub mod stats;
pub mod window;

pub use config::{Credential, PipelineConfig};
pub use domain::{ChartKind, DailyBar, StockSeries, Symbol, TimeRange};
pub use error::{FetchError, FetchErrorKind, NoDataReason, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use pipeline::{daily_series_url, normalize_daily_payload, StockDataPipeline};
pub use presets::{Preset, POPULAR_STOCKS};
pub use state::{RequestTicket, ViewController, ViewState};
pub use stats::StockStats;
pub use window::Window;
