//! # Domain Models
//!
//! Validated types shared by the pipeline, window selection and stats.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Upper-cased, validated ticker |
//! | [`DailyBar`] | One day's OHLCV observation, all fields > 0 |
//! | [`StockSeries`] | Ascending bars for one symbol |
//! | [`TimeRange`] | Trailing window selector (1W … ALL) |
//! | [`ChartKind`] | Area or high/low plot |

mod bar;
mod range;
mod symbol;

pub use bar::{DailyBar, StockSeries};
pub use range::{ChartKind, TimeRange};
pub use symbol::Symbol;
