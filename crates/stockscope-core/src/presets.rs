//! Quick-select tickers offered by the front ends.

use serde::Serialize;

/// A quick-select ticker and its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub symbol: &'static str,
    pub name: &'static str,
}

pub static POPULAR_STOCKS: [Preset; 8] = [
    Preset { symbol: "IBM", name: "IBM" },
    Preset { symbol: "GOOGL", name: "Google" },
    Preset { symbol: "TSLA", name: "Tesla" },
    Preset { symbol: "AAPL", name: "Apple" },
    Preset { symbol: "MSFT", name: "Microsoft" },
    Preset { symbol: "AMZN", name: "Amazon" },
    Preset { symbol: "META", name: "Meta" },
    Preset { symbol: "NVDA", name: "NVIDIA" },
];

/// Ticker fetched when a session starts.
pub const INITIAL_SYMBOL: &str = "IBM";

/// Case-insensitive lookup by ticker.
pub fn find(symbol: &str) -> Option<&'static Preset> {
    POPULAR_STOCKS
        .iter()
        .find(|preset| preset.symbol.eq_ignore_ascii_case(symbol.trim()))
}

/// 1-based lookup, matching the numbering shown to users.
pub fn by_position(position: usize) -> Option<&'static Preset> {
    position.checked_sub(1).and_then(|index| POPULAR_STOCKS.get(index))
}
