use thiserror::Error;

/// Validation and contract errors exposed by `stockscope-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },
    #[error("date must be ISO YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("invalid time range '{value}', expected one of 1W, 1M, 3M, 6M, 1Y, ALL")]
    InvalidTimeRange { value: String },
    #[error("invalid chart kind '{value}', expected one of area, high-low")]
    InvalidChartKind { value: String },
}

/// Coarse classification of [`FetchError`] used for exit codes and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Network,
    Decode,
    Api,
    RateLimited,
    NoData,
    Config,
}

/// Why a payload produced no series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// The time-series collection was missing or had no entries.
    Empty,
    /// Every entry failed the positivity check.
    NoValidPrices,
}

/// Terminal failure of a single daily-series fetch.
///
/// None of these are retried automatically; [`FetchError::hint`] carries the
/// only retry guidance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    #[error("request failed: {message}")]
    Network { message: String },

    #[error("failed to parse alphavantage response: {message}")]
    Decode { message: String },

    #[error("API Error: {message}")]
    Api { message: String },

    #[error("API call frequency exceeded. Please try again in 1 minute.")]
    RateLimited,

    #[error("{}", no_data_message(.symbol, .reason))]
    NoData { symbol: String, reason: NoDataReason },

    #[error("{message}")]
    Config { message: String },
}

fn no_data_message(symbol: &str, reason: &NoDataReason) -> String {
    match reason {
        NoDataReason::Empty => format!("No data available for symbol: {symbol}"),
        NoDataReason::NoValidPrices => format!("No valid price data found for symbol: {symbol}"),
    }
}

impl FetchError {
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport { .. } => FetchErrorKind::Transport,
            Self::Network { .. } => FetchErrorKind::Network,
            Self::Decode { .. } => FetchErrorKind::Decode,
            Self::Api { .. } => FetchErrorKind::Api,
            Self::RateLimited => FetchErrorKind::RateLimited,
            Self::NoData { .. } => FetchErrorKind::NoData,
            Self::Config { .. } => FetchErrorKind::Config,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Network => "fetch.network",
            FetchErrorKind::Decode => "fetch.decode",
            FetchErrorKind::Api => "fetch.api",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::NoData => "fetch.no_data",
            FetchErrorKind::Config => "fetch.config",
        }
    }

    /// Supplementary guidance shown under the error banner.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RateLimited => Some(
                "Note: The free API tier has a limit of 5 calls per minute. Please wait and try again.",
            ),
            _ => None,
        }
    }
}
