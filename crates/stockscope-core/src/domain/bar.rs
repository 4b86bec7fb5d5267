use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Symbol, ValidationError};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One trading day's open/high/low/close/volume observation.
///
/// Every numeric field is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        validate_positive("open", open)?;
        validate_positive("high", high)?;
        validate_positive("low", low)?;
        validate_positive("close", close)?;
        validate_positive("volume", volume)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Parse an ISO `YYYY-MM-DD` date key.
    pub fn parse_date(value: &str) -> Result<Date, ValidationError> {
        let format = time::macros::format_description!("[year]-[month]-[day]");
        Date::parse(value.trim(), format).map_err(|_| ValidationError::InvalidDate {
            value: value.to_owned(),
        })
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

/// Chronologically ascending daily bars for one symbol.
///
/// Built once per fetch and never mutated; a new fetch replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSeries {
    symbol: Symbol,
    bars: Vec<DailyBar>,
}

impl StockSeries {
    /// Sort `bars` ascending by date and wrap them.
    pub fn from_unsorted(symbol: Symbol, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { symbol, bars }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.last()
    }
}
