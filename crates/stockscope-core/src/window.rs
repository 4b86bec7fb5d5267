use serde::Serialize;

use crate::{DailyBar, StockSeries, TimeRange};

/// Trailing slice of a series, ordered most recent first.
///
/// Index `0` is the latest bar and index `1` the one before it; stats read
/// them that way. Use [`Window::chronological`] for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    range: TimeRange,
    bars: Vec<DailyBar>,
}

impl Window {
    /// Take the last `min(range days, len)` bars and reverse them.
    pub fn select(series: &StockSeries, range: TimeRange) -> Self {
        let bars = series.bars();
        let start = bars.len() - range.window_len(bars.len());
        Self {
            range,
            bars: bars[start..].iter().rev().copied().collect(),
        }
    }

    pub fn empty(range: TimeRange) -> Self {
        Self {
            range,
            bars: Vec::new(),
        }
    }

    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Most-recent-first bars.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.first()
    }

    pub fn previous(&self) -> Option<&DailyBar> {
        self.bars.get(1)
    }

    /// Oldest-first iteration for plotting.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &DailyBar> + ExactSizeIterator {
        self.bars.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
