use serde::Serialize;

use crate::Window;

/// Summary metrics over a most-recent-first [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockStats {
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub latest_volume: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub window_high: f64,
    pub window_low: f64,
    pub average_volume: f64,
    /// Population RMS deviation of closes from the latest close.
    pub volatility: f64,
}

impl StockStats {
    /// `None` unless the window holds at least two bars.
    pub fn from_window(window: &Window) -> Option<Self> {
        let bars = window.bars();
        let (latest, previous) = match bars {
            [latest, previous, ..] => (latest, previous),
            _ => return None,
        };

        let n = bars.len() as f64;
        let price_change = latest.close - previous.close;
        let window_high = bars.iter().map(|bar| bar.high).fold(f64::MIN, f64::max);
        let window_low = bars.iter().map(|bar| bar.low).fold(f64::MAX, f64::min);
        let average_volume = bars.iter().map(|bar| bar.volume).sum::<f64>() / n;
        let squared = bars
            .iter()
            .map(|bar| (bar.close - latest.close).powi(2))
            .sum::<f64>();

        Some(Self {
            current_price: latest.close,
            price_change,
            price_change_percent: price_change / previous.close * 100.0,
            latest_volume: latest.volume,
            day_high: latest.high,
            day_low: latest.low,
            window_high,
            window_low,
            average_volume,
            volatility: (squared / n).sqrt(),
        })
    }

    pub fn is_gain(&self) -> bool {
        self.price_change >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DailyBar, StockSeries, Symbol, TimeRange};
    use time::macros::date;

    fn window(bars: Vec<DailyBar>) -> Window {
        let series = StockSeries::from_unsorted(Symbol::parse("MSFT").expect("valid"), bars);
        Window::select(&series, TimeRange::All)
    }

    #[test]
    fn change_is_latest_minus_previous() {
        let window = window(vec![
            DailyBar::new(date!(2024 - 01 - 01), 99.0, 101.0, 98.0, 100.0, 500.0).expect("valid"),
            DailyBar::new(date!(2024 - 01 - 02), 101.0, 106.0, 100.0, 105.0, 700.0).expect("valid"),
        ]);

        let stats = StockStats::from_window(&window).expect("two bars");
        assert_eq!(stats.current_price, 105.0);
        assert!((stats.price_change - 5.0).abs() < 1e-12);
        assert!((stats.price_change_percent - 5.0).abs() < 1e-12);
        assert_eq!(stats.day_high, 106.0);
        assert_eq!(stats.day_low, 100.0);
        assert_eq!(stats.window_high, 106.0);
        assert_eq!(stats.window_low, 98.0);
        assert_eq!(stats.average_volume, 600.0);
        assert_eq!(stats.latest_volume, 700.0);
        assert!(stats.is_gain());
    }

    #[test]
    fn volatility_uses_population_divisor() {
        // closes 10, 12, 14 -> deviations from 14: 4, 2, 0 -> sqrt(20 / 3)
        let window = window(vec![
            DailyBar::new(date!(2024 - 01 - 01), 10.0, 10.0, 10.0, 10.0, 1.0).expect("valid"),
            DailyBar::new(date!(2024 - 01 - 02), 12.0, 12.0, 12.0, 12.0, 1.0).expect("valid"),
            DailyBar::new(date!(2024 - 01 - 03), 14.0, 14.0, 14.0, 14.0, 1.0).expect("valid"),
        ]);

        let stats = StockStats::from_window(&window).expect("three bars");
        assert!((stats.volatility - (20.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_bar_produces_no_stats() {
        let window = window(vec![
            DailyBar::new(date!(2024 - 01 - 01), 10.0, 10.0, 10.0, 10.0, 1.0).expect("valid"),
        ]);
        assert!(StockStats::from_window(&window).is_none());
        assert!(StockStats::from_window(&Window::empty(TimeRange::All)).is_none());
    }

    #[test]
    fn loss_reports_negative_percent() {
        let window = window(vec![
            DailyBar::new(date!(2024 - 01 - 01), 50.0, 51.0, 49.0, 50.0, 1.0).expect("valid"),
            DailyBar::new(date!(2024 - 01 - 02), 45.0, 46.0, 44.0, 45.0, 1.0).expect("valid"),
        ]);
        let stats = StockStats::from_window(&window).expect("two bars");
        assert!((stats.price_change_percent + 10.0).abs() < 1e-12);
        assert!(!stats.is_gain());
    }
}
