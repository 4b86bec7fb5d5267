//! Behavior-driven tests for window selection, stats, and the view controller.

use stockscope_core::{
    ChartKind, DailyBar, FetchError, StockSeries, StockStats, Symbol, TimeRange, ViewController,
    Window,
};
use time::{Date, Duration, Month};

fn series(symbol: &str, closes: &[f64]) -> StockSeries {
    let start = Date::from_calendar_date(2024, Month::January, 1).expect("valid date");
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            DailyBar::new(
                start + Duration::days(i as i64),
                *close,
                close * 1.1,
                close * 0.9,
                *close,
                1_000.0 + i as f64,
            )
            .expect("valid bar")
        })
        .collect();
    StockSeries::from_unsorted(Symbol::parse(symbol).expect("valid"), bars)
}

// =============================================================================
// Window selection
// =============================================================================

#[test]
fn window_length_is_min_of_range_and_series_for_every_range() {
    for len in [0_usize, 1, 5, 7, 31, 200, 400] {
        let closes = (0..len).map(|i| 10.0 + i as f64).collect::<Vec<_>>();
        let series = series("IBM", &closes);

        for range in TimeRange::ALL {
            let window = Window::select(&series, range);
            let expected = range.days().map_or(len, |days| days.min(len));
            assert_eq!(window.len(), expected, "len={len} range={range}");

            // last `expected` chronological entries, most recent first
            let mut tail = series.bars()[len - expected..].to_vec();
            tail.reverse();
            assert_eq!(window.bars(), tail.as_slice());
        }
    }
}

#[test]
fn stats_read_index_zero_as_latest() {
    // Given: previous close 100, latest close 105
    let series = series("MSFT", &[100.0, 105.0]);

    // When: stats are derived from the reversed window
    let window = Window::select(&series, TimeRange::OneWeek);
    let stats = StockStats::from_window(&window).expect("two bars");

    // Then: a 5 dollar, 5 percent gain
    assert!((stats.price_change - 5.0).abs() < 1e-12);
    assert!((stats.price_change_percent - 5.0).abs() < 1e-12);
    assert_eq!(stats.current_price, 105.0);
}

// =============================================================================
// View controller
// =============================================================================

#[test]
fn latest_request_wins_when_responses_arrive_out_of_order() {
    // Given: two lookups issued back to back
    let mut controller = ViewController::default();
    let first = controller.begin_fetch(&Symbol::parse("IBM").expect("valid"));
    let second = controller.begin_fetch(&Symbol::parse("AAPL").expect("valid"));

    // When: the newer response lands first, then the older one
    assert!(controller.complete_fetch(second, Ok(series("AAPL", &[1.0, 2.0]))));
    assert!(!controller.complete_fetch(first, Ok(series("IBM", &[3.0, 4.0]))));

    // Then: the state reflects the most recent request
    let state = controller.state();
    assert_eq!(state.symbol.as_ref().map(Symbol::as_str), Some("AAPL"));
    assert!(!state.loading);
}

#[test]
fn stale_completion_does_not_end_loading_of_newer_request() {
    let mut controller = ViewController::default();
    let first = controller.begin_fetch(&Symbol::parse("IBM").expect("valid"));
    let _second = controller.begin_fetch(&Symbol::parse("AAPL").expect("valid"));

    assert!(!controller.complete_fetch(first, Err(FetchError::RateLimited)));

    let state = controller.state();
    assert!(state.loading);
    assert!(state.error.is_none());
}

#[test]
fn failed_fetch_clears_series_so_no_stale_stats_render() {
    // Given: a loaded series
    let mut controller = ViewController::default();
    let ticket = controller.begin_fetch(&Symbol::parse("IBM").expect("valid"));
    controller.complete_fetch(ticket, Ok(series("IBM", &[1.0, 2.0, 3.0])));
    assert!(controller.state().stats().is_some());

    // When: the next lookup is throttled
    let ticket = controller.begin_fetch(&Symbol::parse("TSLA").expect("valid"));
    controller.complete_fetch(ticket, Err(FetchError::RateLimited));

    // Then: the error is shown and nothing else
    let state = controller.state();
    assert_eq!(state.error, Some(FetchError::RateLimited));
    assert!(state.series.is_none());
    assert!(state.stats().is_none());
}

#[test]
fn range_and_chart_changes_rederive_the_window() {
    let mut controller = ViewController::new(TimeRange::OneWeek, ChartKind::Area);
    let closes = (0..50).map(|i| 20.0 + i as f64).collect::<Vec<_>>();
    let ticket = controller.begin_fetch(&Symbol::parse("NVDA").expect("valid"));
    controller.complete_fetch(ticket, Ok(series("NVDA", &closes)));
    assert_eq!(controller.state().window().len(), 7);

    controller.set_range(TimeRange::OneMonth);
    controller.set_chart(ChartKind::HighLow);

    let state = controller.state();
    assert_eq!(state.window().len(), 30);
    assert_eq!(state.window().range(), TimeRange::OneMonth);
    assert_eq!(state.chart, ChartKind::HighLow);
}
