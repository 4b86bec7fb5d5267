//! View state for the interactive front end.
//!
//! [`ViewState`] is an immutable snapshot. [`ViewController`] swaps the whole
//! snapshot on every transition, so a reader holding an `Arc<ViewState>`
//! never sees a half-applied update.
//!
//! Each fetch gets a [`RequestTicket`] with a monotonically increasing
//! sequence number. A completion whose ticket is older than the most recently
//! issued one is discarded: the latest request wins, not the first response
//! to arrive.

use std::sync::Arc;

use tracing::debug;

use crate::{
    ChartKind, FetchError, StockDataPipeline, StockSeries, StockStats, Symbol, TimeRange, Window,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Symbol of the last successful fetch.
    pub symbol: Option<Symbol>,
    /// Loaded series; `None` after a failure.
    pub series: Option<StockSeries>,
    pub loading: bool,
    pub error: Option<FetchError>,
    pub range: TimeRange,
    pub chart: ChartKind,
}

impl ViewState {
    /// Trailing window of the loaded series for the selected range.
    pub fn window(&self) -> Window {
        self.series
            .as_ref()
            .map_or_else(|| Window::empty(self.range), |series| Window::select(series, self.range))
    }

    pub fn stats(&self) -> Option<StockStats> {
        StockStats::from_window(&self.window())
    }
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub const fn seq(self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: Arc<ViewState>,
    issued: u64,
}

impl ViewController {
    pub fn new(range: TimeRange, chart: ChartKind) -> Self {
        Self {
            state: Arc::new(ViewState {
                range,
                chart,
                ..ViewState::default()
            }),
            issued: 0,
        }
    }

    pub fn state(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    /// Mark a fetch as started and clear the previous error.
    pub fn begin_fetch(&mut self, symbol: &Symbol) -> RequestTicket {
        self.issued += 1;
        debug!(%symbol, seq = self.issued, "fetch started");
        self.replace(ViewState {
            loading: true,
            error: None,
            ..self.snapshot()
        });
        RequestTicket { seq: self.issued }
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the
    /// result was discarded.
    pub fn complete_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<StockSeries, FetchError>,
    ) -> bool {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale fetch result"
            );
            return false;
        }

        let current = self.snapshot();
        let next = match result {
            Ok(series) => ViewState {
                symbol: Some(series.symbol().clone()),
                series: Some(series),
                loading: false,
                error: None,
                ..current
            },
            Err(error) => ViewState {
                series: None,
                loading: false,
                error: Some(error),
                ..current
            },
        };
        self.replace(next);
        true
    }

    /// Run one fetch through `pipeline` and apply it.
    pub async fn lookup(&mut self, pipeline: &StockDataPipeline, symbol: &Symbol) -> bool {
        let ticket = self.begin_fetch(symbol);
        let result = pipeline.fetch(symbol).await;
        self.complete_fetch(ticket, result)
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.replace(ViewState {
            range,
            ..self.snapshot()
        });
    }

    pub fn set_chart(&mut self, chart: ChartKind) {
        self.replace(ViewState {
            chart,
            ..self.snapshot()
        });
    }

    fn snapshot(&self) -> ViewState {
        ViewState::clone(&self.state)
    }

    fn replace(&mut self, next: ViewState) {
        self.state = Arc::new(next);
    }
}
