//! Text rendering of a price window.
//!
//! Bars are plotted oldest to newest, left to right. When the window holds
//! more bars than there are columns, adjacent bars are merged into one column
//! (last close, highest high, lowest low, mean volume).

use stockscope_core::{ChartKind, DailyBar, Window};
use time::macros::format_description;

const AXIS_WIDTH: usize = 11;
const VOLUME_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

impl ChartSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(2),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Column {
    close: f64,
    high: f64,
    low: f64,
    volume: f64,
}

impl Column {
    fn merge(bars: &[&DailyBar]) -> Self {
        let n = bars.len() as f64;
        Self {
            close: bars.last().map_or(0.0, |bar| bar.close),
            high: bars.iter().map(|bar| bar.high).fold(f64::MIN, f64::max),
            low: bars.iter().map(|bar| bar.low).fold(f64::MAX, f64::min),
            volume: bars.iter().map(|bar| bar.volume).sum::<f64>() / n,
        }
    }
}

/// Render `window` as lines of text; empty when the window is empty.
pub fn render_chart(window: &Window, kind: ChartKind, size: ChartSize) -> Vec<String> {
    let bars = window.chronological().collect::<Vec<_>>();
    if bars.is_empty() {
        return Vec::new();
    }

    let columns = bucket(&bars, size.width);
    let (min, max) = price_domain(&columns, kind);
    let span = if max > min { max - min } else { 1.0 };
    let row_of = |value: f64| -> usize {
        let scaled = (max - value) / span * (size.height - 1) as f64;
        (scaled.round().max(0.0) as usize).min(size.height - 1)
    };

    let mut grid = vec![vec![' '; columns.len()]; size.height];
    for (x, column) in columns.iter().enumerate() {
        match kind {
            ChartKind::Area => {
                let top = row_of(column.close);
                grid[top][x] = '█';
                for row in grid.iter_mut().skip(top + 1) {
                    row[x] = '░';
                }
            }
            ChartKind::HighLow => {
                grid[row_of(column.low)][x] = '-';
                grid[row_of(column.high)][x] = '+';
            }
        }
    }

    let mut lines = Vec::with_capacity(size.height + VOLUME_ROWS + 2);
    lines.push(legend(kind));
    for (y, row) in grid.iter().enumerate() {
        let label = if y == 0 {
            format_price(max)
        } else if y == size.height - 1 {
            format_price(min)
        } else if y == size.height / 2 {
            format_price(max - span * y as f64 / (size.height - 1) as f64)
        } else {
            String::new()
        };
        lines.push(format!(
            "{label:>width$} ┤{}",
            row.iter().collect::<String>(),
            width = AXIS_WIDTH - 2
        ));
    }

    let volume_max = columns
        .iter()
        .map(|column| column.volume)
        .fold(0.0_f64, f64::max);
    for level in (1..=VOLUME_ROWS).rev() {
        let cells = columns
            .iter()
            .map(|column| {
                let filled = (column.volume / volume_max * VOLUME_ROWS as f64).ceil() as usize;
                if filled >= level {
                    '▇'
                } else {
                    ' '
                }
            })
            .collect::<String>();
        let label = if level == VOLUME_ROWS {
            format_volume(volume_max)
        } else {
            String::new()
        };
        lines.push(format!("{label:>width$} │{cells}", width = AXIS_WIDTH - 2));
    }

    lines.push(date_footer(bars[0], bars[bars.len() - 1], columns.len()));
    lines
}

fn bucket(bars: &[&DailyBar], width: usize) -> Vec<Column> {
    let n = bars.len();
    let count = n.min(width);
    (0..count)
        .map(|i| {
            let start = i * n / count;
            let end = ((i + 1) * n / count).max(start + 1);
            Column::merge(&bars[start..end])
        })
        .collect()
}

fn price_domain(columns: &[Column], kind: ChartKind) -> (f64, f64) {
    let (lows, highs): (Vec<f64>, Vec<f64>) = match kind {
        ChartKind::Area => columns.iter().map(|c| (c.close, c.close)).unzip(),
        ChartKind::HighLow => columns.iter().map(|c| (c.low, c.high)).unzip(),
    };
    (
        lows.into_iter().fold(f64::MAX, f64::min),
        highs.into_iter().fold(f64::MIN, f64::max),
    )
}

fn legend(kind: ChartKind) -> String {
    let series = match kind {
        ChartKind::Area => "█ Price",
        ChartKind::HighLow => "+ High  - Low",
    };
    format!("{:width$}{series}  ▇ Volume", "", width = AXIS_WIDTH)
}

fn date_footer(first: &DailyBar, last: &DailyBar, columns: usize) -> String {
    let format = format_description!("[month repr:short] [day padding:none]");
    let start = first.date.format(format).unwrap_or_default();
    let end = last.date.format(format).unwrap_or_default();
    let gap = columns.saturating_sub(start.chars().count() + end.chars().count());
    if first.date == last.date {
        format!("{:width$}{start}", "", width = AXIS_WIDTH)
    } else {
        format!(
            "{:width$}{start}{:gap$}{end}",
            "",
            "",
            width = AXIS_WIDTH,
            gap = gap.max(1)
        )
    }
}

pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

fn format_volume(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}
