pub mod chart;

use serde::Serialize;
use stockscope_core::{
    ChartKind, DailyBar, FetchError, Preset, StockStats, Symbol, TimeRange, ViewState,
};

use self::chart::{format_price, render_chart, ChartSize};
use crate::cli::{OutputFormat, ViewArgs};
use crate::error::CliError;

/// Everything shown for one loaded symbol.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub symbol: Symbol,
    pub range: TimeRange,
    pub chart: ChartKind,
    pub stats: Option<StockStats>,
    /// Oldest first.
    pub bars: Vec<DailyBar>,
}

impl AnalysisReport {
    /// `None` when nothing is loaded.
    pub fn from_state(state: &ViewState) -> Option<Self> {
        let symbol = state.series.as_ref()?.symbol().clone();
        let window = state.window();
        if window.is_empty() {
            return None;
        }
        Some(Self {
            symbol,
            range: state.range,
            chart: state.chart,
            stats: state.stats(),
            bars: window.chronological().copied().collect(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    code: &'static str,
    message: String,
    hint: Option<&'a str>,
}

pub fn render_report(
    report: &AnalysisReport,
    state: &ViewState,
    format: OutputFormat,
    pretty: bool,
    view: &ViewArgs,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(report, pretty),
        OutputFormat::Table => {
            for line in report_lines(report, state, view) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

pub fn render_error(error: &FetchError, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(
            &ErrorReport {
                code: error.code(),
                message: error.to_string(),
                hint: error.hint(),
            },
            pretty,
        ),
        OutputFormat::Table => {
            for line in error_banner(error) {
                eprintln!("{line}");
            }
            Ok(())
        }
    }
}

pub fn render_presets(
    presets: &[Preset],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(&presets, pretty),
        OutputFormat::Table => {
            for (index, preset) in presets.iter().enumerate() {
                println!("{:>2}. {} ({})", index + 1, preset.name, preset.symbol);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

/// Persistent error banner, with the rate-limit hint when it applies.
pub fn error_banner(error: &FetchError) -> Vec<String> {
    let mut lines = vec![String::from("Error"), error.to_string()];
    if let Some(hint) = error.hint() {
        lines.push(hint.to_owned());
    }
    lines
}

pub fn report_lines(report: &AnalysisReport, state: &ViewState, view: &ViewArgs) -> Vec<String> {
    let mut lines = vec![
        format!("{} Stock Analysis", report.symbol),
        format!("range: {}  chart: {}", report.range, report.chart),
        String::new(),
    ];

    match &report.stats {
        Some(stats) => lines.extend(stats_lines(stats)),
        None => lines.push(String::from("Not enough data in this range for statistics.")),
    }

    if !view.no_chart {
        lines.push(String::new());
        lines.extend(render_chart(
            &state.window(),
            report.chart,
            ChartSize::new(view.width, view.height),
        ));
    }

    lines
}

fn stats_lines(stats: &StockStats) -> Vec<String> {
    let sign = if stats.is_gain() { "+" } else { "-" };
    let percent_sign = if stats.price_change_percent >= 0.0 { "+" } else { "" };
    vec![
        format!("Current Price : {}", format_price(stats.current_price)),
        format!(
            "Price Change  : {sign}${:.2} ({percent_sign}{:.2}%)",
            stats.price_change.abs(),
            stats.price_change_percent
        ),
        format!(
            "Volume        : {} (Avg: {})",
            group_thousands(stats.latest_volume),
            group_thousands(stats.average_volume)
        ),
        format!("Day High      : {}", format_price(stats.day_high)),
        format!("Day Low       : {}", format_price(stats.day_low)),
        format!(
            "Range High/Low: {} / {}",
            format_price(stats.window_high),
            format_price(stats.window_low)
        ),
        format!("Volatility    : {}", format_price(stats.volatility)),
    ]
}

/// Round to a whole number and group digits by thousands.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}
