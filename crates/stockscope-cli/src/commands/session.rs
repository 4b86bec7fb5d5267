//! Interactive lookup loop.
//!
//! Each stdin line is one action: a ticker to fetch, `:N` for the N-th preset,
//! `:range <R>`, `:chart <K>`, `:presets`, `:help` or `:quit`. The view is
//! redrawn after every action that changes state.

use std::str::FromStr;

use stockscope_core::{
    presets, ChartKind, StockDataPipeline, Symbol, TimeRange, ValidationError, ViewController,
    POPULAR_STOCKS,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::{Cli, SessionArgs};
use crate::error::CliError;
use crate::output::{self, AnalysisReport};

const HELP: &str = "\
Enter a ticker to analyze it, or:
  :1 .. :8        pick a popular stock (:presets to list)
  :range <R>      1W, 1M, 3M, 6M, 1Y or ALL
  :chart <K>      area or high-low
  :help           show this message
  :quit           leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionInput {
    Empty,
    Lookup(Symbol),
    Range(TimeRange),
    Chart(ChartKind),
    Presets,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Result<SessionInput, ValidationError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(SessionInput::Empty);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Symbol::parse(line).map(SessionInput::Lookup);
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next().unwrap_or_default();

    if let Ok(position) = name.parse::<usize>() {
        return Ok(presets::by_position(position)
            .map(|preset| Symbol::parse(preset.symbol))
            .transpose()?
            .map_or_else(|| SessionInput::Unknown(line.to_owned()), SessionInput::Lookup));
    }

    Ok(match name.as_str() {
        "range" | "r" => SessionInput::Range(TimeRange::from_str(argument)?),
        "chart" | "c" => SessionInput::Chart(ChartKind::from_str(argument)?),
        "presets" | "p" => SessionInput::Presets,
        "help" | "h" | "?" => SessionInput::Help,
        "quit" | "q" | "exit" => SessionInput::Quit,
        _ => SessionInput::Unknown(line.to_owned()),
    })
}

pub async fn run(
    cli: &Cli,
    args: &SessionArgs,
    pipeline: &StockDataPipeline,
) -> Result<(), CliError> {
    let initial = Symbol::parse(&args.symbol)?;
    let mut controller = ViewController::new(args.view.range, args.view.chart);

    eprintln!("{HELP}");
    lookup(&mut controller, pipeline, &initial).await;
    render_view(cli, args, &controller)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Ok(SessionInput::Empty) => continue,
            Ok(SessionInput::Quit) => break,
            Ok(SessionInput::Help) => {
                eprintln!("{HELP}");
                continue;
            }
            Ok(SessionInput::Presets) => {
                output::render_presets(&POPULAR_STOCKS, cli.format, cli.pretty)?;
                continue;
            }
            Ok(SessionInput::Unknown(input)) => {
                eprintln!("unknown command '{input}', try :help");
                continue;
            }
            Ok(SessionInput::Lookup(symbol)) => lookup(&mut controller, pipeline, &symbol).await,
            Ok(SessionInput::Range(range)) => controller.set_range(range),
            Ok(SessionInput::Chart(chart)) => controller.set_chart(chart),
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        }
        render_view(cli, args, &controller)?;
    }

    debug!("session closed");
    Ok(())
}

async fn lookup(controller: &mut ViewController, pipeline: &StockDataPipeline, symbol: &Symbol) {
    eprintln!("{}", loading_message(symbol));
    controller.lookup(pipeline, symbol).await;
}

fn loading_message(symbol: &Symbol) -> String {
    match presets::find(symbol.as_str()) {
        Some(preset) if preset.name != preset.symbol => {
            format!("Loading {} ({symbol})...", preset.name)
        }
        _ => format!("Loading {symbol}..."),
    }
}

fn render_view(cli: &Cli, args: &SessionArgs, controller: &ViewController) -> Result<(), CliError> {
    let state = controller.state();
    if let Some(error) = &state.error {
        return output::render_error(error, cli.format, cli.pretty);
    }
    match AnalysisReport::from_state(&state) {
        Some(report) => output::render_report(&report, &state, cli.format, cli.pretty, &args.view),
        None => Ok(()),
    }
}
