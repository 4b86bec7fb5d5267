use stockscope_core::{StockDataPipeline, Symbol, ViewController};
use tracing::info;

use crate::cli::{AnalyzeArgs, Cli};
use crate::error::CliError;
use crate::output::{self, AnalysisReport};

pub async fn run(
    cli: &Cli,
    args: &AnalyzeArgs,
    pipeline: &StockDataPipeline,
) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let mut controller = ViewController::new(args.view.range, args.view.chart);

    info!(%symbol, range = %args.view.range, "analyzing");
    controller.lookup(pipeline, &symbol).await;

    let state = controller.state();
    if let Some(error) = &state.error {
        output::render_error(error, cli.format, cli.pretty)?;
        return Err(CliError::Fetch(error.clone()));
    }

    if let Some(report) = AnalysisReport::from_state(&state) {
        output::render_report(&report, &state, cli.format, cli.pretty, &args.view)?;
    }
    Ok(())
}
