mod analyze;
mod presets;
mod session;

use stockscope_core::{Credential, PipelineConfig, StockDataPipeline};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Analyze(args) => analyze::run(cli, args, &build_pipeline(cli)).await,
        Command::Presets => presets::run(cli),
        Command::Session(args) => session::run(cli, args, &build_pipeline(cli)).await,
    }
}

fn build_pipeline(cli: &Cli) -> StockDataPipeline {
    let mut config = PipelineConfig::from_env().with_timeout_ms(cli.timeout_ms);
    if let Some(key) = &cli.api_key {
        config = config.with_credential(Credential::from_key(Some(key.clone())));
    }
    StockDataPipeline::new(config)
}
