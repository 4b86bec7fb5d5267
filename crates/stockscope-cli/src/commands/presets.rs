use stockscope_core::POPULAR_STOCKS;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    output::render_presets(&POPULAR_STOCKS, cli.format, cli.pretty)
}
