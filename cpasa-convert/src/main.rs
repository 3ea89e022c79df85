use anyhow::Result;
use clap::Parser;

mod cli;
mod convert;
mod logging;
mod path_guard;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    convert::run_convert(cli)
}
