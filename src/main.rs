use clap::Parser;
use multiroute::cli::{run_cli, Cli};
use multiroute::logging;

fn main() -> anyhow::Result<()> {
    logging::init_logging()?;
    run_cli(Cli::parse())
}
