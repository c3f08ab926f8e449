use clap::Parser;
use slide_routes::cli::{run_cli, Cli};
use slide_routes::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    run_cli(cli)
}
