use anyhow::Result;
use clap::Parser;
use muxingestctl::{Cli, cli::commands, logging};

fn main() -> Result<()> {
    logging::init_tracing();

    let cli = Cli::parse();
    commands::run(cli)
}
