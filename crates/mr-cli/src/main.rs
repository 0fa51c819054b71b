//! Migrun CLI - apply numbered SQL migration scripts in order

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod logging;
mod prompt;

use cli::Cli;
use commands::{ls, run, split};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::Ls(args) => ls::execute(args, &cli.global).await,
        cli::Commands::Split(args) => split::execute(args).await,
    }
}
