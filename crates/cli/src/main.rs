//! folio CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    init_logging(log_level)?;

    match cli.command {
        Commands::List(args) => commands::list::execute(args, cli.config).await,
        Commands::Show(args) => commands::show::execute(args, cli.config).await,
        Commands::Featured(args) => commands::featured::execute(args, cli.config).await,
        Commands::Facets(args) => commands::facets::execute(args, cli.config).await,
        Commands::Content(args) => commands::content::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args, cli.config).await,
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
