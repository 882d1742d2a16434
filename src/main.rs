// src/main.rs

//! irwatch: Investor-Relations Report Watcher CLI
//!
//! One invocation runs one pass; periodic checking is the job of an
//! external scheduler such as cron.

use clap::{Parser, Subcommand};

use irwatch::error::Result;
use irwatch::models::{Config, Credentials};
use irwatch::pipeline::{run_check, run_validate};

#[derive(Parser, Debug)]
#[command(
    name = "irwatch",
    version = "0.1.0",
    about = "Investor-relations report watcher"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Run one check pass over all configured sources
    Check,
    /// Validate configuration and extractor bindings
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .init();

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Check => {
            let credentials = Credentials::from_env()?;
            run_check(&config, &credentials).await?;
        }
        Command::Validate => run_validate(&config)?,
    }

    Ok(())
}
