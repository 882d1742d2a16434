// src/pipeline/mod.rs

//! Pass drivers.

mod watch;

pub use watch::{PassOutcome, run_pass};

use crate::error::Result;
use crate::extract::build_sources;
use crate::models::{Config, Credentials};
use crate::services::{HttpFetcher, ReportNotifier, TelegramGateway};
use crate::storage::StateStore;

/// Run one full check pass with the real HTTP fetcher and Telegram
/// delivery, wired from configuration and environment credentials.
pub async fn run_check(config: &Config, credentials: &Credentials) -> Result<PassOutcome> {
    config.validate()?;

    let sources = build_sources(config)?;
    let fetcher = HttpFetcher::new(&config.watcher)?;
    let gateway = TelegramGateway::new(credentials)?;
    let notifier = ReportNotifier::new(gateway, HttpFetcher::new(&config.watcher)?);
    let store = StateStore::new(&config.watcher.state_file);

    log::info!("Checking {} source(s)", sources.len());
    let outcome = run_pass(&sources, &fetcher, &notifier, &store).await?;
    log::info!(
        "Pass complete: {} checked, {} changed, {} failed",
        outcome.sources_checked,
        outcome.changed.len(),
        outcome.failures
    );

    Ok(outcome)
}

/// Validate configuration and extractor bindings without any network use.
pub fn run_validate(config: &Config) -> Result<()> {
    config.validate()?;
    let sources = build_sources(config)?;
    log::info!("Configuration OK: {} source(s) bound", sources.len());
    Ok(())
}
