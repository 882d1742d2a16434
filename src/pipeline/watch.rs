// src/pipeline/watch.rs

//! One watch pass over all configured sources.
//!
//! Per source: fetch → extract → compare to stored id → notify on change
//! → record the new id. Each source runs inside its own error boundary,
//! so one failure cannot prevent later sources from being checked or the
//! final persistence of the ones that succeeded. State is persisted only
//! when at least one source changed.

use crate::error::Result;
use crate::extract::SourceConfig;
use crate::services::{Notify, PageFetch};
use crate::storage::{StateMap, StateStore};

/// Summary of one watch pass.
#[derive(Debug, Default)]
pub struct PassOutcome {
    /// Number of sources checked
    pub sources_checked: usize,

    /// Keys of sources with a newly detected report
    pub changed: Vec<String>,

    /// Number of sources whose notify step failed
    pub failures: usize,
}

impl PassOutcome {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Run one pass over the sources in configuration order.
pub async fn run_pass<F: PageFetch, N: Notify>(
    sources: &[SourceConfig],
    fetcher: &F,
    notifier: &N,
    store: &StateStore,
) -> Result<PassOutcome> {
    let mut state = store.load().await;
    let mut outcome = PassOutcome {
        sources_checked: sources.len(),
        ..PassOutcome::default()
    };

    for source in sources {
        let checked = check_source(source, fetcher, notifier, &state).await;
        match checked {
            Ok(Some(new_id)) => {
                log::info!("New report detected for {}", source.display_name);
                state.insert(source.key.clone(), new_id);
                outcome.changed.push(source.key.clone());
            }
            Ok(None) => {
                log::info!("{}: no change", source.display_name);
            }
            Err(e) => {
                outcome.failures += 1;
                log::error!("Check failed for {}: {}", source.key, e);
            }
        }
    }

    if outcome.has_changes() {
        store.save(&state).await?;
        log::info!("State persisted for {} changed source(s)", outcome.changed.len());
    }

    Ok(outcome)
}

/// Check one source.
///
/// Returns the new report id when a change was detected and the
/// notification call completed; `None` when there is nothing to do.
async fn check_source<F: PageFetch, N: Notify>(
    source: &SourceConfig,
    fetcher: &F,
    notifier: &N,
    state: &StateMap,
) -> Result<Option<String>> {
    let Some(html) = fetcher.fetch_page(&source.url).await else {
        return Ok(None);
    };
    let Some(report) = source.extractor.extract(&html, &source.url) else {
        return Ok(None);
    };

    if state.get(&source.key).map(String::as_str) == Some(report.id.as_str()) {
        return Ok(None);
    }

    // State is only advanced after the notify call completes, so a failed
    // delivery is retried on the next pass.
    notifier.send_report(&source.display_name, &report).await?;
    Ok(Some(report.id))
}
