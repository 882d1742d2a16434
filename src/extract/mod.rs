// src/extract/mod.rs

//! Report extraction.
//!
//! Each monitored source binds an extractor that turns raw page content
//! into a [`ReportRecord`]. Extraction is defensive: absent content,
//! missing structural elements, or unusable document links all collapse
//! to `None` rather than an error.

mod listing;

pub use listing::{ListingExtractor, yandex_selectors};

use crate::error::{AppError, Result};
use crate::models::{Config, ReportRecord, SourceSpec};

/// Capability to parse raw page content into a report record.
pub trait ReportExtractor: Send + Sync {
    /// Parse raw HTML into a report, or `None` when no report is found.
    ///
    /// `base_url` is the page the content was fetched from, used to
    /// resolve relative document links.
    fn extract(&self, html: &str, base_url: &str) -> Option<ReportRecord>;
}

impl std::fmt::Debug for dyn ReportExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReportExtractor")
    }
}

/// A source with its extractor bound, ready for the watch pass.
pub struct SourceConfig {
    /// State-store key
    pub key: String,

    /// Label used in notifications
    pub display_name: String,

    /// Page to fetch
    pub url: String,

    /// Parser bound to this source's page structure
    pub extractor: Box<dyn ReportExtractor>,
}

/// Build the extractor named by a source spec.
///
/// Known kinds: `"yandex"` (built-in preset) and `"listing"` (selector
/// set supplied inline in the source's configuration).
pub fn build_extractor(spec: &SourceSpec) -> Result<Box<dyn ReportExtractor>> {
    match spec.extractor.as_str() {
        "yandex" => Ok(Box::new(ListingExtractor::new(&yandex_selectors())?)),
        "listing" => {
            let selectors = spec.selectors.as_ref().ok_or_else(|| {
                AppError::config(format!(
                    "Source {} uses extractor \"listing\" but has no [sources.selectors] table",
                    spec.key
                ))
            })?;
            Ok(Box::new(ListingExtractor::new(selectors)?))
        }
        other => Err(AppError::config(format!(
            "Source {} names unknown extractor \"{other}\"",
            spec.key
        ))),
    }
}

/// Bind every configured source to its extractor, preserving order.
pub fn build_sources(config: &Config) -> Result<Vec<SourceConfig>> {
    config
        .sources
        .iter()
        .map(|spec| {
            Ok(SourceConfig {
                key: spec.key.clone(),
                display_name: spec.name.clone(),
                url: spec.url.clone(),
                extractor: build_extractor(spec)?,
            })
        })
        .collect()
}
