// src/extract/listing.rs

//! Selector-driven extractor for structured report listing pages.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::extract::ReportExtractor;
use crate::models::{FileDescriptor, ListingSelectors, ReportRecord};
use crate::utils::resolve;

/// Extractor configured with CSS selectors for one listing layout.
///
/// Selector strings are validated once at construction, so malformed
/// configuration surfaces as an error at startup rather than as a silent
/// "no report" at fetch time.
pub struct ListingExtractor {
    entry: Selector,
    title: Selector,
    date: Selector,
    doc: Selector,
    doc_name: Selector,
    link_attr: String,
}

impl ListingExtractor {
    /// Build an extractor from a selector set.
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            entry: parse_selector(&selectors.entry_selector)?,
            title: parse_selector(&selectors.title_selector)?,
            date: parse_selector(&selectors.date_selector)?,
            doc: parse_selector(&selectors.doc_selector)?,
            doc_name: parse_selector(&selectors.doc_name_selector)?,
            link_attr: selectors.link_attr.clone(),
        })
    }
}

/// Selector set for the Yandex investor-relations financials listing.
pub fn yandex_selectors() -> ListingSelectors {
    ListingSelectors {
        entry_selector: "article.financials-list__item".into(),
        title_selector: "a.financials-list__title-link".into(),
        date_selector: "span.date".into(),
        doc_selector: "a.doc".into(),
        doc_name_selector: "span.doc__name".into(),
        link_attr: "href".into(),
    }
}

impl ReportExtractor for ListingExtractor {
    fn extract(&self, html: &str, base_url: &str) -> Option<ReportRecord> {
        if html.trim().is_empty() {
            return None;
        }

        let document = Html::parse_document(html);

        // First entry is the most recent report
        let entry = document.select(&self.entry).next()?;
        let title = element_text(entry.select(&self.title).next()?);
        let date = element_text(entry.select(&self.date).next()?);
        if title.is_empty() {
            return None;
        }

        let mut files = Vec::new();
        for link in entry.select(&self.doc) {
            let Some(name_elem) = link.select(&self.doc_name).next() else {
                continue;
            };
            let name = element_text(name_elem);
            let Some(href) = link.value().attr(&self.link_attr) else {
                continue;
            };
            if name.is_empty() || href.trim().is_empty() {
                continue;
            }
            files.push(FileDescriptor {
                name,
                url: resolve(base_url, href.trim()),
            });
        }

        ReportRecord::from_files(format!("{title} ({date})"), files)
    }
}

/// Collect the text of an element with normalized whitespace.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
