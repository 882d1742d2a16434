//! Report data structures.

use serde::{Deserialize, Serialize};

/// A single document attached to a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Display label for the document
    pub name: String,

    /// Resolved link to the document resource
    pub url: String,
}

/// A financial report extracted from a source page.
///
/// A record is only constructed with at least one file; extraction that
/// yields zero usable document links produces no record at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRecord {
    /// Report title combined with its date string, e.g. "Q3 Report (2024-10-01)"
    pub title: String,

    /// Stable identifier used for deduplication (URL of the first file)
    pub id: String,

    /// Attached documents, in source-page order
    pub files: Vec<FileDescriptor>,
}

impl ReportRecord {
    /// Build a record from a title and a non-empty file list.
    ///
    /// Returns `None` when `files` is empty: a report with no attachments
    /// is not actionable and is treated as "no report found".
    pub fn from_files(title: String, files: Vec<FileDescriptor>) -> Option<Self> {
        let id = files.first()?.url.clone();
        Some(Self { title, id, files })
    }
}
