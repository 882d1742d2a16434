// src/models/mod.rs

//! Domain models for the watcher application.

mod config;
mod report;

// Re-export all public types
pub use config::{Config, Credentials, ListingSelectors, SourceSpec, WatcherConfig};
pub use report::{FileDescriptor, ReportRecord};
