// src/services/mod.rs

//! Network-facing services: fetching, messaging, delivery.

pub mod fetcher;
pub mod notifier;
pub mod telegram;

pub use fetcher::{DocumentFetch, HttpFetcher, PageFetch};
pub use notifier::{Notify, ReportNotifier};
pub use telegram::{MessageGateway, TelegramGateway};
