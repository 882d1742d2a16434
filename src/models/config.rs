//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and state-file behavior settings
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Monitored sources
    #[serde(default = "defaults::default_sources")]
    pub sources: Vec<SourceSpec>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.watcher.user_agent.trim().is_empty() {
            return Err(AppError::config("watcher.user_agent is empty"));
        }
        if self.watcher.page_timeout_secs == 0 {
            return Err(AppError::config("watcher.page_timeout_secs must be > 0"));
        }
        if self.watcher.file_timeout_secs == 0 {
            return Err(AppError::config("watcher.file_timeout_secs must be > 0"));
        }
        if self.watcher.state_file.trim().is_empty() {
            return Err(AppError::config("watcher.state_file is empty"));
        }
        if self.sources.is_empty() {
            return Err(AppError::config("No sources defined"));
        }

        let mut seen = std::collections::HashSet::new();
        for source in &self.sources {
            if source.key.trim().is_empty() {
                return Err(AppError::config("Source with empty key"));
            }
            if !seen.insert(source.key.as_str()) {
                return Err(AppError::config(format!(
                    "Duplicate source key: {}",
                    source.key
                )));
            }
            if source.url.trim().is_empty() {
                return Err(AppError::config(format!(
                    "Source {} has an empty url",
                    source.key
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watcher: WatcherConfig::default(),
            sources: defaults::default_sources(),
        }
    }
}

/// HTTP client and state-file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Page fetch timeout in seconds
    #[serde(default = "defaults::page_timeout")]
    pub page_timeout_secs: u64,

    /// Document download timeout in seconds
    #[serde(default = "defaults::file_timeout")]
    pub file_timeout_secs: u64,

    /// Path of the persisted last-seen state file
    #[serde(default = "defaults::state_file")]
    pub state_file: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            page_timeout_secs: defaults::page_timeout(),
            file_timeout_secs: defaults::file_timeout(),
            state_file: defaults::state_file(),
        }
    }
}

/// One monitored company/feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Stable internal identifier, used as the state-store key
    pub key: String,

    /// Human-readable label used in notifications
    pub name: String,

    /// Page to fetch
    pub url: String,

    /// Extractor preset bound to this source's page structure
    #[serde(default = "defaults::extractor_kind")]
    pub extractor: String,

    /// Inline selector set, used when `extractor = "listing"`
    #[serde(default)]
    pub selectors: Option<ListingSelectors>,
}

/// CSS selector set for a structured report listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selector for the most recent report entry
    pub entry_selector: String,

    /// Selector for the title element within the entry
    pub title_selector: String,

    /// Selector for the date element within the entry
    pub date_selector: String,

    /// Selector for document link elements within the entry
    pub doc_selector: String,

    /// Selector for the display-name element within a document link
    pub doc_name_selector: String,

    /// HTML attribute holding the link target
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,
}

/// Messaging-backend credentials, read from the process environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Telegram bot token
    pub token: String,

    /// Destination chat identifier
    pub chat_id: String,
}

impl Credentials {
    /// Read `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` from the environment.
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_TOKEN")
            .map_err(|_| AppError::config("TELEGRAM_TOKEN is not set"))?;
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .map_err(|_| AppError::config("TELEGRAM_CHAT_ID is not set"))?;
        if token.trim().is_empty() {
            return Err(AppError::config("TELEGRAM_TOKEN is empty"));
        }
        if chat_id.trim().is_empty() {
            return Err(AppError::config("TELEGRAM_CHAT_ID is empty"));
        }
        Ok(Self { token, chat_id })
    }
}

mod defaults {
    use super::SourceSpec;

    // Watcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; irwatch/0.1)".into()
    }
    pub fn page_timeout() -> u64 {
        10
    }
    pub fn file_timeout() -> u64 {
        15
    }
    pub fn state_file() -> String {
        "report_state.json".into()
    }
    pub fn extractor_kind() -> String {
        "yandex".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }

    // Source defaults
    pub fn default_sources() -> Vec<SourceSpec> {
        vec![SourceSpec {
            key: "yandex".to_string(),
            name: "Yandex".to_string(),
            url: "https://ir.yandex.ru/".to_string(),
            extractor: "yandex".to_string(),
            selectors: None,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.watcher.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.watcher.page_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_keys() {
        let mut config = Config::default();
        let dup = config.sources[0].clone();
        config.sources.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_source_list() {
        let config = Config {
            sources: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_source_with_inline_selectors() {
        let toml_str = r#"
            [[sources]]
            key = "acme"
            name = "Acme Corp"
            url = "https://ir.acme.example/reports"
            extractor = "listing"

            [sources.selectors]
            entry_selector = "article.report"
            title_selector = "a.report-title"
            date_selector = "span.date"
            doc_selector = "a.doc"
            doc_name_selector = "span.doc-name"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.len(), 1);
        let selectors = config.sources[0].selectors.as_ref().unwrap();
        assert_eq!(selectors.entry_selector, "article.report");
        assert_eq!(selectors.link_attr, "href");
    }
}
