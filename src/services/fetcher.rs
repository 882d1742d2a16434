// src/services/fetcher.rs

//! HTTP fetching for source pages and report documents.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::WatcherConfig;

/// Capability to retrieve raw page content.
///
/// Fetch failures are terminal for the current pass only: they are logged
/// and collapse to `None`, and the next scheduled invocation is the retry.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetch a page body, or `None` on any network or protocol failure.
    async fn fetch_page(&self, url: &str) -> Option<String>;
}

/// Capability to download a document's bytes for attachment delivery.
#[async_trait]
pub trait DocumentFetch: Send + Sync {
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetcher backed by a configured `reqwest` client.
pub struct HttpFetcher {
    client: Client,
    file_timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeouts.
    pub fn new(config: &WatcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.page_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            file_timeout: Duration::from_secs(config.file_timeout_secs),
        })
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let text = self.client.get(url).send().await?.text().await?;
        Ok(text)
    }
}

#[async_trait]
impl PageFetch for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl DocumentFetch for HttpFetcher {
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .client
            .get(url)
            .timeout(self.file_timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_default_config() {
        let fetcher = HttpFetcher::new(&WatcherConfig::default()).unwrap();
        assert_eq!(fetcher.file_timeout, Duration::from_secs(15));
    }
}
