// src/services/notifier.rs

//! Report delivery policy.
//!
//! One rich-text summary message, then each attached file either as a
//! document upload or as a plain-text fallback line. File deliveries are
//! isolated from each other: a failed attachment degrades to the fallback
//! and never aborts the rest of the report.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FileDescriptor, ReportRecord};
use crate::services::fetcher::DocumentFetch;
use crate::services::telegram::MessageGateway;
use crate::utils::url;

/// Extensions Telegram renders well as direct uploads.
const EMBEDDABLE_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Capability to deliver a detected report.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Deliver the summary and files for one report.
    ///
    /// An error means the summary itself could not be sent; file-level
    /// failures are absorbed internally.
    async fn send_report(&self, display_name: &str, report: &ReportRecord) -> Result<()>;
}

/// Notifier combining a message gateway with a document fetcher.
pub struct ReportNotifier<G, F> {
    gateway: G,
    fetcher: F,
}

impl<G: MessageGateway, F: DocumentFetch> ReportNotifier<G, F> {
    pub fn new(gateway: G, fetcher: F) -> Self {
        Self { gateway, fetcher }
    }

    /// Fetch a file's bytes and upload them as a document.
    async fn send_as_document(&self, file: &FileDescriptor) -> Result<()> {
        let bytes = self.fetcher.fetch_document(&file.url).await?;
        let file_name =
            url::file_name(&file.url).unwrap_or_else(|| "document".to_string());
        self.gateway
            .send_document(&file_name, &file.name, bytes)
            .await
    }

    /// Deliver one file, falling back to a text line on any failure.
    async fn deliver_file(&self, file: &FileDescriptor) {
        if is_embeddable(&file.url) {
            match self.send_as_document(file).await {
                Ok(()) => return,
                Err(e) => {
                    log::warn!("Document delivery failed for {}: {}", file.url, e);
                }
            }
        }

        let fallback = format!("📄 {}\n{}", file.name, file.url);
        if let Err(e) = self.gateway.send_message(&fallback, false).await {
            log::warn!("Fallback message failed for {}: {}", file.url, e);
        }
    }
}

#[async_trait]
impl<G: MessageGateway, F: DocumentFetch> Notify for ReportNotifier<G, F> {
    async fn send_report(&self, display_name: &str, report: &ReportRecord) -> Result<()> {
        let summary = format!(
            "🔔 <b>New report: {}</b>\n{}",
            escape_html(display_name),
            escape_html(&report.title)
        );
        self.gateway.send_message(&summary, true).await?;

        for file in &report.files {
            self.deliver_file(file).await;
        }
        Ok(())
    }
}

/// Whether a link target can be delivered as a direct upload.
fn is_embeddable(link: &str) -> bool {
    url::extension(link)
        .map(|ext| EMBEDDABLE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Escape text interpolated into Telegram HTML-mode markup.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Message { text: String, html: bool },
        Document { file_name: String, caption: String, len: usize },
    }

    #[derive(Clone, Default)]
    struct MockGateway {
        events: Arc<Mutex<Vec<Event>>>,
        fail_messages: bool,
        fail_documents: bool,
    }

    #[async_trait]
    impl MessageGateway for MockGateway {
        async fn send_message(&self, text: &str, html: bool) -> Result<()> {
            if self.fail_messages {
                return Err(AppError::notify("sendMessage", "mock failure"));
            }
            self.events.lock().unwrap().push(Event::Message {
                text: text.to_string(),
                html,
            });
            Ok(())
        }

        async fn send_document(
            &self,
            file_name: &str,
            caption: &str,
            bytes: Vec<u8>,
        ) -> Result<()> {
            if self.fail_documents {
                return Err(AppError::notify("sendDocument", "mock failure"));
            }
            self.events.lock().unwrap().push(Event::Document {
                file_name: file_name.to_string(),
                caption: caption.to_string(),
                len: bytes.len(),
            });
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockFetcher {
        fail: bool,
    }

    #[async_trait]
    impl DocumentFetch for MockFetcher {
        async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
            if self.fail {
                return Err(AppError::notify("fetch", format!("unreachable: {url}")));
            }
            Ok(vec![0u8; 16])
        }
    }

    fn report() -> ReportRecord {
        ReportRecord {
            title: "Q3 Report (2024-10-01)".into(),
            id: "https://host/q3.pdf".into(),
            files: vec![
                FileDescriptor {
                    name: "Q3 Report".into(),
                    url: "https://host/q3.pdf".into(),
                },
                FileDescriptor {
                    name: "Webcast".into(),
                    url: "https://host/webcast".into(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_summary_then_document_then_fallback() {
        let gateway = MockGateway::default();
        let events = Arc::clone(&gateway.events);
        let notifier = ReportNotifier::new(gateway, MockFetcher::default());

        notifier.send_report("Yandex", &report()).await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            Event::Message {
                text: "🔔 <b>New report: Yandex</b>\nQ3 Report (2024-10-01)".into(),
                html: true,
            }
        );
        // PDF goes up as a document, the extension-less link falls back
        assert_eq!(
            events[1],
            Event::Document {
                file_name: "q3.pdf".into(),
                caption: "Q3 Report".into(),
                len: 16,
            }
        );
        assert_eq!(
            events[2],
            Event::Message {
                text: "📄 Webcast\nhttps://host/webcast".into(),
                html: false,
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_and_continues() {
        let gateway = MockGateway::default();
        let events = Arc::clone(&gateway.events);
        let notifier = ReportNotifier::new(gateway, MockFetcher { fail: true });

        notifier.send_report("Yandex", &report()).await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            Event::Message {
                text: "📄 Q3 Report\nhttps://host/q3.pdf".into(),
                html: false,
            }
        );
        assert_eq!(
            events[2],
            Event::Message {
                text: "📄 Webcast\nhttps://host/webcast".into(),
                html: false,
            }
        );
    }

    #[tokio::test]
    async fn test_document_rejection_falls_back() {
        let gateway = MockGateway {
            fail_documents: true,
            ..MockGateway::default()
        };
        let events = Arc::clone(&gateway.events);
        let notifier = ReportNotifier::new(gateway, MockFetcher::default());

        notifier.send_report("Yandex", &report()).await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[1], Event::Message { text, .. } if text.contains("q3.pdf")));
    }

    #[tokio::test]
    async fn test_summary_failure_aborts_notify() {
        let gateway = MockGateway {
            fail_messages: true,
            ..MockGateway::default()
        };
        let events = Arc::clone(&gateway.events);
        let notifier = ReportNotifier::new(gateway, MockFetcher::default());

        assert!(notifier.send_report("Yandex", &report()).await.is_err());
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_escapes_html() {
        let gateway = MockGateway::default();
        let events = Arc::clone(&gateway.events);
        let notifier = ReportNotifier::new(gateway, MockFetcher::default());

        let mut record = report();
        record.title = "Q3 <Interim> & Annual".into();
        notifier.send_report("A&B", &record).await.unwrap();

        let events = events.lock().unwrap();
        assert!(matches!(
            &events[0],
            Event::Message { text, .. }
                if text.contains("A&amp;B") && text.contains("Q3 &lt;Interim&gt; &amp; Annual")
        ));
    }

    #[test]
    fn test_is_embeddable() {
        assert!(is_embeddable("https://host/q3.pdf"));
        assert!(is_embeddable("https://host/chart.JPG"));
        assert!(is_embeddable("https://host/q3.pdf?dl=1"));
        assert!(!is_embeddable("https://host/q3.xlsx"));
        assert!(!is_embeddable("https://host/webcast"));
    }
}
