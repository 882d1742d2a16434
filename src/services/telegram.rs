// src/services/telegram.rs

//! Telegram Bot API gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::Credentials;

const API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT_SECS: u64 = 30;

/// Capability to deliver messages and document uploads to one destination.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Send a text message. `html` enables Telegram HTML parse mode.
    async fn send_message(&self, text: &str, html: bool) -> Result<()>;

    /// Upload a binary document with filename and caption metadata.
    async fn send_document(&self, file_name: &str, caption: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Gateway bound to one bot token and one destination chat.
///
/// The destination is explicit configuration threaded in at construction,
/// never ambient state.
pub struct TelegramGateway {
    client: Client,
    token: String,
    chat_id: String,
}

impl TelegramGateway {
    /// Create a gateway from environment-provided credentials.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token: credentials.token.clone(),
            chat_id: credentials.chat_id.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }
}

/// Minimal Bot API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl ApiResponse {
    fn into_result(self, method: &str) -> Result<()> {
        if self.ok {
            return Ok(());
        }
        Err(AppError::notify(
            method,
            self.description
                .unwrap_or_else(|| "unknown Telegram error".to_string()),
        ))
    }
}

#[async_trait]
impl MessageGateway for TelegramGateway {
    async fn send_message(&self, text: &str, html: bool) -> Result<()> {
        let mut payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        if html {
            payload["parse_mode"] = json!("HTML");
        }

        let response: ApiResponse = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;
        response.into_result("sendMessage")
    }

    async fn send_document(&self, file_name: &str, caption: &str, bytes: Vec<u8>) -> Result<()> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .part("document", part);

        let response: ApiResponse = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        response.into_result("sendDocument")
    }
}
