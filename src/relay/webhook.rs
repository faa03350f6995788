//! Webhook delivery client.

use std::time::Duration;

use reqwest::Client;

use crate::error::{RelayError, Result};
use crate::relay::message::OutboundMessage;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// User agent string for webhook requests.
const USER_AGENT: &str = concat!("chatrelay/", env!("CARGO_PKG_VERSION"));

/// Posts outbound messages to a fixed webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: url::Url,
}

impl WebhookClient {
    /// Create a client for `url` with a total request timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = url::Url::parse(url)
            .map_err(|e| RelayError::Config(format!("invalid webhook URL: {}", e)))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Webhook(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    /// The destination URL.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// POST `message` as JSON.
    ///
    /// Any non-2xx status is a delivery failure.
    pub async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await
            .map_err(|e| RelayError::Webhook(format!("failed to deliver message: {}", e)))?;

        if !response.status().is_success() {
            return Err(RelayError::Webhook(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
