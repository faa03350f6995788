//! Sanitize, format and dispatch.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::event::PlayerIdentity;
use crate::profile::ProfileCache;
use crate::relay::message::{FormattingMode, OutboundMessage};
use crate::relay::sanitize::sanitize_message;
use crate::relay::webhook::WebhookClient;

/// Turns chat utterances into webhook deliveries.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    webhook: Arc<WebhookClient>,
    cache: Arc<ProfileCache>,
    mode: FormattingMode,
}

impl ChatRelay {
    /// Create a relay.
    ///
    /// `mode` must already be the effective mode; see
    /// [`Config::formatting_mode`](crate::config::Config::formatting_mode).
    pub fn new(webhook: Arc<WebhookClient>, cache: Arc<ProfileCache>, mode: FormattingMode) -> Self {
        Self {
            webhook,
            cache,
            mode,
        }
    }

    /// Formatting mode in use.
    pub fn mode(&self) -> FormattingMode {
        self.mode
    }

    /// Build the message for `raw_text` without sending it.
    ///
    /// Returns `None` when nothing is left after sanitizing.
    pub fn prepare(&self, raw_text: &str, player: &PlayerIdentity) -> Option<OutboundMessage> {
        let text = sanitize_message(raw_text);
        if text.is_empty() {
            return None;
        }

        let message = match self.mode {
            FormattingMode::Plain => OutboundMessage::plain(player, &text),
            FormattingMode::Styled => {
                OutboundMessage::styled(player, &text, self.cache.lookup(player.steam_id))
            }
        };
        Some(message)
    }

    /// Relay one chat utterance.
    ///
    /// Delivery runs on a spawned task and this returns immediately; the
    /// outcome is only logged. Returns `None` when the message was
    /// suppressed. Must be called from within a tokio runtime.
    pub fn relay(&self, raw_text: &str, player: &PlayerIdentity) -> Option<JoinHandle<()>> {
        let Some(message) = self.prepare(raw_text, player) else {
            debug!(steam_id = player.steam_id, "Chat message empty after sanitizing, not relayed");
            return None;
        };

        let webhook = Arc::clone(&self.webhook);
        let steam_id = player.steam_id;
        Some(tokio::spawn(async move {
            match webhook.send(&message).await {
                Ok(()) => debug!(steam_id, "Relayed chat message"),
                Err(e) => warn!(steam_id, error = %e, "Failed to relay chat message"),
            }
        }))
    }
}
