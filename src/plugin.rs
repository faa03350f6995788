//! Relay plugin: wires the cache, pipeline and session tracker together
//! and routes host events to them.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::event::{ChatEvent, HostEvent};
use crate::profile::{ProfileCache, SteamProfileClient};
use crate::relay::{ChatRelay, FormattingMode, WebhookClient};
use crate::session::SessionTracker;
use crate::Result;

/// Plugin name.
pub const MODULE_NAME: &str = "Chat Relay";

/// Plugin version.
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plugin description.
pub const MODULE_DESCRIPTION: &str = "Relays in-game text chat to a webhook.";

/// What happened to a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Chat was handed to the relay pipeline for delivery.
    Relayed,
    /// Chat was dropped before the pipeline (bot, broadcast or empty argument).
    Filtered,
    /// Chat was empty after sanitizing.
    Suppressed,
    /// A session event was applied to the profile cache.
    SessionUpdated,
}

/// The relay plugin.
#[derive(Debug, Clone)]
pub struct RelayPlugin {
    relay: ChatRelay,
    sessions: SessionTracker,
}

impl RelayPlugin {
    /// Build the plugin from a configuration.
    ///
    /// The configuration is validated first, so a missing webhook URL
    /// prevents the plugin from starting.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mode = config.formatting_mode();
        if config.relay.style == 1 && mode == FormattingMode::Plain {
            warn!("Styled messages need steam_api_key; falling back to plain style");
        }

        let webhook = Arc::new(WebhookClient::new(
            config.relay.webhook_url.trim(),
            config.relay.timeout(),
        )?);

        let profiles = if config.relay.has_steam_api_key() {
            Some(Arc::new(SteamProfileClient::new(
                &config.profile,
                config.relay.steam_api_key.trim(),
            )?))
        } else {
            None
        };

        let cache = Arc::new(ProfileCache::new());
        let plugin = Self {
            relay: ChatRelay::new(webhook, Arc::clone(&cache), mode),
            sessions: SessionTracker::new(cache, profiles),
        };

        info!(
            style = %mode,
            avatar_lookup = config.relay.has_steam_api_key(),
            "{} {} loaded",
            MODULE_NAME,
            MODULE_VERSION
        );

        Ok(plugin)
    }

    /// Formatting mode in use.
    pub fn mode(&self) -> FormattingMode {
        self.relay.mode()
    }

    /// The shared profile cache.
    pub fn cache(&self) -> &Arc<ProfileCache> {
        self.sessions.cache()
    }

    /// Route one host event.
    ///
    /// Never waits on network I/O; outbound calls run on spawned tasks.
    pub fn handle(&self, event: HostEvent) -> EventOutcome {
        debug!(kind = event.kind(), "Host event received");

        match event {
            HostEvent::Chat(chat) => self.on_chat(&chat),
            HostEvent::PlayerConnect { steam_id } => {
                self.sessions.on_connect(steam_id);
                EventOutcome::SessionUpdated
            }
            HostEvent::PlayerDisconnect { steam_id } => {
                self.sessions.on_disconnect(steam_id);
                EventOutcome::SessionUpdated
            }
            HostEvent::MapEnd => {
                self.sessions.on_map_end();
                EventOutcome::SessionUpdated
            }
        }
    }

    fn on_chat(&self, chat: &ChatEvent) -> EventOutcome {
        if !chat.is_relayable() {
            return EventOutcome::Filtered;
        }

        match self.relay.relay(&chat.text, &chat.player()) {
            Some(_) => EventOutcome::Relayed,
            None => EventOutcome::Suppressed,
        }
    }
}
