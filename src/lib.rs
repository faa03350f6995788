//! chatrelay - game server chat relay
//!
//! Forwards in-game text chat to a webhook, optionally sending each
//! message under the player's name and Steam avatar.

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod plugin;
pub mod profile;
pub mod relay;
pub mod session;
pub mod web;

pub use config::Config;
pub use error::{RelayError, Result};
pub use event::{ChatCommand, ChatEvent, HostEvent, PlayerIdentity};
pub use plugin::{EventOutcome, RelayPlugin};
pub use profile::{ProfileCache, SteamProfileClient};
pub use relay::{sanitize_message, ChatRelay, FormattingMode, OutboundMessage, WebhookClient};
pub use session::SessionTracker;
pub use web::EventServer;
