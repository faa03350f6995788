//! Host events delivered to the relay.
//!
//! The game server side posts these as JSON, tagged by `type`:
//!
//! ```json
//! {"type": "chat", "steam_id": 76561198000000000, "name": "Alice", "text": "hello"}
//! {"type": "player_connect", "steam_id": 76561198000000000}
//! {"type": "player_disconnect", "steam_id": 76561198000000000}
//! {"type": "map_end"}
//! ```

use serde::{Deserialize, Serialize};

/// A player as seen by the host: platform account id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// 64-bit Steam account id.
    pub steam_id: u64,
    /// In-game display name.
    pub name: String,
}

impl PlayerIdentity {
    /// Create a new player identity.
    pub fn new(steam_id: u64, name: impl Into<String>) -> Self {
        Self {
            steam_id,
            name: name.into(),
        }
    }

    /// `"<name> (<steam_id>)"`, used both in plain content and as the styled username.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.steam_id)
    }
}

/// Chat command the message was typed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatCommand {
    /// All chat.
    #[default]
    Say,
    /// Team chat.
    SayTeam,
}

impl ChatCommand {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatCommand::Say => "say",
            ChatCommand::SayTeam => "say_team",
        }
    }
}

impl std::fmt::Display for ChatCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat utterance from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Speaker's Steam id.
    pub steam_id: u64,
    /// Speaker's display name.
    pub name: String,
    /// Raw command argument text.
    #[serde(default)]
    pub text: String,
    /// Command used.
    #[serde(default)]
    pub command: ChatCommand,
    /// Speaker is a bot.
    #[serde(default)]
    pub is_bot: bool,
    /// Speaker is the broadcast (HLTV/SourceTV) pseudo-player.
    #[serde(default)]
    pub is_hltv: bool,
}

impl ChatEvent {
    /// Whether this message may enter the relay pipeline.
    ///
    /// Bots, broadcast pseudo-players and empty arguments are dropped here.
    pub fn is_relayable(&self) -> bool {
        !self.is_bot && !self.is_hltv && !self.text.is_empty()
    }

    /// The speaker as a player identity.
    pub fn player(&self) -> PlayerIdentity {
        PlayerIdentity::new(self.steam_id, self.name.clone())
    }
}

/// An event from the host engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A player said something.
    Chat(ChatEvent),
    /// A player finished connecting.
    PlayerConnect {
        /// Connected player's Steam id.
        steam_id: u64,
    },
    /// A player disconnected.
    PlayerDisconnect {
        /// Disconnected player's Steam id.
        steam_id: u64,
    },
    /// The current map or session ended.
    MapEnd,
}

impl HostEvent {
    /// Event name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            HostEvent::Chat(_) => "chat",
            HostEvent::PlayerConnect { .. } => "player_connect",
            HostEvent::PlayerDisconnect { .. } => "player_disconnect",
            HostEvent::MapEnd => "map_end",
        }
    }
}
