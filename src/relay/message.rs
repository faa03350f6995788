//! Outbound webhook message and formatting modes.

use serde::Serialize;

use crate::event::PlayerIdentity;

/// How relayed chat is rendered at the webhook destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormattingMode {
    /// Name and id inline with the text, no overrides.
    #[default]
    Plain,
    /// Name and id as the webhook username, avatar from the profile cache.
    Styled,
}

impl FormattingMode {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormattingMode::Plain => "plain",
            FormattingMode::Styled => "styled",
        }
    }
}

impl TryFrom<u8> for FormattingMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FormattingMode::Plain),
            1 => Ok(FormattingMode::Styled),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for FormattingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Webhook execute payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Plain-text message body.
    pub content: String,
    /// Username override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Text-to-speech; never enabled for relayed chat.
    pub tts: bool,
}

impl OutboundMessage {
    /// `` <name> (<id>): `<text>` `` with no overrides.
    ///
    /// `text` must already be sanitized.
    pub fn plain(player: &PlayerIdentity, text: &str) -> Self {
        Self {
            content: format!("{}: `{}`", player.label(), text),
            username: None,
            avatar_url: None,
            tts: false,
        }
    }

    /// `` `<text>` `` sent as `<name> (<id>)` with an optional avatar.
    ///
    /// `text` must already be sanitized.
    pub fn styled(player: &PlayerIdentity, text: &str, avatar_url: Option<String>) -> Self {
        Self {
            content: format!("`{}`", text),
            username: Some(player.label()),
            avatar_url,
            tts: false,
        }
    }
}
