//! Steam Web API avatar lookup.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::ProfileConfig;
use crate::error::{RelayError, Result};

/// Player summaries endpoint, relative to the API base URL.
const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("chatrelay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct PlayerSummariesResponse {
    response: PlayerSummaries,
}

#[derive(Debug, Deserialize)]
struct PlayerSummaries {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    #[serde(default)]
    steamid: String,
    #[serde(default)]
    avatarfull: Option<String>,
}

/// Extract the avatar URL for `steam_id` from a `GetPlayerSummaries` body.
///
/// The record matching `steam_id` wins. The first record is used only when
/// it carries no `steamid` at all; a record for a different account is never
/// used. An empty player list, no usable record or a record without
/// `avatarfull` yields `Ok(None)`.
pub fn parse_player_summaries(body: &[u8], steam_id: u64) -> Result<Option<String>> {
    let parsed: PlayerSummariesResponse = serde_json::from_slice(body)
        .map_err(|e| RelayError::ProfileLookup(format!("malformed response: {}", e)))?;

    let wanted = steam_id.to_string();
    let players = parsed.response.players;
    let player = players
        .iter()
        .find(|p| p.steamid == wanted)
        .or_else(|| players.first().filter(|p| p.steamid.is_empty()));

    Ok(player
        .and_then(|p| p.avatarfull.as_deref())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string))
}

/// Client for the Steam player summaries API.
#[derive(Debug, Clone)]
pub struct SteamProfileClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SteamProfileClient {
    /// Create a client using the configured API base URL and timeout.
    pub fn new(config: &ProfileConfig, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(&config.api_base_url, api_key, config.timeout())
    }

    /// Create a client for an explicit base URL.
    pub fn with_timeout(
        api_base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                RelayError::ProfileLookup(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                api_base_url.trim_end_matches('/'),
                PLAYER_SUMMARIES_PATH
            ),
            api_key: api_key.into(),
        })
    }

    /// Fetch the full-size avatar URL for `steam_id`.
    ///
    /// `Ok(None)` means the API answered but knows no avatar for the id.
    pub async fn fetch_avatar(&self, steam_id: u64) -> Result<Option<String>> {
        let steam_id_param = steam_id.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("steamids", steam_id_param.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| RelayError::ProfileLookup(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RelayError::ProfileLookup(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::ProfileLookup(format!("failed to read response: {}", e)))?;

        parse_player_summaries(&bytes, steam_id)
    }
}
