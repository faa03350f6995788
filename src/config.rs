//! Configuration module for chatrelay.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::relay::FormattingMode;
use crate::{RelayError, Result};

/// Environment variable overriding `relay.webhook_url`.
pub const ENV_WEBHOOK_URL: &str = "CHATRELAY_WEBHOOK_URL";

/// Environment variable overriding `relay.steam_api_key`.
pub const ENV_STEAM_API_KEY: &str = "CHATRELAY_STEAM_API_KEY";

/// Relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Webhook destination for relayed chat. Required.
    #[serde(default)]
    pub webhook_url: String,
    /// Message style (0 = plain, 1 = styled with username and avatar).
    #[serde(default)]
    pub style: u8,
    /// Steam Web API key used for avatar lookups.
    #[serde(default)]
    pub steam_api_key: String,
    /// Total webhook request timeout in seconds.
    #[serde(default = "default_relay_timeout")]
    pub timeout_secs: u64,
}

fn default_relay_timeout() -> u64 {
    10
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            style: 0,
            steam_api_key: String::new(),
            timeout_secs: default_relay_timeout(),
        }
    }
}

impl RelayConfig {
    /// Webhook request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether an avatar lookup key is configured.
    pub fn has_steam_api_key(&self) -> bool {
        !self.steam_api_key.trim().is_empty()
    }
}

/// Profile lookup configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Base URL of the Steam Web API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Total lookup request timeout in seconds.
    #[serde(default = "default_profile_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_profile_timeout() -> u64 {
    10
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_profile_timeout(),
        }
    }
}

impl ProfileConfig {
    /// Lookup request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Event ingress configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    27080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/chatrelay.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Relay configuration.
    #[serde(default)]
    pub relay: RelayConfig,
    /// Profile lookup configuration.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Event ingress configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CHATRELAY_WEBHOOK_URL`: Override the webhook URL
    /// - `CHATRELAY_STEAM_API_KEY`: Override the Steam Web API key
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_WEBHOOK_URL) {
            if !url.is_empty() {
                self.relay.webhook_url = url;
            }
        }

        if let Ok(key) = std::env::var(ENV_STEAM_API_KEY) {
            if !key.is_empty() {
                self.relay.steam_api_key = key;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// The webhook URL is checked first, so a missing URL is always
    /// reported regardless of the other fields.
    pub fn validate(&self) -> Result<()> {
        let webhook_url = self.relay.webhook_url.trim();
        if webhook_url.is_empty() {
            return Err(RelayError::Config(
                "webhook_url is a required field. \
                 Set it in config.toml or via CHATRELAY_WEBHOOK_URL environment variable."
                    .to_string(),
            ));
        }

        validate_http_url("webhook_url", webhook_url)?;

        if FormattingMode::try_from(self.relay.style).is_err() {
            return Err(RelayError::Config(format!(
                "style must be 0 (plain) or 1 (styled), got {}",
                self.relay.style
            )));
        }

        // A zero timeout makes every request fail immediately
        if self.relay.timeout_secs == 0 {
            return Err(RelayError::Config(
                "relay.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.relay.has_steam_api_key() {
            validate_http_url("api_base_url", &self.profile.api_base_url)?;

            if self.profile.timeout_secs == 0 {
                return Err(RelayError::Config(
                    "profile.timeout_secs must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// The formatting mode actually used for relayed messages.
    ///
    /// Styled mode needs a Steam API key; without one the relay always
    /// falls back to plain mode.
    pub fn formatting_mode(&self) -> FormattingMode {
        match FormattingMode::try_from(self.relay.style) {
            Ok(FormattingMode::Styled) if self.relay.has_steam_api_key() => FormattingMode::Styled,
            _ => FormattingMode::Plain,
        }
    }
}

/// Check that a configured URL parses and uses http or https.
fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| RelayError::Config(format!("{field} is not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(RelayError::Config(format!(
                "{field} has unsupported URL scheme: {scheme}"
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(RelayError::Config(format!("{field} has no host")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WEBHOOK: &str = "https://discord.com/api/webhooks/123/abc";

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.relay.webhook_url.is_empty());
        assert_eq!(config.relay.style, 0);
        assert!(config.relay.steam_api_key.is_empty());
        assert_eq!(config.relay.timeout_secs, 10);

        assert_eq!(config.profile.api_base_url, "https://api.steampowered.com");
        assert_eq!(config.profile.timeout_secs, 10);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 27080);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/chatrelay.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[relay]
webhook_url = "https://discord.com/api/webhooks/123/abc"
style = 1
steam_api_key = "ABCDEF"
timeout_secs = 5

[profile]
api_base_url = "http://127.0.0.1:9000"
timeout_secs = 3

[server]
host = "0.0.0.0"
port = 8088

[logging]
level = "debug"
file = "custom/relay.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.relay.webhook_url, WEBHOOK);
        assert_eq!(config.relay.style, 1);
        assert_eq!(config.relay.steam_api_key, "ABCDEF");
        assert_eq!(config.relay.timeout(), Duration::from_secs(5));

        assert_eq!(config.profile.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.profile.timeout(), Duration::from_secs(3));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/relay.log");

        assert!(config.validate().is_ok());
        assert_eq!(config.formatting_mode(), FormattingMode::Styled);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[relay]
webhook_url = "https://discord.com/api/webhooks/123/abc"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.relay.webhook_url, WEBHOOK);
        assert_eq!(config.relay.style, 0);
        assert_eq!(config.server.port, 27080);
        assert_eq!(config.profile.api_base_url, "https://api.steampowered.com");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(matches!(result, Err(RelayError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[relay]\nwebhook_url = \"{WEBHOOK}\"\nstyle = 1").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.relay.webhook_url, WEBHOOK);
        assert_eq!(config.relay.style, 1);
    }

    #[test]
    fn test_validate_missing_webhook() {
        let config = Config::default();

        let result = config.validate();
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("webhook_url"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_missing_webhook_reported_before_other_fields() {
        let mut config = Config::default();
        config.relay.style = 7;
        config.profile.api_base_url = "not a url".to_string();
        config.relay.steam_api_key = "KEY".to_string();

        let result = config.validate();
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("webhook_url is a required field"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_blank_webhook() {
        let mut config = Config::default();
        config.relay.webhook_url = "   ".to_string();

        assert!(matches!(config.validate(), Err(RelayError::Config(_))));
    }

    #[test]
    fn test_validate_webhook_scheme() {
        let mut config = Config::default();
        config.relay.webhook_url = "ftp://example.com/hook".to_string();

        let result = config.validate();
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("unsupported URL scheme"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_webhook_not_a_url() {
        let mut config = Config::default();
        config.relay.webhook_url = "discord webhook".to_string();

        assert!(matches!(config.validate(), Err(RelayError::Config(_))));
    }

    #[test]
    fn test_validate_style_out_of_range() {
        let mut config = Config::default();
        config.relay.webhook_url = WEBHOOK.to_string();
        config.relay.style = 2;

        let result = config.validate();
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("style"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_zero_relay_timeout() {
        let mut config = Config::default();
        config.relay.webhook_url = WEBHOOK.to_string();
        config.relay.timeout_secs = 0;

        let result = config.validate();
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("relay.timeout_secs"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_zero_profile_timeout() {
        let mut config = Config::default();
        config.relay.webhook_url = WEBHOOK.to_string();
        config.relay.steam_api_key = "KEY".to_string();
        config.profile.timeout_secs = 0;

        let result = config.validate();
        if let Err(RelayError::Config(msg)) = result {
            assert!(msg.contains("profile.timeout_secs"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_zero_profile_timeout_ignored_without_key() {
        let mut config = Config::default();
        config.relay.webhook_url = WEBHOOK.to_string();
        config.profile.timeout_secs = 0;

        // No lookups are made without a key
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ok() {
        let mut config = Config::default();
        config.relay.webhook_url = WEBHOOK.to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_formatting_mode_plain_by_default() {
        let config = Config::default();
        assert_eq!(config.formatting_mode(), FormattingMode::Plain);
    }

    #[test]
    fn test_formatting_mode_styled_without_key_falls_back() {
        let mut config = Config::default();
        config.relay.style = 1;

        assert_eq!(config.formatting_mode(), FormattingMode::Plain);

        config.relay.steam_api_key = "  ".to_string();
        assert_eq!(config.formatting_mode(), FormattingMode::Plain);
    }

    #[test]
    fn test_formatting_mode_styled_with_key() {
        let mut config = Config::default();
        config.relay.style = 1;
        config.relay.steam_api_key = "KEY".to_string();

        assert_eq!(config.formatting_mode(), FormattingMode::Styled);
    }

    #[test]
    fn test_apply_env_overrides() {
        let original_url = std::env::var(ENV_WEBHOOK_URL).ok();
        let original_key = std::env::var(ENV_STEAM_API_KEY).ok();

        std::env::set_var(ENV_WEBHOOK_URL, "https://example.com/env-hook");
        std::env::set_var(ENV_STEAM_API_KEY, "");

        let mut config = Config::default();
        config.relay.steam_api_key = "original-key".to_string();
        config.apply_env_overrides();

        assert_eq!(config.relay.webhook_url, "https://example.com/env-hook");
        // Empty values never override
        assert_eq!(config.relay.steam_api_key, "original-key");

        match original_url {
            Some(val) => std::env::set_var(ENV_WEBHOOK_URL, val),
            None => std::env::remove_var(ENV_WEBHOOK_URL),
        }
        match original_key {
            Some(val) => std::env::set_var(ENV_STEAM_API_KEY, val),
            None => std::env::remove_var(ENV_STEAM_API_KEY),
        }
    }
}
