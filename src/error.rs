//! Error types for chatrelay.

use thiserror::Error;

/// Common error type for chatrelay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    ///
    /// Raised at startup; a relay with an invalid configuration never starts.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for inbound data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Webhook delivery error.
    #[error("webhook error: {0}")]
    Webhook(String),

    /// Profile lookup error.
    #[error("profile lookup error: {0}")]
    ProfileLookup(String),
}

/// Result type alias for chatrelay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
