//! Chat relay pipeline.
//!
//! Sanitizes a chat utterance, formats it as a webhook message and
//! dispatches it without waiting for delivery.

mod message;
mod pipeline;
mod sanitize;
mod webhook;

pub use message::{FormattingMode, OutboundMessage};
pub use pipeline::ChatRelay;
pub use sanitize::{sanitize_message, STRIPPED_CHARS};
pub use webhook::WebhookClient;
