//! HTTP event ingress.
//!
//! The game server side posts host events here as JSON.

mod events;
pub mod router;
pub mod server;

pub use events::{post_event, EventAccepted};
pub use router::{create_health_router, create_router};
pub use server::EventServer;
