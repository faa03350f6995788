//! Router configuration for the event ingress.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::events::post_event;
use crate::plugin::RelayPlugin;

/// Create the event router.
pub fn create_router(plugin: Arc<RelayPlugin>) -> Router {
    Router::new()
        .route("/events", post(post_event))
        .layer(TraceLayer::new_for_http())
        .with_state(plugin)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
