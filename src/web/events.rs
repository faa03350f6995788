//! Event ingestion handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::event::HostEvent;
use crate::plugin::{EventOutcome, RelayPlugin};

/// Response body for an accepted event.
#[derive(Debug, Clone, Serialize)]
pub struct EventAccepted {
    /// Event type.
    pub event: &'static str,
    /// What the relay did with it.
    pub outcome: &'static str,
}

fn outcome_str(outcome: EventOutcome) -> &'static str {
    match outcome {
        EventOutcome::Relayed => "relayed",
        EventOutcome::Filtered => "filtered",
        EventOutcome::Suppressed => "suppressed",
        EventOutcome::SessionUpdated => "session_updated",
    }
}

/// `POST /events`
///
/// Always answers `202 Accepted` for a well-formed event; delivery happens
/// afterwards and its outcome is not reported.
pub async fn post_event(
    State(plugin): State<Arc<RelayPlugin>>,
    Json(event): Json<HostEvent>,
) -> (StatusCode, Json<EventAccepted>) {
    let kind = event.kind();
    let outcome = plugin.handle(event);

    (
        StatusCode::ACCEPTED,
        Json(EventAccepted {
            event: kind,
            outcome: outcome_str(outcome),
        }),
    )
}
