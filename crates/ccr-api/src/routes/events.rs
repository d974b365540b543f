//! # Event Log
//!
//! Routes:
//! - GET /v1/events?since=N — Events with sequence >= N, oldest first

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use ccr_registry::EventRecord;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub since: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventPage {
    pub events: Vec<EventRecord>,
    /// Pass as `since` to fetch only newer events.
    pub next: u64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/events", get(list_events))
}

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventPage> {
    let ledger = state.ledger.lock();
    let events = ledger.registry().events_since(query.since).to_vec();
    let next = events
        .last()
        .map(|e| e.sequence + 1)
        .unwrap_or(query.since);
    Json(EventPage { events, next })
}
