//! Event endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use super::ApiError;
use crate::api::state::AppState;
use crate::event_store::{normalize_limit, EventStats};
use crate::types::{PublishEventsRequest, PublishEventsResponse, UsageEvent};

/// Query parameters for listing events
///
/// `limit` is kept as raw text so that bad values fall back to the default
/// instead of rejecting the request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListEventsParams {
    /// Only return events for this tenant
    pub tenant_key: Option<String>,
    /// Maximum number of events to return (default: 100)
    pub limit: Option<String>,
}

impl ListEventsParams {
    /// Collect from raw query pairs; the first occurrence of a key wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "tenant_key" => &mut params.tenant_key,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// POST /events - Receive a batch of usage events
///
/// The body is decoded before the store is touched; an undecodable body
/// leaves the store unchanged.
pub async fn publish_events(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PublishEventsResponse>, ApiError> {
    let request: PublishEventsRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected publish request");
        ApiError::bad_request("invalid request body")
    })?;

    let summary = state.store.ingest(request.events);
    info!(
        count = summary.accepted,
        allowed = summary.allowed,
        denied = summary.denied,
        evicted = summary.evicted,
        "events received"
    );

    Ok(Json(PublishEventsResponse::accepted(summary.accepted)))
}

/// GET /events - List stored events, newest first
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Arc<UsageEvent>>> {
    let params = ListEventsParams::from_pairs(pairs);
    let limit = normalize_limit(params.limit.as_deref());
    Json(state.store.list(params.tenant_key.as_deref(), limit))
}

/// GET /events/stats - Lifetime counters and current window size
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<EventStats> {
    Json(state.store.stats())
}

/// DELETE /events - Clear the window and reset counters
pub async fn clear_events(State(state): State<Arc<AppState>>) -> StatusCode {
    state.store.clear();
    info!("events cleared");
    StatusCode::NO_CONTENT
}
