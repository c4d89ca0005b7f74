//! HTTP server setup with Axum

use std::sync::Arc;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::rest::events;
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Event receiver and query API
        .route(
            "/events",
            get(events::list_events)
                .post(events::publish_events)
                .delete(events::clear_events),
        )
        .route("/events/stats", get(events::get_stats))
        // A full batch of events can exceed axum's 2 MiB default
        .layer(DefaultBodyLimit::disable())
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
