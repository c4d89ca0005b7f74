//! REST API module for HTTP endpoints
//!
//! Provides the EdgeQuota events HTTP protocol:
//! - `POST /events` - Receive a batch of usage events
//! - `GET /events` - List stored events, newest first
//! - `GET /events/stats` - Aggregate counters
//! - `DELETE /events` - Clear all stored events

pub mod events;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
