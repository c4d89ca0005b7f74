//! Batch publish request/response bodies

use serde::{Deserialize, Serialize};

use super::{null_as_default, UsageEvent};

/// Body of `POST /events`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishEventsRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<UsageEvent>,
}

/// Response to a batch publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishEventsResponse {
    /// Always the size of the published batch
    pub accepted: u64,
}

impl PublishEventsResponse {
    pub fn accepted(count: usize) -> Self {
        Self {
            accepted: count as u64,
        }
    }
}
