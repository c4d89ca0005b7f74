//! Event Store statistics
//!
//! Point-in-time view of the lifetime counters and the retained count.

use serde::{Deserialize, Serialize};

/// Counters as returned by `GET /events/stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    /// Events ingested since start or the last clear
    pub total_received: u64,
    pub total_allowed: u64,
    pub total_denied: u64,
    /// Events currently held in the window (not a lifetime figure)
    pub stored_events: usize,
}
