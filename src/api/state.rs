//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::event_store::EventStore;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// State handed to every request handler
pub struct AppState {
    /// The one event store for this process
    pub store: Arc<EventStore>,

    /// Applied to every request by the router
    pub request_timeout: Duration,
}

impl AppState {
    /// Create a new AppState around an existing store
    pub fn new(store: Arc<EventStore>) -> Self {
        Self {
            store,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UsageEvent;

    #[test]
    fn test_state_shares_store() {
        let store = Arc::new(EventStore::new());
        let state = AppState::new(Arc::clone(&store));

        state.store.ingest(vec![UsageEvent::new("k", true)]);

        assert_eq!(store.len(), 1);
        assert_eq!(state.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }
}
