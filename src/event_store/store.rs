//! Event Store - bounded in-memory window of usage events
//!
//! The EventStore keeps the most recent events in arrival order together
//! with lifetime counters. Window and counters sit behind one `RwLock` so
//! every read sees them as of the same instant.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use super::query::normalize_tenant;
use super::stats::EventStats;
use crate::types::UsageEvent;

/// Default number of events retained in the window
pub const MAX_RETAINED: usize = 10_000;

/// Default number of events returned by `list`
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Configuration for the EventStore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStoreConfig {
    /// Maximum number of events kept in the window
    pub max_retained: usize,
}

impl Default for EventStoreConfig {
    fn default() -> Self {
        Self {
            max_retained: MAX_RETAINED,
        }
    }
}

impl EventStoreConfig {
    /// Create config with a custom window capacity
    pub fn new(max_retained: usize) -> Self {
        Self { max_retained }
    }
}

/// Outcome of a single batch ingest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Number of events accepted (always the batch size)
    pub accepted: usize,
    pub allowed: u64,
    pub denied: u64,
    /// Events dropped from the front of the window to stay within capacity
    pub evicted: usize,
}

/// State guarded by the store lock.
#[derive(Debug)]
struct EventWindow {
    events: VecDeque<Arc<UsageEvent>>,
    total_received: u64,
    total_allowed: u64,
    total_denied: u64,
}

impl EventWindow {
    fn new() -> Self {
        Self {
            events: VecDeque::new(),
            total_received: 0,
            total_allowed: 0,
            total_denied: 0,
        }
    }
}

/// Concurrency-safe bounded event store
///
/// `ingest` and `clear` take the write lock; `list`, `stats` and `snapshot`
/// take the read lock. No lock is held after an operation returns.
#[derive(Debug)]
pub struct EventStore {
    config: EventStoreConfig,
    window: RwLock<EventWindow>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Create a new EventStore retaining up to `MAX_RETAINED` events
    pub fn new() -> Self {
        Self::with_config(EventStoreConfig::default())
    }

    /// Create a new EventStore with custom config
    pub fn with_config(config: EventStoreConfig) -> Self {
        Self {
            config,
            window: RwLock::new(EventWindow::new()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &EventStoreConfig {
        &self.config
    }

    /// Maximum number of retained events
    pub fn capacity(&self) -> usize {
        self.config.max_retained
    }

    /// Append a batch and advance the lifetime counters
    ///
    /// The whole batch is applied under one write lock, so readers observe
    /// either none or all of it. Counters advance by the full batch even for
    /// events that are immediately evicted.
    pub fn ingest(&self, batch: Vec<UsageEvent>) -> IngestSummary {
        let accepted = batch.len();
        let allowed = batch.iter().filter(|e| e.allowed).count() as u64;
        let denied = accepted as u64 - allowed;

        // Only the tail of an oversized batch can survive.
        let capacity = self.config.max_retained;
        let skip = accepted.saturating_sub(capacity);
        let incoming: Vec<Arc<UsageEvent>> = batch.into_iter().skip(skip).map(Arc::new).collect();

        let mut window = self.window.write();

        let overflow = (window.events.len() + incoming.len()).saturating_sub(capacity);
        window.events.drain(..overflow);
        window.events.extend(incoming);

        window.total_received += accepted as u64;
        window.total_allowed += allowed;
        window.total_denied += denied;

        IngestSummary {
            accepted,
            allowed,
            denied,
            evicted: skip + overflow,
        }
    }

    /// List retained events newest-first
    ///
    /// An empty or absent `tenant_filter` disables filtering; otherwise only
    /// events whose tenant key equals it exactly are returned. At most
    /// `limit` events are returned.
    pub fn list(&self, tenant_filter: Option<&str>, limit: usize) -> Vec<Arc<UsageEvent>> {
        let tenant_filter = normalize_tenant(tenant_filter);
        let window = self.window.read();

        window
            .events
            .iter()
            .rev()
            .filter(|e| tenant_filter.map_or(true, |t| e.tenant_key == t))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Read all counters and the retained count as of one instant
    pub fn stats(&self) -> EventStats {
        let window = self.window.read();
        EventStats {
            total_received: window.total_received,
            total_allowed: window.total_allowed,
            total_denied: window.total_denied,
            stored_events: window.events.len(),
        }
    }

    /// Empty the window and zero the counters
    pub fn clear(&self) {
        let mut window = self.window.write();
        window.events.clear();
        window.total_received = 0;
        window.total_allowed = 0;
        window.total_denied = 0;
    }

    /// Copy of the whole window, oldest first
    pub fn snapshot(&self) -> Vec<Arc<UsageEvent>> {
        self.window.read().events.iter().cloned().collect()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.window.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
