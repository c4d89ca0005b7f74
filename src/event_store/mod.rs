//! Event Store Module
//!
//! In-memory, bounded storage for usage events:
//! - `EventStore`: window of recent events plus lifetime counters
//! - `EventStats`: consistent read of the counters
//! - `normalize_limit`: query parameter handling for `list`
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌─────────┐    ┌──────────────┐    ┌─────────────────┐
//! │ publish │───►│ ingest()     │───►│ evict oldest    │
//! │ batch   │    │ write lock   │    │ past capacity   │
//! └─────────┘    └──────────────┘    └─────────────────┘
//!
//! Read Path:
//! ┌─────────────┐    ┌──────────────┐
//! │ list/stats  │───►│ read lock,   │───► owned result
//! │             │    │ copy out     │
//! └─────────────┘    └──────────────┘
//! ```

mod query;
mod stats;
mod store;

pub use query::{normalize_limit, normalize_tenant};
pub use stats::EventStats;
pub use store::{EventStore, EventStoreConfig, IngestSummary, DEFAULT_LIST_LIMIT, MAX_RETAINED};
