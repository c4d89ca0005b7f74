//! EdgeQuota Events Receiver
//!
//! Receives batches of usage events pushed by the EdgeQuota edge service,
//! keeps the most recent ones in a bounded in-memory window and serves a
//! small query API over them. Events arrive over HTTP/JSON or gRPC.
//!
//! # Features
//!
//! - **Bounded memory**: oldest events are evicted past a fixed capacity
//! - **Lifetime counters**: received/allowed/denied totals independent of eviction
//! - **Thread-Safe**: one `RwLock` guards window and counters together
//! - **Snapshots**: query results never change after they are returned
//!
//! # Modules
//!
//! - `types`: Wire data structures (UsageEvent, publish request/response)
//! - `event_store`: The bounded event store and its statistics
//! - `api`: Axum router, REST handlers and the gRPC `EventService`
//! - `config`: Flag/environment configuration
//! - `server`: Listener setup and graceful shutdown
//!
//! # Example
//!
//! ```
//! use edgequota_events::{EventStore, UsageEvent};
//!
//! let store = EventStore::new();
//! store.ingest(vec![
//!     UsageEvent::new("10.0.0.1", true).with_tenant("tenant-1"),
//!     UsageEvent::new("10.0.0.1", false).with_tenant("tenant-1"),
//! ]);
//!
//! let stats = store.stats();
//! assert_eq!(stats.total_received, 2);
//! assert_eq!(store.list(Some("tenant-1"), 10).len(), 2);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod event_store;
pub mod logging;
pub mod server;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ServerError, ServerResult};
pub use event_store::{EventStats, EventStore, EventStoreConfig, IngestSummary, MAX_RETAINED};
pub use types::{PublishEventsRequest, PublishEventsResponse, UsageEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
