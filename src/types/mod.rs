//! Data types for the events receiver
//!
//! Wire-level shapes shared by the store and the HTTP API.

mod event;
mod publish;

pub use event::UsageEvent;
pub use publish::{PublishEventsRequest, PublishEventsResponse};

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default (for nullable producer fields)
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
