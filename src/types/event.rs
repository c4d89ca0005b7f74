//! Usage event type
//!
//! A `UsageEvent` records one rate-limit decision taken by the EdgeQuota edge
//! service. Events are immutable once received: the store only ever hands out
//! shared, read-only views of them.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One usage decision pushed by the edge service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Rate-limit bucket identity
    pub key: String,
    /// Tenant the request was attributed to; empty when none was assigned
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub tenant_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    /// Decision outcome
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed: bool,
    /// Tokens left after the decision
    #[serde(default, deserialize_with = "null_as_default")]
    pub remaining: i64,
    /// Configured burst/limit for the bucket
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: i64,
    /// Producer-supplied timestamp, kept verbatim
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code: i32,
    /// Correlation id; carried through but never interpreted
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub request_id: String,
}

impl UsageEvent {
    /// Create an event for `key` with every other field zeroed
    pub fn new(key: impl Into<String>, allowed: bool) -> Self {
        Self {
            key: key.into(),
            tenant_key: String::new(),
            method: String::new(),
            path: String::new(),
            allowed,
            remaining: 0,
            limit: 0,
            timestamp: String::new(),
            status_code: 0,
            request_id: String::new(),
        }
    }

    /// Builder-style tenant assignment
    pub fn with_tenant(mut self, tenant_key: impl Into<String>) -> Self {
        self.tenant_key = tenant_key.into();
        self
    }

    /// Builder-style request line
    pub fn with_request(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.method = method.into();
        self.path = path.into();
        self
    }

    /// Tenant key as an optional value, `None` when unassigned
    pub fn tenant(&self) -> Option<&str> {
        if self.tenant_key.is_empty() {
            None
        } else {
            Some(&self.tenant_key)
        }
    }

    /// Request id as an optional value, `None` when absent
    pub fn request_id(&self) -> Option<&str> {
        if self.request_id.is_empty() {
            None
        } else {
            Some(&self.request_id)
        }
    }
}
