//! Cached response entry.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cached Response ==
/// A fully computed response body plus its insertion time.
///
/// The owning cache supplies the TTL; entries do not carry their own
/// expiration so a cache-wide TTL change needs no migration.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// The serialized response body
    pub body: Value,
    /// When the entry was inserted
    inserted_at: Instant,
}

impl CachedResponse {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            inserted_at: Instant::now(),
        }
    }

    /// Checks whether the entry has outlived the given TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}
