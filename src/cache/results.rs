//! Query-result cache.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use super::{CacheStats, CachedResponse, InsertionOrder};

// == Result Cache ==
/// Caches fully computed responses keyed by the exact raw query string.
///
/// Entries expire by age; when the table grows past `max_entries` the single
/// oldest-inserted entry is dropped. The whole cache is cleared whenever the
/// dataset snapshot is repopulated, so no response outlives the data it was
/// computed from.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<String, CachedResponse>,
    order: InsertionOrder,
    ttl: Duration,
    max_entries: usize,
    stats: CacheStats,
}

impl ResultCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            ttl,
            max_entries,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Returns the cached body for `key` if present and fresh.
    ///
    /// An expired entry is removed on probe and counts as a miss.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl) => {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.record_expired();
                self.stats.record_miss();
                self.stats.set_entries(self.entries.len());
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.body.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a computed response, then trims the oldest-inserted entry if
    /// the table has grown past capacity.
    pub fn insert(&mut self, key: String, body: Value) {
        self.entries.insert(key.clone(), CachedResponse::new(body));
        self.order.record(&key);

        if self.entries.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
            }
        }

        self.stats.set_entries(self.entries.len());
    }

    // == Clear ==
    /// Drops every entry. Called when the base dataset is repopulated.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_entries(0);
    }

    // == Sweep Expired ==
    /// Removes all aged-out entries. Returns the number removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expired();
        }

        self.stats.set_entries(self.entries.len());
        expired.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
