//! Base dataset cache.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::store::Property;

// == Snapshot ==
/// The geocoded dataset plus the new-build reference allow-list, shared
/// cheaply between handlers.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub records: Arc<Vec<Property>>,
    pub new_build_refs: Arc<HashSet<String>>,
}

// == Dataset Cache ==
/// Single-slot, process-lifetime cache of the geocoded record list.
///
/// The slot goes stale after `ttl`; the next request re-reads and re-geocodes
/// the file. Concurrent requests racing a stale slot may each repopulate;
/// the install is idempotent, so the duplication wastes work but nothing
/// else. Repopulation must also clear the result caches, which is the
/// caller's job since this type does not know about them.
#[derive(Debug)]
pub struct DatasetCache {
    snapshot: Option<Snapshot>,
    loaded_at: Option<Instant>,
    ttl: Duration,
    loads: u64,
}

impl DatasetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshot: None,
            loaded_at: None,
            ttl,
            loads: 0,
        }
    }

    // == Fresh Snapshot ==
    /// Returns the snapshot if one is present and within its TTL.
    pub fn fresh(&self) -> Option<Snapshot> {
        match (&self.snapshot, self.loaded_at) {
            (Some(snapshot), Some(loaded_at)) if loaded_at.elapsed() < self.ttl => {
                Some(snapshot.clone())
            }
            _ => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.fresh().is_none()
    }

    // == Install ==
    /// Replaces the slot with freshly loaded data and stamps the capture
    /// time. Returns the installed snapshot.
    pub fn install(&mut self, records: Vec<Property>, new_build_refs: HashSet<String>) -> Snapshot {
        let snapshot = Snapshot {
            records: Arc::new(records),
            new_build_refs: Arc::new(new_build_refs),
        };
        self.snapshot = Some(snapshot.clone());
        self.loaded_at = Some(Instant::now());
        self.loads += 1;
        snapshot
    }

    /// Number of times the slot has been (re)populated from disk.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Records in the current snapshot, 0 when empty.
    pub fn record_count(&self) -> usize {
        self.snapshot
            .as_ref()
            .map(|s| s.records.len())
            .unwrap_or(0)
    }
}
