//! Result-cache sweep task.
//!
//! Expired entries are also dropped lazily on probe; this sweep keeps
//! rarely-repeated query strings from sitting in memory until eviction.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResultCache;

/// Spawns a background task that periodically removes expired entries from
/// both result caches.
///
/// # Arguments
/// * `listing_cache` - Shared listing-response cache
/// * `map_cache` - Shared map-response cache
/// * `interval_secs` - Seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_cleanup_task(
    listing_cache: Arc<RwLock<ResultCache>>,
    map_cache: Arc<RwLock<ResultCache>>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!("starting result-cache sweep task, interval {interval_secs}s");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache = listing_cache.write().await;
                cache.sweep_expired()
            } + {
                let mut cache = map_cache.write().await;
                cache.sweep_expired()
            };

            if removed > 0 {
                info!("result-cache sweep removed {removed} expired entries");
            } else {
                debug!("result-cache sweep found nothing expired");
            }
        }
    })
}
