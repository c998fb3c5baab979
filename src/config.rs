//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON store files
    pub data_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Seconds before the geocoded dataset snapshot is considered stale
    pub base_cache_ttl: u64,
    /// Seconds a cached listing response stays valid
    pub listing_cache_ttl: u64,
    /// Seconds a cached map response stays valid
    pub map_cache_ttl: u64,
    /// Maximum entries per result cache before oldest-inserted eviction
    pub result_cache_max_entries: usize,
    /// Background result-cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_DIR` - Store file directory (default: "data")
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `BASE_CACHE_TTL` - Dataset snapshot TTL in seconds (default: 3600)
    /// - `LISTING_CACHE_TTL` - Listing response TTL in seconds (default: 1800)
    /// - `MAP_CACHE_TTL` - Map response TTL in seconds (default: 900)
    /// - `RESULT_CACHE_MAX_ENTRIES` - Result cache capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            base_cache_ttl: env::var("BASE_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            listing_cache_ttl: env::var("LISTING_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            map_cache_ttl: env::var("MAP_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            result_cache_max_entries: env::var("RESULT_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            server_port: 3000,
            base_cache_ttl: 3600,
            listing_cache_ttl: 1800,
            map_cache_ttl: 900,
            result_cache_max_entries: 1000,
            cleanup_interval: 60,
        }
    }
}
