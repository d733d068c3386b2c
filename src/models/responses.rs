//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to go to the store
    pub misses: u64,
    /// Entries dropped on read because they had expired
    pub expirations: u64,
    /// Entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured cache capacity
    pub capacity: usize,
    /// Configured global expiry in milliseconds
    pub global_expiry_ms: u64,
    /// Configured admission gate size
    pub max_clients: usize,
    /// Admission slots currently free
    pub available_slots: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and proxy settings
    pub fn new(
        stats: &CacheStats,
        capacity: usize,
        global_expiry_ms: u64,
        max_clients: usize,
        available_slots: usize,
    ) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            capacity,
            global_expiry_ms,
            max_clients,
            available_slots,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
