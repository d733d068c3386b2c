//! Proxy Module
//!
//! Read-through orchestration between inbound lookups, the cache and the
//! backing store, with a bounded number of lookups in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, SharedCache};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::store::{RedisStore, StoreClient};

// == Proxy ==
/// Serves point lookups cache-first, falling back to the backing store.
///
/// # Lookup protocol
/// 1. Wait for one of `max_clients` admission slots
/// 2. Cache hit: return the cached value, the store is not consulted
/// 3. Cache miss: fetch from the store
///    - found: populate the cache, return the value
///    - not found: [`ProxyError::NotFound`], nothing is cached
///    - failure: [`ProxyError::Store`], nothing is cached
///
/// The slot is released when the lookup returns, on every path.
///
/// Concurrent misses for the same key each go to the store; the last `set`
/// wins.
pub struct Proxy {
    cache: SharedCache,
    store: Arc<dyn StoreClient>,
    gate: Semaphore,
    max_clients: usize,
}

impl Proxy {
    // == Constructors ==
    /// Builds a proxy over an already-connected store.
    ///
    /// Capacity and max clients are clamped to at least 1; use
    /// [`Config::validate`] to reject zero values instead.
    pub fn new(store: Arc<dyn StoreClient>, config: &Config) -> Self {
        let max_clients = config.max_clients.max(1);
        Self {
            cache: SharedCache::new(config.capacity, config.global_expiry()),
            store,
            gate: Semaphore::new(max_clients),
            max_clients,
        }
    }

    /// Validates `config`, connects to Redis and builds the proxy.
    ///
    /// Fails if the configuration is invalid or Redis cannot be reached; no
    /// proxy is returned in either case.
    pub async fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let store = RedisStore::connect(&config.redis_address, config.connect_timeout()).await?;
        info!(
            "Proxy ready: capacity={}, global_expiry={}ms, max_clients={}",
            config.capacity, config.global_expiry_ms, config.max_clients
        );

        Ok(Self::new(Arc::new(store), config))
    }

    // == Lookup ==
    /// Resolves `key` through the cache, reading through to the store on a miss.
    pub async fn lookup(&self, key: &str) -> Result<String> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ProxyError::Internal("admission gate closed".to_string()))?;

        if let Some(value) = self.cache.get(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }

        match self.store.fetch(key).await {
            Ok(Some(value)) => {
                debug!(key, "cache miss, populated from store");
                self.cache.set(key, value.clone()).await;
                Ok(value)
            }
            Ok(None) => {
                debug!(key, "key not found in store");
                Err(ProxyError::NotFound(key.to_string()))
            }
            Err(err) => {
                error!(key, error = %err, "store fetch failed");
                Err(err.into())
            }
        }
    }

    // == Introspection ==
    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn global_expiry(&self) -> Duration {
        self.cache.ttl()
    }

    pub fn max_clients(&self) -> usize {
        self.max_clients
    }

    /// Admission slots not currently held by a lookup.
    pub fn available_slots(&self) -> usize {
        self.gate.available_permits()
    }
}
