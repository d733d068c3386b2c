//! Shared Cache Handle
//!
//! Wraps [`CacheStore`] in a single mutex so concurrent lookups can use it.

use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Thread-safe handle around a [`CacheStore`].
///
/// Every operation holds the one cache-wide lock for its whole
/// read-check-evict-or-bump sequence, so operations are atomic with respect
/// to each other. Capacity and TTL are fixed at construction.
#[derive(Debug)]
pub struct SharedCache {
    inner: Mutex<CacheStore>,
    capacity: usize,
    ttl: Duration,
}

impl SharedCache {
    /// Creates a new shared cache with the given capacity and global TTL.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(capacity, ttl))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore) -> Self {
        Self {
            capacity: store.capacity(),
            ttl: store.ttl(),
            inner: Mutex::new(store),
        }
    }

    /// See [`CacheStore::get`].
    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().await.get(key)
    }

    /// See [`CacheStore::set`].
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.lock().await.set(key.into(), value.into());
    }

    /// See [`CacheStore::remove`].
    pub async fn remove(&self, key: &str) -> bool {
        self.inner.lock().await.remove(key)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
