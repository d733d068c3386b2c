//! In-memory store, used for local runs and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreClient, StoreResult};

/// A backing store held in a map. Counts fetches so callers can observe
/// whether a lookup reached the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
    fetches: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `pairs`.
    pub fn with_entries<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
            fetches: AtomicU64::new(0),
        }
    }

    /// Writes a value straight to the store, bypassing any cache in front of it.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.data.write().await.insert(key.into(), value.into());
    }

    pub async fn remove(&self, key: &str) -> Option<String> {
        self.data.write().await.remove(key)
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn fetch(&self, key: &str) -> StoreResult<Option<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_found_and_missing() {
        let store = MemoryStore::with_entries([("key1", "value1")]);

        assert_eq!(store.fetch("key1").await.unwrap(), Some("value1".to_string()));
        assert_eq!(store.fetch("nonexistent").await.unwrap(), None);
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_insert_and_remove() {
        let store = MemoryStore::new();

        store.insert("k", "v").await;
        assert_eq!(store.fetch("k").await.unwrap(), Some("v".to_string()));

        assert_eq!(store.remove("k").await, Some("v".to_string()));
        assert_eq!(store.fetch("k").await.unwrap(), None);
    }
}
