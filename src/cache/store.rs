//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded cache storage with LRU eviction and a single global TTL.
///
/// Expiry is checked lazily on [`get`](Self::get) only. An expired entry that
/// is never read keeps its capacity slot and its place in the recency order
/// until LRU eviction reaches it.
///
/// `CacheStore` takes `&mut self` everywhere; share it through
/// [`SharedCache`](crate::cache::SharedCache).
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied to every entry on insertion
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and global TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, clamped to at least 1
    /// * `ttl` - Lifetime given to every entry from the moment it is set
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if present and not expired, marking the entry most
    /// recently used. An expired entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            trace!(key, "dropped expired entry");
            return None;
        }

        let value = entry.value.clone();
        self.lru.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a key-value pair, expiring `ttl` from now.
    ///
    /// If the key already exists, the value is overwritten and TTL is reset.
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first, whether or not it has expired.
    pub fn set(&mut self, key: String, value: String) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                trace!(key = %evicted_key, "evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(value, self.ttl);
        self.lru.touch(&key);
        self.entries.insert(key, entry);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes an entry by key. Returns whether an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns true if the key occupies a slot, without touching recency or expiry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the current number of entries, expired-but-unread included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const LONG_TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, LONG_TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.ttl(), LONG_TTL);
    }

    #[test]
    fn test_store_zero_capacity_is_clamped() {
        let mut store = CacheStore::new(0, LONG_TTL);
        assert_eq!(store.capacity(), 1);

        store.set("key1".to_string(), "value1".to_string());
        assert_eq!(store.get("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100, LONG_TTL);

        assert_eq!(store.get("nonexistent"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new(100, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());
        assert!(store.remove("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_remove_nonexistent() {
        let mut store = CacheStore::new(100, LONG_TTL);
        assert!(!store.remove("nonexistent"));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());
        store.set("key1".to_string(), "value2".to_string());

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_full_cache_does_not_evict() {
        let mut store = CacheStore::new(2, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());
        store.set("key1".to_string(), "value1b".to_string());

        assert_eq!(store.stats().evictions, 0);
        assert!(store.contains("key1"));
        assert!(store.contains("key2"));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(10, Duration::from_millis(100));

        store.set("k".to_string(), "v".to_string());
        assert_eq!(store.get("k"), Some("v".to_string()));

        sleep(Duration::from_millis(101));

        assert_eq!(store.get("k"), None);
        assert!(!store.contains("k"), "expired entry should be removed on read");
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let mut store = CacheStore::new(10, Duration::from_millis(150));

        store.set("k".to_string(), "v1".to_string());
        sleep(Duration::from_millis(100));
        store.set("k".to_string(), "v2".to_string());
        sleep(Duration::from_millis(100));

        assert_eq!(store.get("k"), Some("v2".to_string()));
    }

    #[test]
    fn test_store_zero_ttl_never_serves() {
        let mut store = CacheStore::new(10, Duration::ZERO);

        store.set("k".to_string(), "v".to_string());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());
        store.set("key3".to_string(), "value3".to_string());

        // Cache is full, adding key4 should evict key1 (oldest)
        store.set("key4".to_string(), "value4".to_string());

        assert_eq!(store.len(), 3);
        assert!(!store.contains("key1"));
        assert!(store.contains("key2"));
        assert!(store.contains("key3"));
        assert!(store.contains("key4"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());
        store.set("key3".to_string(), "value3".to_string());

        // Access key1 to make it most recently used
        store.get("key1");

        // Adding key4 should evict key2 (now oldest)
        store.set("key4".to_string(), "value4".to_string());

        assert!(store.contains("key1"));
        assert!(!store.contains("key2"));
    }

    #[test]
    fn test_store_refresh_in_order_evicts_first_refreshed() {
        let mut store = CacheStore::new(10, LONG_TTL);

        for i in 0..10 {
            store.set(format!("k{}", i), format!("v{}", i));
        }
        for i in 0..10 {
            assert_eq!(store.get(&format!("k{}", i)), Some(format!("v{}", i)));
        }

        store.set("k10".to_string(), "v10".to_string());

        assert!(!store.contains("k0"));
        for i in 1..=10 {
            assert!(store.contains(&format!("k{}", i)), "k{} should survive", i);
        }
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn test_store_expired_entries_hold_capacity() {
        let mut store = CacheStore::new(2, Duration::from_millis(20));

        store.set("a".to_string(), "1".to_string());
        store.set("b".to_string(), "2".to_string());
        sleep(Duration::from_millis(30));

        // Both are expired but unread; inserting evicts by recency, not expiry
        store.set("c".to_string(), "3".to_string());

        assert_eq!(store.len(), 2);
        assert!(!store.contains("a"));
        assert!(store.contains("b"));
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.stats().expirations, 0);
    }

    #[test]
    fn test_store_evicts_unexpired_lru_entry() {
        let mut store = CacheStore::new(1, LONG_TTL);

        store.set("fresh".to_string(), "1".to_string());
        store.set("newer".to_string(), "2".to_string());

        assert_eq!(store.get("fresh"), None);
        assert_eq!(store.get("newer"), Some("2".to_string()));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100, LONG_TTL);

        store.set("key1".to_string(), "value1".to_string());
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
