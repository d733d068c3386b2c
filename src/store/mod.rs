//! Store Module
//!
//! The backing key-value store the proxy reads through to.
//!
//! # Implementations
//! - [`RedisStore`] - network client for a Redis server
//! - [`MemoryStore`] - in-process map, for local runs and tests

mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

// == Store Error ==
/// Failure to get an answer from the backing store.
///
/// A missing key is not an error; [`StoreClient::fetch`] returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the store
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store answered with something unusable
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The store did not answer in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Convenience Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Store Client ==
/// Read-only access to the backing store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetches the current value for `key`.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - the key exists
    /// * `Ok(None)` - the store confirmed the key does not exist
    /// * `Err(StoreError)` - the store could not be consulted
    async fn fetch(&self, key: &str) -> StoreResult<Option<String>>;
}
