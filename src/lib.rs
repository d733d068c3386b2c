//! Redis Proxy - a read-through caching proxy
//!
//! Answers key lookups from a bounded in-memory cache with TTL expiration and
//! LRU eviction, reading through to Redis on a miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{ProxyError, Result};
pub use proxy::Proxy;
