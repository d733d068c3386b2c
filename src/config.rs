//! Configuration Module
//!
//! Handles loading proxy configuration from command-line flags and environment variables.

use std::time::Duration;

use clap::Parser;

use crate::error::{ProxyError, Result};

/// Proxy configuration parameters.
///
/// Each value may be set by flag, then environment variable, then default.
/// Read once at startup.
#[derive(Debug, Clone, Parser)]
#[command(name = "redis_proxy", version, about = "Read-through caching proxy for Redis")]
pub struct Config {
    /// HTTP port to listen on
    #[arg(long, env = "PROXY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Maximum number of entries the cache can hold
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = 100)]
    pub capacity: usize,

    /// Cache expiration in milliseconds, applied to every entry
    #[arg(long = "global-expiry", env = "GLOBAL_EXPIRY", default_value_t = 60_000)]
    pub global_expiry_ms: u64,

    /// Maximum number of lookups processed concurrently
    #[arg(long, env = "MAX_CLIENTS", default_value_t = 5)]
    pub max_clients: usize,

    /// Redis address, `host:port` or `redis://` URL
    #[arg(long, env = "REDIS_ADDRESS", default_value = "redis:6379")]
    pub redis_address: String,

    /// Timeout in milliseconds for the initial redis connection
    #[arg(long = "connect-timeout", env = "REDIS_CONNECT_TIMEOUT", default_value_t = 5_000)]
    pub connect_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    pub fn load() -> Self {
        Self::parse()
    }

    /// Loads configuration from environment variables and defaults only.
    pub fn from_env() -> Self {
        Self::parse_from(["redis_proxy"])
    }

    // == Validate ==
    /// Rejects values the proxy cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ProxyError::InvalidConfig(
                "capacity must be greater than 0".to_string(),
            ));
        }
        if self.max_clients == 0 {
            return Err(ProxyError::InvalidConfig(
                "max-clients must be greater than 0".to_string(),
            ));
        }
        if self.redis_address.trim().is_empty() {
            return Err(ProxyError::InvalidConfig(
                "redis-address cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn global_expiry(&self) -> Duration {
        Duration::from_millis(self.global_expiry_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            capacity: 100,
            global_expiry_ms: 60_000,
            max_clients: 5,
            redis_address: "redis:6379".to_string(),
            connect_timeout_ms: 5_000,
        }
    }
}
