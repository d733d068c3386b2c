//! Redis Store
//!
//! Backing store client that reads keys from a Redis server.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, info};

use super::{StoreClient, StoreError, StoreResult};

// == Redis Store ==
/// Reads values from Redis over a managed, auto-reconnecting connection.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    address: String,
}

impl RedisStore {
    // == Connect ==
    /// Connects to Redis and verifies the server answers `PING`.
    ///
    /// # Arguments
    /// * `address` - `host:port`, or a full `redis://` / `rediss://` URL
    /// * `connect_timeout` - Upper bound on connecting plus the initial `PING`
    ///
    /// Any failure here means the proxy must not start.
    pub async fn connect(address: &str, connect_timeout: Duration) -> StoreResult<Self> {
        let url = connection_url(address);
        let client = redis::Client::open(url.as_str()).map_err(map_redis_error)?;

        let handshake = async {
            let mut conn = ConnectionManager::new(client)
                .await
                .map_err(map_redis_error)?;
            let pong: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;
            debug!(reply = %pong, "redis handshake complete");
            Ok::<_, StoreError>(conn)
        };

        let conn = tokio::time::timeout(connect_timeout, handshake)
            .await
            .map_err(|_| StoreError::Timeout(connect_timeout))??;

        info!(address = %address, "Connected to redis");

        Ok(Self {
            conn,
            address: address.to_string(),
        })
    }

    /// The address this store was connected with.
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn fetch(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

// == Helpers ==
/// Accepts bare `host:port` addresses as well as URLs.
fn connection_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}", address)
    }
}

fn map_redis_error(err: RedisError) -> StoreError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Protocol(err.to_string())
    }
}
