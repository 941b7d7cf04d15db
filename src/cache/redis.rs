//! Redis adapter for [`ProductCache`].

use super::{CacheError, ProductCache};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{info, instrument};

/// Cache backed by a Redis connection manager, which reconnects on its own.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Opens the connection, giving up after `connect_timeout`.
    #[instrument(skip(url))]
    pub async fn connect(url: &str, connect_timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let manager = tokio::time::timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                CacheError::Unavailable(format!("no response from Redis within {connect_timeout:?}"))
            })?
            .map_err(unavailable)?;
        info!("Connected to Redis");
        Ok(Self { manager })
    }
}

#[async_trait]
impl ProductCache for RedisCache {
    async fn put(&self, key: &str, payload: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, payload, seconds)
            .await
            .map_err(unavailable)
    }
}

fn unavailable(err: redis::RedisError) -> CacheError {
    CacheError::Unavailable(err.to_string())
}
