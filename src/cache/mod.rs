//! # Read-Through Snapshot Cache
//!
//! After a successful read, a JSON snapshot of the product is written to an expiring
//! key-value cache under `product:<id>`. The write is a side-effect only:
//!
//! - it runs on a detached task, so the read response never waits for it
//! - a failure is logged at `warn` and dropped; it never fails the read
//!
//! The cache is reached through the [`ProductCache`] port. [`RedisCache`] is the
//! production adapter; tests plug in their own.

pub mod redis;

pub use self::redis::RedisCache;

use crate::model::Product;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default time-to-live for cached snapshots.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

/// Errors that can occur while writing to the cache.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cannot serialize snapshot: {0}")]
    Serialization(String),
}

/// Expiring key-value store.
#[async_trait]
pub trait ProductCache: Send + Sync {
    async fn put(&self, key: &str, payload: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}

/// Cached representation of a product. Field names follow the JSON consumers already read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.format(),
            name: product.name.clone(),
            description: product.description.clone(),
            stock: product.stock,
            price: product.price.to_major_lossy(),
        }
    }
}

/// Cache key for a product. One entry per product id.
pub fn cache_key(product: &Product) -> String {
    format!("product:{}", product.id)
}

/// Fire-and-forget cache writer used by the read handler.
#[derive(Clone)]
pub struct CacheSideEffect {
    cache: Option<Arc<dyn ProductCache>>,
    ttl: Duration,
}

impl CacheSideEffect {
    pub fn new(cache: Arc<dyn ProductCache>, ttl: Duration) -> Self {
        Self {
            cache: Some(cache),
            ttl,
        }
    }

    /// A side-effect that does nothing, for deployments without a cache.
    pub fn disabled() -> Self {
        Self {
            cache: None,
            ttl: DEFAULT_TTL,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Spawns the cache write for `product` and returns immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn record(&self, product: &Product) {
        let Some(cache) = self.cache.clone() else {
            return;
        };
        let key = cache_key(product);
        let ttl = self.ttl;
        let payload = match serde_json::to_vec(&ProductSnapshot::from(product)) {
            Ok(payload) => payload,
            Err(e) => {
                let error = CacheError::Serialization(e.to_string());
                warn!(%key, error = %error, "Cache write skipped");
                return;
            }
        };

        tokio::spawn(async move {
            match cache.put(&key, payload, ttl).await {
                Ok(()) => debug!(%key, ttl_secs = ttl.as_secs(), "Cached"),
                Err(e) => warn!(%key, error = %e, "Cache write failed"),
            }
        });
    }
}
