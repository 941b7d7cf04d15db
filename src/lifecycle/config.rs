//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

/// Which [`ProductStore`](crate::store::ProductStore) backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// MongoDB collection at `--mongodb-uri`.
    Mongo,
    /// In-process collection actor. Data is lost on exit.
    Memory,
}

/// gRPC product service.
///
/// Every flag can also be set through the environment variable shown in `--help`.
#[derive(Debug, Clone, Parser)]
#[command(name = "product-service", version, about)]
pub struct Config {
    /// Address the gRPC server listens on.
    #[arg(long, env = "PRODUCT_LISTEN_ADDR", default_value = "0.0.0.0:50051")]
    pub listen_addr: SocketAddr,

    #[arg(long, env = "PRODUCT_STORE", value_enum, default_value_t = StoreBackend::Mongo)]
    pub store: StoreBackend,

    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    #[arg(long, env = "PRODUCT_DATABASE", default_value = "kede_awak")]
    pub database: String,

    #[arg(long, env = "PRODUCT_COLLECTION", default_value = "product")]
    pub collection: String,

    /// Redis URL for the read snapshot cache. Caching is off when unset.
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    #[arg(long, env = "PRODUCT_CACHE_TTL_SECS", default_value_t = 15)]
    pub cache_ttl_secs: u64,

    /// Budget for connecting to MongoDB and Redis at startup.
    #[arg(long, env = "PRODUCT_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Store-call budget for requests that carry no `grpc-timeout`.
    #[arg(long, env = "PRODUCT_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["product-service"]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:50051".parse().unwrap());
        assert_eq!(config.database, "kede_awak");
        assert_eq!(config.collection, "product");
        assert_eq!(config.cache_ttl(), Duration::from_secs(15));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_flags_override() {
        let config = Config::try_parse_from([
            "product-service",
            "--store",
            "memory",
            "--listen-addr",
            "127.0.0.1:0",
            "--redis-url",
            "redis://127.0.0.1:6379",
            "--request-timeout-secs",
            "2",
        ])
        .unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.listen_addr.port(), 0);
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Config::try_parse_from(["product-service", "--store", "postgres"]).is_err());
    }
}
