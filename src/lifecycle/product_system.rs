use super::{Config, StoreBackend};
use crate::cache::{CacheSideEffect, ProductCache, RedisCache};
use crate::product_service::ProductService;
use crate::store::{MemoryCollection, MongoStore, ProductStore, StoreError};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::{error, info, warn};

/// Channel capacity of the in-memory collection actor.
const MEMORY_BUFFER: usize = 64;

/// Errors raised while starting or stopping the service.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Cannot open store: {0}")]
    Store(#[from] StoreError),

    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("gRPC server failed: {0}")]
    Server(#[from] tonic::transport::Error),

    #[error("Collection actor failed: {0}")]
    ActorFailed(String),
}

/// The store a running system owns and must close on shutdown.
enum StoreBinding {
    Mongo(MongoStore),
    Memory(JoinHandle<()>),
}

/// The product service with its store and cache wired up.
///
/// `ProductSystem` is responsible for:
/// - **Startup**: opening the configured store and, if configured, the cache
/// - **Serving**: running the gRPC server until told to stop
/// - **Shutdown**: closing the store once in-flight requests have drained
///
/// # Example
///
/// ```ignore
/// let config = Config::parse();
/// let system = ProductSystem::start(&config).await?;
/// let listener = ProductSystem::bind(config.listen_addr).await?;
/// system.serve(listener, async { tokio::signal::ctrl_c().await.ok(); }).await?;
/// ```
pub struct ProductSystem {
    /// Request handlers; clones share the same store and cache.
    pub service: ProductService,

    binding: StoreBinding,
}

impl ProductSystem {
    /// Opens the store and cache named by `config`.
    ///
    /// A configured cache that cannot be reached is logged and left disabled; reads work
    /// without it. A store that cannot be reached fails startup.
    pub async fn start(config: &Config) -> Result<Self, LifecycleError> {
        let (store, binding): (Arc<dyn ProductStore>, StoreBinding) = match config.store {
            StoreBackend::Mongo => {
                let mongo = MongoStore::connect(
                    &config.mongodb_uri,
                    &config.database,
                    &config.collection,
                    config.connect_timeout(),
                )
                .await?;
                let store: Arc<dyn ProductStore> = Arc::new(mongo.clone());
                (store, StoreBinding::Mongo(mongo))
            }
            StoreBackend::Memory => {
                let (collection, store) = MemoryCollection::new(MEMORY_BUFFER);
                let handle = tokio::spawn(collection.run());
                info!("Using in-memory store");
                let store: Arc<dyn ProductStore> = Arc::new(store);
                (store, StoreBinding::Memory(handle))
            }
        };

        let cache = match &config.redis_url {
            Some(url) => match RedisCache::connect(url, config.connect_timeout()).await {
                Ok(redis) => {
                    let redis: Arc<dyn ProductCache> = Arc::new(redis);
                    CacheSideEffect::new(redis, config.cache_ttl())
                }
                Err(e) => {
                    warn!(error = %e, "Cache unavailable, continuing without it");
                    CacheSideEffect::disabled()
                }
            },
            None => CacheSideEffect::disabled(),
        };

        let service = ProductService::new(store, cache, config.request_timeout());
        Ok(Self { service, binding })
    }

    pub async fn bind(addr: SocketAddr) -> Result<TcpListener, LifecycleError> {
        TcpListener::bind(addr)
            .await
            .map_err(|source| LifecycleError::Bind { addr, source })
    }

    /// Serves gRPC on `listener` until `shutdown` resolves, then closes the store.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), LifecycleError>
    where
        F: Future<Output = ()>,
    {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "Serving product.ProductService");
        }

        let served = Server::builder()
            .add_service(self.service.clone().into_server())
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await;
        if let Err(e) = &served {
            error!(error = %e, "gRPC server stopped with an error");
        }

        let closed = self.shutdown().await;
        served?;
        closed
    }

    /// Closes the store.
    ///
    /// For the memory store this drops the last handle, which closes the actor's channel,
    /// then waits for the actor to drain and exit.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down...");
        drop(self.service);

        match self.binding {
            StoreBinding::Mongo(mongo) => mongo.shutdown().await,
            StoreBinding::Memory(handle) => {
                if let Err(e) = handle.await {
                    error!("Collection actor failed: {:?}", e);
                    return Err(LifecycleError::ActorFailed(e.to_string()));
                }
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
