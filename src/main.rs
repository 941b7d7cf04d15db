//! # Product Service
//!
//! Serves `product.ProductService` until interrupted with Ctrl-C.
//!
//! See [`Config`] for flags and environment variables.

use clap::Parser;
use product_service::lifecycle::{setup_tracing, Config, LifecycleError, ProductSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), LifecycleError> {
    let config = Config::parse();
    setup_tracing();

    info!(store = ?config.store, cache = config.redis_url.is_some(), "Starting product service");

    let system = ProductSystem::start(&config).await?;
    let listener = ProductSystem::bind(config.listen_addr).await?;

    system
        .serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
            info!("Ctrl-C received");
        })
        .await?;

    info!("Product service stopped");
    Ok(())
}
