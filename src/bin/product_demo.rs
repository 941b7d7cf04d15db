//! # Product Demo
//!
//! Drives Create → Read → Update → Delete against a running product service, then checks
//! that the deleted product reads back as `NotFound`.
//!
//! ```bash
//! cargo run --bin product-service -- --store memory &
//! RUST_LOG=info cargo run --bin product-demo
//! ```

use clap::Parser;
use product_service::clients::{ClientError, ProductClient};
use product_service::lifecycle::setup_tracing;
use product_service::product_service::ProductInput;
use tonic::Code;
use tracing::{error, info, Instrument};

#[derive(Debug, Parser)]
#[command(name = "product-demo", about)]
struct Args {
    /// Server to talk to.
    #[arg(long, env = "PRODUCT_ENDPOINT", default_value = "http://127.0.0.1:50051")]
    endpoint: String,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let args = Args::parse();
    setup_tracing();

    info!(endpoint = %args.endpoint, "Connecting");
    let client = ProductClient::connect(args.endpoint).await?;

    let created = async {
        info!("Creating product");
        client
            .create_product(ProductInput {
                name: "Ipad Pro M1 11 Inch".to_string(),
                description: "Ipad Pro M1 11 Inch Wifi Only".to_string(),
                stock: 8,
                price: 12_000_000.0,
                ..Default::default()
            })
            .await
    }
    .instrument(tracing::info_span!("create"))
    .await?;
    let id = created.id.format();
    info!(%id, price = %created.price, "Product created");

    let read = client.read_product(&id).await?;
    info!(%id, name = %read.name, stock = read.stock, "Product read");

    let updated = async {
        info!("Updating product");
        client
            .update_product(ProductInput {
                id: id.clone(),
                name: "Ipad Pro M1 12.9 Inch Cellular 128 GB".to_string(),
                description: "Ipad Pro M1 12.9 Inch Cellular 128GB di tokohapedia".to_string(),
                stock: 50,
                price: 14_490_000.0,
            })
            .await
    }
    .instrument(tracing::info_span!("update"))
    .await?;
    info!(%id, name = %updated.name, price = %updated.price, "Product updated");

    let deleted = client.delete_product(&id).await?;
    info!(id = %deleted, "Product deleted");

    match client.read_product(&id).await {
        Err(e) if e.code() == Some(Code::NotFound) => info!(%id, "Deleted product is gone"),
        Ok(_) => error!(%id, "Deleted product still readable"),
        Err(e) => return Err(e),
    }

    info!("Demo completed successfully");
    Ok(())
}
