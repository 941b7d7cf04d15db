//! # Product Client
//!
//! Provides a high-level API for talking to a running product service over gRPC.
//! It wraps the generated `ProductServiceClient<Channel>` and exposes domain types, so
//! callers deal in [`Product`] and [`ProductInput`] rather than wire messages.
use crate::model::{Price, Product, ProductId};
use crate::product_service::ProductInput;
use crate::proto::product_service_client::ProductServiceClient;
use crate::proto::{
    self, CreateProductRequest, DeleteProductRequest, ReadProductRequest, UpdateProductRequest,
};
use thiserror::Error;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, instrument};

/// Errors a client call can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cannot connect: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Request failed: {0}")]
    Rpc(#[from] Status),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// The gRPC status code, if the server answered at all.
    pub fn code(&self) -> Option<Code> {
        match self {
            ClientError::Rpc(status) => Some(status.code()),
            _ => None,
        }
    }
}

/// Client for the `product.ProductService` RPCs.
#[derive(Clone)]
pub struct ProductClient {
    inner: ProductServiceClient<Channel>,
}

impl ProductClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: ProductServiceClient::new(channel),
        }
    }

    /// Connects to `endpoint`, e.g. `http://127.0.0.1:50051`.
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        let channel = Endpoint::from_shared(endpoint.into())?.connect().await?;
        Ok(Self::new(channel))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> Result<Product, ClientError> {
        debug!("Sending request");
        let response = self
            .inner
            .clone()
            .create_product(CreateProductRequest {
                product: Some(input.into()),
            })
            .await?;
        product_from_wire(response.into_inner().product)
    }

    #[instrument(skip(self))]
    pub async fn read_product(&self, id: &str) -> Result<Product, ClientError> {
        debug!("Sending request");
        let response = self
            .inner
            .clone()
            .read_product(ReadProductRequest { id: id.to_string() })
            .await?;
        product_from_wire(response.into_inner().product)
    }

    #[instrument(skip(self, input), fields(id = %input.id))]
    pub async fn update_product(&self, input: ProductInput) -> Result<Product, ClientError> {
        debug!("Sending request");
        let response = self
            .inner
            .clone()
            .update_product(UpdateProductRequest {
                product: Some(input.into()),
            })
            .await?;
        product_from_wire(response.into_inner().product)
    }

    /// Returns the id the server reports as deleted.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<ProductId, ClientError> {
        debug!("Sending request");
        let response = self
            .inner
            .clone()
            .delete_product(DeleteProductRequest { id: id.to_string() })
            .await?;
        let id = response.into_inner().id;
        ProductId::parse(&id).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

impl From<ProductInput> for proto::Product {
    fn from(input: ProductInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            description: input.description,
            stock: input.stock,
            price: input.price as f32,
        }
    }
}

fn product_from_wire(product: Option<proto::Product>) -> Result<Product, ClientError> {
    let product =
        product.ok_or_else(|| ClientError::MalformedResponse("product missing".to_string()))?;
    let id = ProductId::parse(&product.id)
        .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
    let price = Price::from_major_lossy(f64::from(product.price)).ok_or_else(|| {
        ClientError::MalformedResponse(format!("price {} is not finite", product.price))
    })?;
    Ok(Product {
        id,
        name: product.name,
        description: product.description,
        stock: product.stock,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_wire() {
        let product = product_from_wire(Some(proto::Product {
            id: "61CB2B463F79F2A6EEB96F94".to_string(),
            name: "Ipad".to_string(),
            description: "Wifi".to_string(),
            stock: 8,
            price: 12_000_000.0,
        }))
        .unwrap();
        assert_eq!(product.id.format(), "61cb2b463f79f2a6eeb96f94");
        assert_eq!(product.price, Price::from_minor_units(1_200_000_000));
    }

    #[test]
    fn test_product_from_wire_rejects_missing_or_bad_id() {
        assert!(matches!(
            product_from_wire(None),
            Err(ClientError::MalformedResponse(_))
        ));
        let bad = proto::Product {
            id: "nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            product_from_wire(Some(bad)),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rpc_error_code() {
        let err = ClientError::from(Status::not_found("gone"));
        assert_eq!(err.code(), Some(Code::NotFound));
        assert_eq!(
            ClientError::MalformedResponse("x".into()).code(),
            None
        );
    }
}
