//! gRPC adapter: maps `product.ProductService` RPCs onto [`ProductService`] handlers.

use super::{Deadline, ProductError, ProductInput, ProductService};
use crate::model::Product;
use crate::proto::product_service_server::{
    ProductService as ProductRpc, ProductServiceServer,
};
use crate::proto::{
    self, CreateProductRequest, CreateProductResponse, DeleteProductRequest, DeleteProductResponse,
    ReadProductRequest, ReadProductResponse, UpdateProductRequest, UpdateProductResponse,
};
use tonic::{Request, Response, Status};

impl ProductService {
    /// Wraps the handlers in the generated tonic service.
    pub fn into_server(self) -> ProductServiceServer<Self> {
        ProductServiceServer::new(self)
    }

    fn deadline_for<T>(&self, request: &Request<T>) -> Deadline {
        Deadline::from_metadata(request.metadata(), self.request_timeout())
    }
}

#[tonic::async_trait]
impl ProductRpc for ProductService {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<CreateProductResponse>, Status> {
        let deadline = self.deadline_for(&request);
        let input = required(request.into_inner().product)?;
        let product = self.create(input, deadline).await?;
        Ok(Response::new(CreateProductResponse {
            product: Some(product.into()),
        }))
    }

    async fn read_product(
        &self,
        request: Request<ReadProductRequest>,
    ) -> Result<Response<ReadProductResponse>, Status> {
        let deadline = self.deadline_for(&request);
        let id = request.into_inner().id;
        let product = self.read(&id, deadline).await?;
        Ok(Response::new(ReadProductResponse {
            product: Some(product.into()),
        }))
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<UpdateProductResponse>, Status> {
        let deadline = self.deadline_for(&request);
        let input = required(request.into_inner().product)?;
        let product = self.update(input, deadline).await?;
        Ok(Response::new(UpdateProductResponse {
            product: Some(product.into()),
        }))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let deadline = self.deadline_for(&request);
        let id = request.into_inner().id;
        let id = self.delete(&id, deadline).await?;
        Ok(Response::new(DeleteProductResponse { id: id.format() }))
    }
}

fn required(product: Option<proto::Product>) -> Result<ProductInput, ProductError> {
    product
        .map(ProductInput::from)
        .ok_or_else(|| ProductError::InvalidArgument("product is required".to_string()))
}

impl From<proto::Product> for ProductInput {
    fn from(product: proto::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            stock: product.stock,
            price: f64::from(product.price),
        }
    }
}

impl From<Product> for proto::Product {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.format(),
            name: product.name,
            description: product.description,
            stock: product.stock,
            price: product.price.to_major_lossy() as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheSideEffect;
    use crate::store::mock::MockStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tonic::Code;

    #[tokio::test]
    async fn test_missing_product_is_invalid_argument() {
        let mock = MockStore::new();
        let service = ProductService::new(
            Arc::new(mock.clone()),
            CacheSideEffect::disabled(),
            Duration::from_secs(1),
        );

        let status = service
            .create_product(Request::new(CreateProductRequest { product: None }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = service
            .update_product(Request::new(UpdateProductRequest { product: None }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_wire_price_conversion() {
        let input = ProductInput::from(proto::Product {
            id: String::new(),
            name: "Ipad".to_string(),
            description: String::new(),
            stock: 50,
            price: 14_490_000.0,
        });
        let draft = input.into_draft().unwrap();
        assert_eq!(draft.price.minor_units(), 1_449_000_000);
    }
}
