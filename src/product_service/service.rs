//! The four request handlers.
//!
//! Each handler runs Validating → Querying → (Mutating) → Responding, failing out at the
//! first error. Validation happens before any store call, so a malformed identifier or a
//! missing field never reaches the store.

use super::{Deadline, ProductError, ProductInput};
use crate::cache::CacheSideEffect;
use crate::model::{Product, ProductId};
use crate::store::{ProductStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Request handlers for the product resource.
///
/// Cheap to clone; clones share the store and cache handles.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    cache: CacheSideEffect,
    request_timeout: Duration,
}

impl ProductService {
    /// # Arguments
    /// * `store` - Store gateway shared by every request
    /// * `cache` - Side-effect run after successful reads
    /// * `request_timeout` - Store-call budget for requests that carry no deadline
    pub fn new(store: Arc<dyn ProductStore>, cache: CacheSideEffect, request_timeout: Duration) -> Self {
        Self {
            store,
            cache,
            request_timeout,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Deadline for a request that carries none of its own.
    pub fn default_deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }

    /// Inserts a new product. `input.id` is ignored.
    #[instrument(skip(self, input, deadline), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput, deadline: Deadline) -> Result<Product, ProductError> {
        let draft = input.into_draft()?;

        let id = deadline
            .run(self.store.insert(&draft))
            .await
            .map_err(|e| store_failure("insert", e))?;

        info!(%id, "Product created");
        Ok(Product::new(id, draft))
    }

    /// Fetches a product and caches a snapshot of it.
    #[instrument(skip(self, deadline))]
    pub async fn read(&self, id: &str, deadline: Deadline) -> Result<Product, ProductError> {
        let id = ProductId::parse(id)?;
        let product = self.fetch(&id, deadline).await?;
        self.cache.record(&product);
        Ok(product)
    }

    /// Replaces every field of an existing product.
    ///
    /// The replace is conditional on the id still matching, so a product deleted between
    /// the existence check and the replace yields `NotFound` rather than a silent no-op.
    #[instrument(skip(self, input, deadline), fields(id = %input.id))]
    pub async fn update(&self, input: ProductInput, deadline: Deadline) -> Result<Product, ProductError> {
        let id = ProductId::parse(&input.id)?;
        let draft = input.into_draft()?;

        self.fetch(&id, deadline).await?;

        let matched = deadline
            .run(self.store.replace_by_id(&id, &draft))
            .await
            .map_err(|e| store_failure("replace", e))?;
        if matched == 0 {
            warn!(%id, "Product disappeared before replace");
            return Err(ProductError::NotFound(id.format()));
        }

        info!(%id, "Product updated");
        Ok(Product::new(id, draft))
    }

    /// Removes a product and returns its canonical id.
    #[instrument(skip(self, deadline))]
    pub async fn delete(&self, id: &str, deadline: Deadline) -> Result<ProductId, ProductError> {
        let id = ProductId::parse(id)?;

        self.fetch(&id, deadline).await?;

        let deleted = deadline
            .run(self.store.delete_by_id(&id))
            .await
            .map_err(|e| store_failure("delete", e))?;
        if deleted == 0 {
            warn!(%id, "Product disappeared before delete");
            return Err(ProductError::NotFound(id.format()));
        }

        info!(%id, "Product deleted");
        Ok(id)
    }

    /// Existence check shared by read, update and delete.
    async fn fetch(&self, id: &ProductId, deadline: Deadline) -> Result<Product, ProductError> {
        match deadline.run(self.store.find_by_id(id)).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => {
                debug!(%id, "Not found");
                Err(ProductError::NotFound(id.format()))
            }
            Err(StoreError::Decode { id: raw_id, reason }) => {
                warn!(%raw_id, %reason, "Stored document does not decode as a product");
                Err(ProductError::NotFound(id.format()))
            }
            Err(e) => Err(store_failure("find", e)),
        }
    }
}

fn store_failure(operation: &'static str, err: StoreError) -> ProductError {
    warn!(operation, error = %err, "Store call failed");
    ProductError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Price, ProductDraft};
    use crate::store::mock::{MockStore, StoreCall};

    const ID: &str = "61cb2b463f79f2a6eeb96f94";

    fn service(mock: &MockStore) -> ProductService {
        ProductService::new(
            Arc::new(mock.clone()),
            CacheSideEffect::disabled(),
            Duration::from_secs(5),
        )
    }

    fn input(id: &str) -> ProductInput {
        ProductInput {
            id: id.to_string(),
            name: "Ipad Pro M1 11 Inch".to_string(),
            description: "Ipad Pro M1 11 Inch Wifi Only".to_string(),
            stock: 8,
            price: 12_000_000.0,
        }
    }

    fn stored(id: ProductId) -> Product {
        Product::new(
            id,
            ProductDraft::new("Old", "Old desc", 1, Price::from_minor_units(100)),
        )
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let mock = MockStore::new();
        let id = ProductId::parse(ID).unwrap();
        mock.expect_insert().return_ok(id);

        let product = service(&mock)
            .create(input(""), Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Ipad Pro M1 11 Inch");
        assert_eq!(product.price, Price::from_minor_units(1_200_000_000));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_surfaces_store_internal() {
        let mock = MockStore::new();
        mock.expect_insert()
            .return_err(StoreError::Internal("inserted id is not an ObjectId".into()));

        let err = service(&mock)
            .create(input(""), Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::StoreInternal(_)));
    }

    #[tokio::test]
    async fn test_read_treats_decode_failure_as_not_found() {
        let mock = MockStore::new();
        let id = ProductId::parse(ID).unwrap();
        mock.expect_find(id).return_err(StoreError::Decode {
            id: ID.to_string(),
            reason: "invalid type: integer, expected a string".into(),
        });

        let err = service(&mock)
            .read(ID, Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::NotFound(ID.to_string()));
    }

    #[tokio::test]
    async fn test_update_checks_existence_then_replaces() {
        let mock = MockStore::new();
        let id = ProductId::parse(ID).unwrap();
        mock.expect_find(id).return_ok(Some(stored(id)));
        mock.expect_replace(id).return_ok(1);

        let updated = service(&mock)
            .update(input(ID), Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.stock, 8);

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], StoreCall::FindById(id));
        assert!(matches!(calls[1], StoreCall::ReplaceById(called, _) if called == id));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_reports_race_with_delete() {
        let mock = MockStore::new();
        let id = ProductId::parse(ID).unwrap();
        mock.expect_find(id).return_ok(Some(stored(id)));
        mock.expect_replace(id).return_ok(0);

        let err = service(&mock)
            .update(input(ID), Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::NotFound(ID.to_string()));
    }

    #[tokio::test]
    async fn test_update_rejects_missing_name_without_store_call() {
        let mock = MockStore::new();
        let nameless = ProductInput {
            name: String::new(),
            ..input(ID)
        };

        let err = service(&mock)
            .update(nameless, Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::InvalidArgument(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_race_with_other_delete() {
        let mock = MockStore::new();
        let id = ProductId::parse(ID).unwrap();
        mock.expect_find(id).return_ok(Some(stored(id)));
        mock.expect_delete(id).return_ok(0);

        let err = service(&mock)
            .delete(ID, Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::NotFound(ID.to_string()));
    }

    #[tokio::test]
    async fn test_delete_does_not_mutate_after_failed_check() {
        let mock = MockStore::new();
        let id = ProductId::parse(ID).unwrap();
        mock.expect_find(id)
            .return_err(StoreError::Unavailable("connection refused".into()));

        let err = service(&mock)
            .delete(ID, Deadline::after(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::StoreUnavailable(_)));
        assert_eq!(mock.calls(), vec![StoreCall::FindById(id)]);
    }
}
