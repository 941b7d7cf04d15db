//! # Mock Store
//!
//! A [`ProductStore`] that answers from a queue of scripted expectations and records
//! every call it receives. Use it to test handler logic without any collection behind it.
//!
//! | Feature | MockStore | MemoryStore |
//! |---------|-----------|-------------|
//! | **State** | None (expectations) | Real documents |
//! | **Error Injection** | Easy (`return_err`) | Only "actor closed" |
//! | **Call Recording** | Yes ([`MockStore::calls`]) | No |
//! | **Use Case** | Handler branches, failure paths | Round-trips, races |
//!
//! # Example
//! ```ignore
//! let mock = MockStore::new();
//! mock.expect_find(id).return_ok(Some(product));
//! mock.expect_replace(id).return_ok(0);
//!
//! let service = ProductService::new(Arc::new(mock.clone()), CacheSideEffect::disabled(), timeout);
//! // ...
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! An unexpected call, or a call with a different id than expected, panics.

use super::{ProductStore, StoreError};
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Insert(ProductDraft),
    FindById(ProductId),
    ReplaceById(ProductId, ProductDraft),
    DeleteById(ProductId),
}

enum Expectation {
    Insert {
        response: Result<ProductId, StoreError>,
    },
    Find {
        id: ProductId,
        response: Result<Option<Product>, StoreError>,
    },
    Replace {
        id: ProductId,
        response: Result<u64, StoreError>,
    },
    Delete {
        id: ProductId,
        response: Result<u64, StoreError>,
    },
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// Scripted store. Clones share the same expectations and call log.
#[derive(Clone, Default)]
pub struct MockStore {
    expectations: Queue,
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl MockStore {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects an `insert` call.
    pub fn expect_insert(&self) -> ExpectationBuilder<ProductId> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Insert { response }
        })
    }

    /// Expects a `find_by_id` call for `id`.
    pub fn expect_find(&self, id: ProductId) -> ExpectationBuilder<Option<Product>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Find { id, response }
        })
    }

    /// Expects a `replace_by_id` call for `id`.
    pub fn expect_replace(&self, id: ProductId) -> ExpectationBuilder<u64> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Replace { id, response }
        })
    }

    /// Expects a `delete_by_id` call for `id`.
    pub fn expect_delete(&self, id: ProductId) -> ExpectationBuilder<u64> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self, call: StoreCall) -> Expectation {
        self.calls.lock().unwrap().push(call.clone());
        match self.expectations.lock().unwrap().pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected store call: {:?}", call),
        }
    }
}

#[async_trait]
impl ProductStore for MockStore {
    async fn insert(&self, draft: &ProductDraft) -> Result<ProductId, StoreError> {
        match self.next(StoreCall::Insert(draft.clone())) {
            Expectation::Insert { response } => response,
            _ => panic!("Expectation mismatch: got insert"),
        }
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        match self.next(StoreCall::FindById(*id)) {
            Expectation::Find { id: expected, response } => {
                assert_eq!(&expected, id, "find_by_id called with unexpected id");
                response
            }
            _ => panic!("Expectation mismatch: got find_by_id({})", id),
        }
    }

    async fn replace_by_id(&self, id: &ProductId, draft: &ProductDraft) -> Result<u64, StoreError> {
        match self.next(StoreCall::ReplaceById(*id, draft.clone())) {
            Expectation::Replace { id: expected, response } => {
                assert_eq!(&expected, id, "replace_by_id called with unexpected id");
                response
            }
            _ => panic!("Expectation mismatch: got replace_by_id({})", id),
        }
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<u64, StoreError> {
        match self.next(StoreCall::DeleteById(*id)) {
            Expectation::Delete { id: expected, response } => {
                assert_eq!(&expected, id, "delete_by_id called with unexpected id");
                response
            }
            _ => panic!("Expectation mismatch: got delete_by_id({})", id),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T> {
    expectations: Queue,
    make: Box<dyn FnOnce(Result<T, StoreError>) -> Expectation + Send>,
}

impl<T> ExpectationBuilder<T> {
    fn new(
        expectations: Queue,
        make: impl FnOnce(Result<T, StoreError>) -> Expectation + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Price;

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mock = MockStore::new();
        let id = ProductId::generate();
        let draft = ProductDraft::new("Test", "", 1, Price::from_minor_units(100));

        mock.expect_insert().return_ok(id);
        mock.expect_find(id).return_ok(Some(Product::new(id, draft.clone())));

        let inserted = mock.insert(&draft).await.unwrap();
        assert_eq!(inserted, id);

        let fetched = mock.find_by_id(&id).await.unwrap();
        assert_eq!(fetched.unwrap().name, "Test");

        assert_eq!(
            mock.calls(),
            vec![StoreCall::Insert(draft), StoreCall::FindById(id)]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_store_injects_errors() {
        let mock = MockStore::new();
        let id = ProductId::generate();
        mock.expect_delete(id)
            .return_err(StoreError::Unavailable("connection reset".to_string()));

        let result = mock.delete_by_id(&id).await;
        assert_eq!(
            result,
            Err(StoreError::Unavailable("connection reset".to_string()))
        );
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected store call")]
    async fn test_mock_store_panics_without_expectation() {
        let mock = MockStore::new();
        let _ = mock.find_by_id(&ProductId::generate()).await;
    }
}
