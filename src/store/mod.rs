//! # Store Gateway
//!
//! Every handler talks to persistence through the [`ProductStore`] capability trait, which
//! offers exactly four single-document operations. The handlers never see driver types;
//! each implementation translates its own failures into [`StoreError`].
//!
//! # Implementations
//!
//! - [`MongoStore`] - the production gateway over a MongoDB collection
//! - [`MemoryStore`] - an actor-backed in-process collection (see [`memory`])
//! - [`mock::MockStore`] - scripted expectations for handler unit tests
//!
//! # Atomicity
//!
//! Each operation is atomic for the single document it touches. Sequences of calls are
//! not: a document found by `find_by_id` may be gone by the time `replace_by_id` or
//! `delete_by_id` runs. That is why both of those report how many documents they matched,
//! and why callers must check the count.

pub mod document;
pub mod error;
pub mod memory;
pub mod mock;
pub mod mongo;

pub use document::ProductDocument;
pub use error::StoreError;
pub use memory::{MemoryCollection, MemoryStore};
pub use mongo::MongoStore;

use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;

/// The four operations the service needs from a document collection.
///
/// Implementations must be safe to share across concurrently running requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a new document and returns the identifier the store assigned.
    async fn insert(&self, draft: &ProductDraft) -> Result<ProductId, StoreError>;

    /// Fetches a single document.
    ///
    /// A document that exists but does not fit the Product shape is reported as
    /// [`StoreError::Decode`], not as `Ok(None)`.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Replaces the fields of the document with this id. Returns the matched count (0 or 1).
    async fn replace_by_id(&self, id: &ProductId, draft: &ProductDraft) -> Result<u64, StoreError>;

    /// Removes the document with this id. Returns the deleted count (0 or 1).
    async fn delete_by_id(&self, id: &ProductId) -> Result<u64, StoreError>;
}
