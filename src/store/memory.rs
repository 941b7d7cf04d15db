//! # In-Memory Collection Actor
//!
//! An in-process stand-in for the document collection, built as an actor.
//!
//! [`MemoryCollection`] is the "server" half: it owns the documents and the receiving end
//! of an mpsc channel, and processes one [`CollectionRequest`] at a time. [`MemoryStore`]
//! is the cheap, cloneable "client" half that implements [`ProductStore`] by sending
//! requests and awaiting the oneshot reply.
//!
//! Because requests are handled sequentially, every operation is atomic for the document
//! it touches, which is the same guarantee MongoDB gives. Sequences of operations from
//! different tasks still interleave, so the check-then-act races the handlers guard
//! against are reproducible here.
//!
//! ```rust,ignore
//! let (collection, store) = MemoryCollection::new(32);
//! let handle = tokio::spawn(collection.run());
//!
//! let id = store.insert(&draft).await?;
//! let found = store.find_by_id(&id).await?;
//!
//! drop(store); // last client gone: the actor drains and exits
//! handle.await?;
//! ```

use super::{ProductDocument, ProductStore, StoreError};
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Type alias for the one-shot response channel used by the collection actor.
pub type Response<T> = oneshot::Sender<T>;

/// Message sent to the collection actor, one variant per store operation.
#[derive(Debug)]
pub enum CollectionRequest {
    Insert {
        document: ProductDocument,
        respond_to: Response<ObjectId>,
    },
    Find {
        id: ObjectId,
        respond_to: Response<Option<ProductDocument>>,
    },
    Replace {
        id: ObjectId,
        document: ProductDocument,
        respond_to: Response<u64>,
    },
    Delete {
        id: ObjectId,
        respond_to: Response<u64>,
    },
}

/// The actor that owns the documents.
pub struct MemoryCollection {
    receiver: mpsc::Receiver<CollectionRequest>,
    documents: HashMap<ObjectId, ProductDocument>,
}

impl MemoryCollection {
    pub fn new(buffer_size: usize) -> (Self, MemoryStore) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let collection = Self {
            receiver,
            documents: HashMap::new(),
        };
        (collection, MemoryStore { sender })
    }

    /// Runs the event loop until every [`MemoryStore`] handle has been dropped.
    pub async fn run(mut self) {
        info!("Collection actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Insert {
                    document,
                    respond_to,
                } => {
                    let id = ObjectId::new();
                    self.documents.insert(id, document.with_id(id));
                    debug!(%id, size = self.documents.len(), "Inserted");
                    let _ = respond_to.send(id);
                }
                CollectionRequest::Find { id, respond_to } => {
                    let document = self.documents.get(&id).cloned();
                    debug!(%id, found = document.is_some(), "Find");
                    let _ = respond_to.send(document);
                }
                CollectionRequest::Replace {
                    id,
                    document,
                    respond_to,
                } => {
                    let matched = match self.documents.get_mut(&id) {
                        Some(slot) => {
                            *slot = document.with_id(id);
                            1
                        }
                        None => 0,
                    };
                    debug!(%id, matched, "Replace");
                    let _ = respond_to.send(matched);
                }
                CollectionRequest::Delete { id, respond_to } => {
                    let deleted = u64::from(self.documents.remove(&id).is_some());
                    debug!(%id, deleted, size = self.documents.len(), "Delete");
                    let _ = respond_to.send(deleted);
                }
            }
        }

        info!(size = self.documents.len(), "Collection actor shut down");
    }
}

/// Client handle to a [`MemoryCollection`].
#[derive(Clone)]
pub struct MemoryStore {
    sender: mpsc::Sender<CollectionRequest>,
}

impl MemoryStore {
    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> CollectionRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable("collection actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Unavailable("collection actor dropped the request".to_string()))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert(&self, draft: &ProductDraft) -> Result<ProductId, StoreError> {
        let document = ProductDocument::from_draft(draft);
        let oid = self
            .request(|respond_to| CollectionRequest::Insert {
                document,
                respond_to,
            })
            .await?;
        Ok(ProductId::from(oid))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let id = id.object_id();
        let document = self
            .request(|respond_to| CollectionRequest::Find { id, respond_to })
            .await?;
        document.map(ProductDocument::into_product).transpose()
    }

    async fn replace_by_id(&self, id: &ProductId, draft: &ProductDraft) -> Result<u64, StoreError> {
        let id = id.object_id();
        let document = ProductDocument::from_draft(draft);
        self.request(|respond_to| CollectionRequest::Replace {
            id,
            document,
            respond_to,
        })
        .await
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<u64, StoreError> {
        let id = id.object_id();
        self.request(|respond_to| CollectionRequest::Delete { id, respond_to })
            .await
    }
}
