//! MongoDB implementation of the store gateway.
//!
//! The collection is opened as `Collection<Document>` and decoding happens here, so a
//! document with the wrong shape is reported as [`StoreError::Decode`] instead of being
//! folded into a driver error.

use super::{ProductDocument, ProductStore, StoreError};
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::time::Duration;
use tracing::{debug, info, instrument};

const APP_NAME: &str = "product-service";

/// Gateway over a single MongoDB collection of product documents.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connects and pings the deployment, giving up after `connect_timeout`.
    #[instrument(skip(uri))]
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await.map_err(classify)?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client = Client::with_options(options).map_err(classify)?;
        let db = client.database(database);
        let ping = db.run_command(doc! { "ping": 1 });
        match tokio::time::timeout(connect_timeout, ping).await {
            Ok(result) => {
                result.map_err(classify)?;
            }
            Err(_) => {
                return Err(StoreError::Unavailable(format!(
                    "no response from MongoDB within {connect_timeout:?}"
                )))
            }
        }

        info!(database, collection, "Connected to MongoDB");
        Ok(Self::from_client(client, database, collection))
    }

    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        Self { client, collection }
    }

    /// Closes the connection pool, waiting for in-flight operations.
    pub async fn shutdown(self) {
        info!("Closing MongoDB connection");
        self.client.shutdown().await;
    }
}

#[async_trait]
impl ProductStore for MongoStore {
    async fn insert(&self, draft: &ProductDraft) -> Result<ProductId, StoreError> {
        let body = ProductDocument::from_draft(draft).to_bson()?;
        let result = self.collection.insert_one(body).await.map_err(classify)?;
        let oid = inserted_object_id(result.inserted_id)?;
        debug!(id = %oid, "Inserted");
        Ok(ProductId::from(oid))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let raw = self
            .collection
            .find_one(doc! { "_id": id.object_id() })
            .await
            .map_err(classify)?;
        debug!(%id, found = raw.is_some(), "Find");
        raw.map(ProductDocument::decode).transpose()
    }

    async fn replace_by_id(&self, id: &ProductId, draft: &ProductDraft) -> Result<u64, StoreError> {
        let body = ProductDocument::from_draft(draft).to_bson()?;
        let result = self
            .collection
            .replace_one(doc! { "_id": id.object_id() }, body)
            .await
            .map_err(classify)?;
        debug!(%id, matched = result.matched_count, "Replace");
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() })
            .await
            .map_err(classify)?;
        debug!(%id, deleted = result.deleted_count, "Delete");
        Ok(result.deleted_count)
    }
}

/// The store assigns `_id`; anything but an ObjectId means the collection is not ours.
fn inserted_object_id(inserted: Bson) -> Result<ObjectId, StoreError> {
    match inserted {
        Bson::ObjectId(oid) => Ok(oid),
        other => Err(StoreError::Internal(format!(
            "inserted id {other} is not an ObjectId"
        ))),
    }
}

/// Sorts driver errors into retryable transport failures and everything else.
fn classify(err: MongoError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::BsonDeserialization(_)
        | ErrorKind::BsonSerialization(_)
        | ErrorKind::InvalidResponse { .. }
        | ErrorKind::Internal { .. } => StoreError::Internal(err.to_string()),
        _ => StoreError::Unavailable(err.to_string()),
    }
}
