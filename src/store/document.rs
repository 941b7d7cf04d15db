//! Persisted document shape.
//!
//! One collection, one shape: `{ _id, name, desc, stock, price }`. `stock` is written as
//! a 64-bit integer and `price` as a double in major units.
//!
//! Older documents carry `description` instead of `desc`, a 32-bit `stock`, and a stray
//! `id` field. They still decode. Missing fields read as empty or zero.

use super::StoreError;
use crate::model::{Price, Product, ProductDraft, ProductId};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "desc", alias = "description", default)]
    pub description: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub price: f64,
}

impl ProductDocument {
    /// Document body without `_id`, for inserts and replacements.
    pub fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            id: None,
            name: draft.name.clone(),
            description: draft.description.clone(),
            stock: i64::from(draft.stock),
            price: draft.price.to_major_lossy(),
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn to_bson(&self) -> Result<Document, StoreError> {
        bson::to_document(self).map_err(|e| StoreError::Internal(e.to_string()))
    }

    /// Decodes a raw document into a Product.
    pub fn decode(raw: Document) -> Result<Product, StoreError> {
        let label = match raw.get("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => "<missing _id>".to_string(),
        };
        let document: ProductDocument = bson::from_document(raw).map_err(|e| StoreError::Decode {
            id: label,
            reason: e.to_string(),
        })?;
        document.into_product()
    }

    /// Maps the document onto the entity, rejecting values the entity cannot hold.
    pub fn into_product(self) -> Result<Product, StoreError> {
        let label = self
            .id
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| "<missing _id>".to_string());
        let decode = |reason: String| StoreError::Decode {
            id: label.clone(),
            reason,
        };

        let id = self.id.ok_or_else(|| decode("document has no _id".to_string()))?;
        let stock = i32::try_from(self.stock)
            .map_err(|_| decode(format!("stock {} does not fit in 32 bits", self.stock)))?;
        let price = Price::from_major_lossy(self.price)
            .ok_or_else(|| decode(format!("price {} is not finite", self.price)))?;

        Ok(Product {
            id: ProductId::from(id),
            name: self.name,
            description: self.description,
            stock,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn draft() -> ProductDraft {
        ProductDraft::new(
            "Ipad Pro M1 11 Inch",
            "Ipad Pro M1 11 Inch Wifi Only",
            8,
            Price::from_minor_units(1_200_000_000),
        )
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let body = ProductDocument::from_draft(&draft()).to_bson().unwrap();
        assert!(body.get("_id").is_none());
        assert_eq!(body.get_str("desc").unwrap(), "Ipad Pro M1 11 Inch Wifi Only");
        assert_eq!(body.get_i64("stock").unwrap(), 8);
        assert_eq!(body.get_f64("price").unwrap(), 12_000_000.0);
    }

    #[test]
    fn test_decode_reads_legacy_document() {
        let oid = ObjectId::parse_str("61cb2b463f79f2a6eeb96f94").unwrap();
        let raw = doc! {
            "_id": oid,
            "name": "Ipad Pro M1 11 Inch",
            "desc": "Ipad Pro M1 11 Inch Wifi Only",
            "stock": 8_i64,
            "price": 12_000_000.0,
        };

        let product = ProductDocument::decode(raw).unwrap();
        assert_eq!(product.id.format(), "61cb2b463f79f2a6eeb96f94");
        assert_eq!(product.draft(), draft());
    }

    #[test]
    fn test_decode_reads_proto_shaped_document() {
        let oid = ObjectId::parse_str("61cb2b463f79f2a6eeb96f94").unwrap();
        let raw = doc! {
            "_id": oid,
            "id": "",
            "name": "Ipad Pro M1 11 Inch",
            "description": "Ipad Pro M1 11 Inch Wifi Only",
            "stock": 8_i32,
            "price": 12_000_000.0,
        };

        let product = ProductDocument::decode(raw).unwrap();
        assert_eq!(product.id.format(), "61cb2b463f79f2a6eeb96f94");
        assert_eq!(product.draft(), draft());
    }

    #[test]
    fn test_decode_zero_fills_missing_fields() {
        let oid = ObjectId::new();
        let product = ProductDocument::decode(doc! { "_id": oid, "name": "Bare" }).unwrap();
        assert_eq!(product.name, "Bare");
        assert_eq!(product.description, "");
        assert_eq!(product.stock, 0);
        assert_eq!(product.price, Price::from_minor_units(0));
    }

    #[test]
    fn test_decode_reports_shape_mismatch() {
        let oid = ObjectId::new();
        let raw = doc! { "_id": oid, "name": 42 };

        match ProductDocument::decode(raw) {
            Err(StoreError::Decode { id, .. }) => assert_eq!(id, oid.to_hex()),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_out_of_range_stock() {
        let document = ProductDocument {
            stock: i64::from(i32::MAX) + 1,
            ..ProductDocument::from_draft(&draft()).with_id(ObjectId::new())
        };
        assert!(matches!(document.into_product(), Err(StoreError::Decode { .. })));
    }
}
