//! # Identifier Codec
//!
//! Products are addressed on the wire by a 24-character hex string and in the store by a
//! 12-byte BSON `ObjectId`. [`ProductId`] is the internal form; [`ProductId::parse`] and
//! its [`Display`] impl are the only way across the boundary.
//!
//! Parsing never touches the store, so a malformed identifier is always a client error.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Length of the canonical external form.
pub const EXTERNAL_ID_LEN: usize = 24;

/// The external identifier is not a well-formed ObjectId string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid product id {value:?}: expected {EXTERNAL_ID_LEN} hex characters")]
pub struct InvalidIdentifier {
    pub value: String,
}

/// Type-safe identifier for Products, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(ObjectId);

impl ProductId {
    /// Parses the external representation.
    ///
    /// Accepts exactly 24 hex digits in either case. Anything else, including surrounding
    /// whitespace, is rejected.
    pub fn parse(external: &str) -> Result<Self, InvalidIdentifier> {
        let invalid = || InvalidIdentifier {
            value: external.to_string(),
        };
        if external.len() != EXTERNAL_ID_LEN || !external.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        ObjectId::parse_str(external).map(Self).map_err(|_| invalid())
    }

    /// Mints a fresh identifier. Only stores should call this.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Canonical lowercase hex form. Total.
    pub fn format(&self) -> String {
        self.0.to_hex()
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ProductId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<ProductId> for ObjectId {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl FromStr for ProductId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_reference_id() {
        let id = ProductId::parse("61cb2b463f79f2a6eeb96f94").unwrap();
        assert_eq!(id.format(), "61cb2b463f79f2a6eeb96f94");
    }

    #[test]
    fn test_parse_normalizes_uppercase() {
        let id = ProductId::parse("61CB2B463F79F2A6EEB96F94").unwrap();
        assert_eq!(id.to_string(), "61cb2b463f79f2a6eeb96f94");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "not-an-id",
            "61cb2b463f79f2a6eeb96f9",
            "61cb2b463f79f2a6eeb96f945",
            "61cb2b463f79f2a6eeb96fzz",
            " 61cb2b463f79f2a6eeb96f9",
            "+1cb2b463f79f2a6eeb96f94",
        ] {
            let err = ProductId::parse(bad).unwrap_err();
            assert_eq!(err.value, bad);
        }
    }

    #[test]
    fn test_generated_ids_are_unique_and_parse_back() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        assert_ne!(a, b);
        assert_eq!(ProductId::parse(&a.format()).unwrap(), a);
    }
}
