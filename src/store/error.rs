//! Error types for the store gateway.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Transport or driver failure. Safe for the caller to retry.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with something structurally unexpected.
    #[error("Unexpected store response: {0}")]
    Internal(String),

    /// A document exists under this id but cannot be mapped to a Product.
    #[error("Document {id} could not be decoded: {reason}")]
    Decode { id: String, reason: String },

    /// The call did not complete before the request deadline.
    #[error("Store call exceeded the request deadline")]
    DeadlineExceeded,
}
