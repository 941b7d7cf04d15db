//! Error types for the product handlers.

use crate::model::InvalidIdentifier;
use crate::store::StoreError;
use thiserror::Error;
use tonic::Status;

/// Errors a product request can fail with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The identifier is not a well-formed ObjectId string.
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    /// A required field is missing or cannot be represented.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The identifier is well formed but no document matches (or remains).
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Transient store failure. Callers may retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store answered with something unexpected. Needs investigation.
    #[error("Store returned an unexpected result: {0}")]
    StoreInternal(String),

    /// The request deadline passed while waiting on the store.
    #[error("Deadline exceeded while waiting on the store")]
    DeadlineExceeded,
}

/// Coarse classification of a [`ProductError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    StoreUnavailable,
    StoreInternal,
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::InvalidIdentifier(_) | ProductError::InvalidArgument(_) => {
                ErrorKind::InvalidArgument
            }
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::StoreUnavailable(_) | ProductError::DeadlineExceeded => {
                ErrorKind::StoreUnavailable
            }
            ProductError::StoreInternal(_) => ErrorKind::StoreInternal,
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::StoreUnavailable
    }
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ProductError::StoreUnavailable(msg),
            StoreError::Internal(msg) => ProductError::StoreInternal(msg),
            StoreError::Decode { id, .. } => ProductError::NotFound(id),
            StoreError::DeadlineExceeded => ProductError::DeadlineExceeded,
        }
    }
}

impl From<ProductError> for Status {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::InvalidIdentifier(_) | ProductError::InvalidArgument(_) => {
                Status::invalid_argument(message)
            }
            ProductError::NotFound(_) => Status::not_found(message),
            ProductError::StoreUnavailable(_) => Status::unavailable(message),
            ProductError::StoreInternal(_) => Status::internal(message),
            ProductError::DeadlineExceeded => Status::deadline_exceeded(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use tonic::Code;

    #[test]
    fn test_status_codes() {
        let invalid = ProductId::parse("nope").unwrap_err();
        let cases = [
            (ProductError::from(invalid), Code::InvalidArgument),
            (ProductError::InvalidArgument("name is required".into()), Code::InvalidArgument),
            (ProductError::NotFound("x".into()), Code::NotFound),
            (ProductError::StoreUnavailable("reset".into()), Code::Unavailable),
            (ProductError::StoreInternal("bad id".into()), Code::Internal),
            (ProductError::DeadlineExceeded, Code::DeadlineExceeded),
        ];
        for (err, code) in cases {
            assert_eq!(Status::from(err).code(), code);
        }
    }

    #[test]
    fn test_store_errors_map_to_taxonomy() {
        let decode = StoreError::Decode {
            id: "abc".into(),
            reason: "missing field".into(),
        };
        assert_eq!(ProductError::from(decode).kind(), ErrorKind::NotFound);
        assert!(ProductError::from(StoreError::Unavailable("down".into())).is_retryable());
        assert!(ProductError::from(StoreError::DeadlineExceeded).is_retryable());
        assert!(!ProductError::from(StoreError::Internal("?".into())).is_retryable());
    }
}
