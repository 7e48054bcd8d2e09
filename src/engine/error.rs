//! Error types surfaced by the transaction engine.

use crate::catalog::CatalogError;
use crate::money::MoneyError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during till operations.
///
/// Every variant aborts the operation that raised it with no state written. None of
/// them is fatal: the till keeps serving requests afterwards.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TillError {
    /// Missing product name, or a price that is non-numeric, not positive or too large.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A product with this name already exists.
    #[error("Product already exists: {0}")]
    DuplicateName(String),

    /// An explicit delete named a product that does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product is out of stock. Nothing was recorded.
    #[error("\"{name}\" is out of stock and cannot be purchased")]
    BlockedSale { name: String },

    /// The sale would carry an amount past [`Money::MAX`](crate::money::Money::MAX).
    /// Nothing was recorded.
    #[error("Cannot sell \"{name}\": {reason}")]
    LimitExceeded { name: String, reason: String },

    /// The persistence port failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CatalogError> for TillError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => TillError::Validation(msg),
            CatalogError::DuplicateName(name) => TillError::DuplicateName(name),
            CatalogError::NotFound(name) => TillError::NotFound(name),
            CatalogError::Storage(e) => TillError::Storage(e),
        }
    }
}

impl From<MoneyError> for TillError {
    fn from(err: MoneyError) -> Self {
        TillError::Validation(err.to_string())
    }
}
