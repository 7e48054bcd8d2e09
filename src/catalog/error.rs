//! Error types for the catalog store.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// Missing or malformed input (empty name, non-positive price).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A product with this exact name already exists.
    #[error("Product already exists: {0}")]
    DuplicateName(String),

    /// The named product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The persistence port failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
