//! Error types for the persistence port.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore) implementation or while
/// encoding and decoding the values it holds.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error at {path}: {reason}")]
    Io { path: String, reason: String },

    /// A stored value could not be decoded.
    #[error("Corrupt value under key {key:?}: {reason}")]
    Corrupt { key: String, reason: String },

    /// A value could not be encoded for storage.
    #[error("Failed to encode value for key {key:?}: {reason}")]
    Encode { key: String, reason: String },

    /// Another holder of the store panicked mid-write.
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        StorageError::Io {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }
}
