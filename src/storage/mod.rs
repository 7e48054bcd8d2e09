//! # Persistence Port
//!
//! The till never touches a storage medium directly. Everything it persists goes
//! through [`KeyValueStore`], a string-keyed `get`/`set` interface injected at startup,
//! so the engine runs unchanged against an in-memory map in tests and a JSON file on
//! disk in the binary.
//!
//! ## Layout
//!
//! | Key | Value | Written by |
//! |---|---|---|
//! | [`CARDS_KEY`] | JSON object of product records | catalog store |
//! | [`CART_KEY`] | decimal string | transaction engine |
//! | [`SOLD_KEY`] | integer string | transaction engine |
//! | [`REVENUE_KEY`] | decimal string | transaction engine |
//!
//! ## Implementations
//!
//! - [`MemoryStore`] - process-local map
//! - [`FileStore`] - one JSON document on disk, replaced atomically on every write

pub mod error;
pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

pub const CARDS_KEY: &str = "cards";
pub const CART_KEY: &str = "cart";
pub const SOLD_KEY: &str = "sold";
pub const REVENUE_KEY: &str = "revenue";

/// A synchronous string key-value store.
///
/// Methods take `&self`; implementations own their interior locking so a store can be
/// shared behind an [`Arc`]. A `set` either replaces the value completely or fails and
/// leaves the previous value readable.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Writes several keys. The default writes them one after another; stores that can
    /// commit a batch in one step override it.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}
