//! Runtime configuration for a till process.

use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Mailbox capacity used when none is configured.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Where the till keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Nothing survives the process.
    Memory,
    /// One JSON document on disk.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TillConfig {
    pub storage: StorageConfig,
    pub mailbox_capacity: usize,
}

impl Default for TillConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::Memory,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl TillConfig {
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig::File(path.into()),
            ..Self::default()
        }
    }

    /// Opens the configured persistence port.
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        match &self.storage {
            StorageConfig::Memory => {
                info!("Using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StorageConfig::File(path) => Ok(Arc::new(FileStore::open(path)?)),
        }
    }
}
