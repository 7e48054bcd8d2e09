//! File-backed [`KeyValueStore`].
//!
//! The whole store is one JSON object (`{"key": "value", ...}`) kept in memory and
//! written through on every change. A write goes to a temporary file in the target's
//! directory which is then renamed over the target, so a crash mid-write leaves the
//! previous document intact and readers never see half a file.

use super::{KeyValueStore, StorageError};
use indexmap::IndexMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<IndexMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store; it is created on
    /// the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => IndexMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| StorageError::Corrupt {
                key: path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => IndexMap::new(),
            Err(e) => return Err(StorageError::io(path.display(), e)),
        };
        info!(path = %path.display(), keys = entries.len(), "Opened file store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &IndexMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let json = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Encode {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir.display(), e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path().display(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(self.path.display(), e.error))?;

        debug!(path = %self.path.display(), bytes = json.len(), "Persisted store");
        Ok(())
    }

    fn commit(&self, batch: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        let mut next = entries.clone();
        for (key, value) in batch {
            next.insert(key.to_string(), value.to_string());
        }
        // Only adopt the new state once it is on disk.
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.commit(&[(key, value)])
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let batch: Vec<(&str, &str)> = entries.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.commit(&batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("till.json")).unwrap();
        assert_eq!(store.get("cards").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("till.json");

        let store = FileStore::open(&path).unwrap();
        store.set("cart", "4.50").unwrap();
        store
            .set_many(&[("sold", "3".to_string()), ("revenue", "13.50".to_string())])
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("4.50"));
        assert_eq!(reopened.get("sold").unwrap().as_deref(), Some("3"));
        assert_eq!(reopened.get("revenue").unwrap().as_deref(), Some("13.50"));
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("till.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("till.json");

        // Parent directory does not exist, so the temp file cannot be created.
        let store = FileStore::open(&path).unwrap();
        assert!(store.set("cart", "1.00").is_err());
        assert_eq!(store.get("cart").unwrap(), None);
    }
}
