//! # Luxe Local Storage (`common::storage`)
//!
//! File: cli/src/common/storage.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A string-keyed, string-valued store with the same surface as the browser's
//! `localStorage`: `get_item`, `set_item`, `remove_item`. The site-side producers
//! and the admin panel share data only through this store, using the keys
//! [`NOTIFICATIONS_KEY`] and [`SETTINGS_KEY`].
//!
//! Two backends implement the [`Storage`] trait:
//! - **`FileStorage`**: one JSON object file (`local_storage.json`) mapping keys to
//!   string values. Every call re-reads the file, so separate processes see each
//!   other's writes on their next read. There is no locking: the last writer wins.
//! - **`MemoryStorage`**: a `BTreeMap` behind a `Mutex`, for tests and single-process use.
//!
use crate::common::fs::io;
use crate::core::error::{LuxeError, Result};
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Shared key carrying the JSON array of notifications.
pub const NOTIFICATIONS_KEY: &str = "adminNotifications";
/// Key carrying the flat admin settings map.
pub const SETTINGS_KEY: &str = "adminSettings";
/// File name of the on-disk store inside the storage directory.
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

/// Key/value persistence with browser-local-storage semantics.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// File-backed storage rooted in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Opens (without creating) the store file inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let Some(raw) = io::read_file_if_exists(&self.path)? else {
            return Ok(BTreeMap::new());
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                // A corrupt file behaves like cleared storage.
                warn!("Ignoring unreadable storage file {:?}: {}", self.path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(map).context("Failed to encode storage map")?;
        io::write_string_atomic(&self.path, &content).map_err(|e| {
            anyhow::Error::from(LuxeError::Storage(format!(
                "could not write {:?}: {:#}",
                self.path, e
            )))
        })
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        debug!("set_item {} ({} bytes)", key, value.len());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            debug!("remove_item {}", key);
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| LuxeError::Storage("memory storage lock poisoned".into()).into())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// Storage that reads and removes normally but rejects every write, like a full quota.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FullStorage {
    pub inner: MemoryStorage,
}

#[cfg(test)]
impl Storage for FullStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<()> {
        Err(LuxeError::Storage(format!("quota exceeded writing '{}'", key)).into())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.inner.remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_roundtrip_between_handles() -> Result<()> {
        let dir = tempdir()?;
        let writer = FileStorage::new(dir.path());
        let reader = FileStorage::new(dir.path());

        assert_eq!(reader.get_item(NOTIFICATIONS_KEY)?, None);
        writer.set_item(NOTIFICATIONS_KEY, "[]")?;
        writer.set_item(SETTINGS_KEY, "{\"siteName\":\"Luxe\"}")?;

        // A second handle sees the write on its next read.
        assert_eq!(reader.get_item(NOTIFICATIONS_KEY)?.as_deref(), Some("[]"));

        reader.remove_item(NOTIFICATIONS_KEY)?;
        assert_eq!(writer.get_item(NOTIFICATIONS_KEY)?, None);
        assert!(writer.get_item(SETTINGS_KEY)?.is_some());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(STORAGE_FILE_NAME), "not json at all")?;
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item(NOTIFICATIONS_KEY)?, None);

        // Writing replaces the corrupt content with a valid map.
        storage.set_item("k", "v")?;
        assert_eq!(storage.get_item("k")?.as_deref(), Some("v"));
        Ok(())
    }

    #[test]
    fn test_remove_missing_key_is_noop() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileStorage::new(dir.path());
        storage.remove_item("missing")?;
        // Nothing was written for a no-op removal.
        assert!(!storage.path().exists());
        Ok(())
    }

    #[test]
    fn test_memory_storage() -> Result<()> {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1")?;
        assert_eq!(storage.get_item("a")?.as_deref(), Some("1"));
        storage.remove_item("a")?;
        assert_eq!(storage.get_item("a")?, None);
        Ok(())
    }
}
