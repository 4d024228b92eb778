// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::MemoryError;
use crate::observability::messages::memory::MemoryLoadedFromDisk;
use crate::observability::messages::StructuredLog;
use crate::register::Record;

/// Storage backend behind a [`MemoryManager`](crate::memory::MemoryManager).
pub trait MemoryStore: Send {
    fn add_store(&mut self, key: &str, value: Value) -> Result<(), MemoryError>;

    /// Fails with [`MemoryError::NotFound`] when the key is absent.
    fn retrieve_store(&self, key: &str) -> Result<Value, MemoryError>;

    /// Deleting an absent key is not an error.
    fn delete_store(&mut self, key: &str) -> Result<(), MemoryError>;

    fn flush(&mut self) -> Result<(), MemoryError>;

    fn contains(&self, key: &str) -> bool;

    /// Number of entries currently cached in process.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Non-durable store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Record) -> Self {
        Self {
            entries: data.into_iter().collect(),
        }
    }
}

impl MemoryStore for InMemoryStore {
    fn add_store(&mut self, key: &str, value: Value) -> Result<(), MemoryError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn retrieve_store(&self, key: &str) -> Result<Value, MemoryError> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| MemoryError::not_found(key))
    }

    fn delete_store(&mut self, key: &str) -> Result<(), MemoryError> {
        self.entries.remove(key);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MemoryError> {
        self.entries.clear();
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Store that writes every entry to `<directory>/<key>.json` and keeps a copy
/// in process. Reads fall back to disk for keys written by another process.
///
/// Only files for keys this store has written are ever removed; other files
/// sharing the directory are left alone.
#[derive(Debug)]
pub struct FileStore {
    directory: PathBuf,
    cache: InMemoryStore,
    written: BTreeSet<String>,
}

impl FileStore {
    /// Creates `directory` if needed. Initial data is cached but not written.
    pub fn new(directory: impl Into<PathBuf>, initial_data: Option<Record>) -> Result<Self, MemoryError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| MemoryError::Io {
            key: directory.display().to_string(),
            source,
        })?;
        Ok(Self {
            directory,
            cache: initial_data.map(InMemoryStore::with_data).unwrap_or_default(),
            written: BTreeSet::new(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file backing `key`. Keys that could resolve outside the
    /// directory are rejected with [`MemoryError::InvalidKey`].
    pub fn file_path(&self, key: &str) -> Result<PathBuf, MemoryError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(MemoryError::InvalidKey { key: key.to_string() });
        }
        Ok(self.directory.join(format!("{key}.json")))
    }

    fn remove_file(&self, key: &str) -> Result<(), MemoryError> {
        match fs::remove_file(self.file_path(key)?) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(MemoryError::Io {
                key: key.to_string(),
                source: e,
            }),
            _ => Ok(()),
        }
    }
}

impl MemoryStore for FileStore {
    fn add_store(&mut self, key: &str, value: Value) -> Result<(), MemoryError> {
        let path = self.file_path(key)?;
        let contents = serde_json::to_string(&value).map_err(|source| MemoryError::Serialization {
            key: key.to_string(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| MemoryError::Io {
            key: key.to_string(),
            source,
        })?;
        self.written.insert(key.to_string());
        self.cache.add_store(key, value)
    }

    fn retrieve_store(&self, key: &str) -> Result<Value, MemoryError> {
        if self.cache.contains(key) {
            return self.cache.retrieve_store(key);
        }

        let path = self.file_path(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(MemoryError::not_found(key)),
            Err(source) => {
                return Err(MemoryError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };
        let value = serde_json::from_str(&contents).map_err(|source| MemoryError::Serialization {
            key: key.to_string(),
            source,
        })?;
        MemoryLoadedFromDisk { key, path: &path }.log();
        Ok(value)
    }

    fn delete_store(&mut self, key: &str) -> Result<(), MemoryError> {
        self.cache.delete_store(key)?;
        self.remove_file(key)?;
        self.written.remove(key);
        Ok(())
    }

    /// Clears the cache and removes the files this store has written.
    fn flush(&mut self) -> Result<(), MemoryError> {
        self.cache.flush()?;
        for key in std::mem::take(&mut self.written) {
            self.remove_file(&key)?;
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.cache.contains(key) || self.file_path(key).is_ok_and(|path| path.is_file())
    }

    fn len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_round_trip() {
        let mut store = InMemoryStore::new();
        store.add_store("k", json!([1, 2])).unwrap();
        assert_eq!(store.retrieve_store("k").unwrap(), json!([1, 2]));
        store.delete_store("k").unwrap();
        assert!(store.retrieve_store("k").unwrap_err().is_not_found());
    }

    #[test]
    fn test_file_store_persists_one_file_per_key() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("memory"), None).unwrap();
        store.add_store("answer", json!({"value": 42})).unwrap();

        let written = fs::read_to_string(store.file_path("answer").unwrap()).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), json!({"value": 42}));

        // A second store over the same directory reads the entry from disk.
        let other = FileStore::new(dir.path().join("memory"), None).unwrap();
        assert!(other.contains("answer"));
        assert_eq!(other.retrieve_store("answer").unwrap(), json!({"value": 42}));
    }

    #[test]
    fn test_file_store_delete_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path(), None).unwrap();
        store.add_store("gone", json!(1)).unwrap();
        store.delete_store("gone").unwrap();

        assert!(!store.file_path("gone").unwrap().exists());
        assert!(store.retrieve_store("gone").unwrap_err().is_not_found());
        store.delete_store("never-existed").unwrap();
    }

    #[test]
    fn test_file_store_flush_clears_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path(), None).unwrap();
        store.add_store("a", json!(1)).unwrap();
        store.add_store("b", json!(2)).unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        store.flush().unwrap();
        assert!(store.is_empty());
        assert!(!store.contains("a"));
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_file_store_flush_keeps_foreign_files() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("settings.json");
        fs::write(&settings, r#"{"theme": "dark"}"#).unwrap();

        let mut store = FileStore::new(dir.path(), None).unwrap();
        store.add_store("mine", json!(1)).unwrap();
        store.flush().unwrap();

        assert!(settings.exists());
        assert!(!store.file_path("mine").unwrap().exists());
        assert!(!store.contains("mine"));
    }

    #[test]
    fn test_file_store_rejects_keys_leaving_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("memory"), None).unwrap();

        for key in ["../escaped", "nested/key", "back\\slash", "..", ""] {
            let err = store.add_store(key, json!(1)).unwrap_err();
            assert!(matches!(err, MemoryError::InvalidKey { .. }), "{key}: {err}");
            assert!(!store.contains(key));
        }
        assert!(!dir.path().join("escaped.json").exists());
        assert!(matches!(
            store.retrieve_store("../escaped").unwrap_err(),
            MemoryError::InvalidKey { .. }
        ));
    }
}
