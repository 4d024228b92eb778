// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;
use serde_json::Value;

use crate::config::MemoryConfig;
use crate::errors::MemoryError;
use crate::memory::store::{FileStore, InMemoryStore, MemoryStore};
use crate::observability::messages::memory::{MemoryDefaultUsed, MemoryFlushed, MemoryStored};
use crate::observability::messages::StructuredLog;
use crate::register::{Record, Transformable};

/// Memory key to read, and the register key to write it to.
///
/// Deserializes from either a plain string or a two-element list
/// `[memory_key, register_key]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MemoryIdentifier {
    Key(String),
    Mapped(String, String),
}

impl MemoryIdentifier {
    pub fn memory_key(&self) -> &str {
        match self {
            MemoryIdentifier::Key(key) | MemoryIdentifier::Mapped(key, _) => key,
        }
    }

    pub fn register_key(&self) -> &str {
        match self {
            MemoryIdentifier::Key(key) | MemoryIdentifier::Mapped(_, key) => key,
        }
    }
}

impl From<&str> for MemoryIdentifier {
    fn from(key: &str) -> Self {
        MemoryIdentifier::Key(key.to_string())
    }
}

impl From<String> for MemoryIdentifier {
    fn from(key: String) -> Self {
        MemoryIdentifier::Key(key)
    }
}

impl From<(&str, &str)> for MemoryIdentifier {
    fn from((memory_key, register_key): (&str, &str)) -> Self {
        MemoryIdentifier::Mapped(memory_key.to_string(), register_key.to_string())
    }
}

/// Thread-safe front over a [`MemoryStore`], shared behind `Arc` by an
/// evaluator and its children.
pub struct MemoryManager {
    store: Mutex<Box<dyn MemoryStore>>,
    persistent: bool,
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryManager")
            .field("entries", &self.lock().len())
            .field("persistent", &self.persistent)
            .finish()
    }
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    pub fn with_initial_data(data: Record) -> Self {
        Self::with_store(InMemoryStore::with_data(data))
    }

    /// File-backed memory persisting each entry as `<directory>/<key>.json`.
    pub fn file_backed(directory: impl AsRef<Path>, initial_data: Option<Record>) -> Result<Self, MemoryError> {
        let store = FileStore::new(directory.as_ref(), initial_data)?;
        Ok(Self {
            store: Mutex::new(Box::new(store)),
            persistent: true,
        })
    }

    pub fn with_store(store: impl MemoryStore + 'static) -> Self {
        Self {
            store: Mutex::new(Box::new(store)),
            persistent: false,
        }
    }

    pub fn from_config(config: &MemoryConfig) -> Result<Self, MemoryError> {
        match &config.directory {
            Some(directory) => Self::file_backed(directory, config.initial_data.clone()),
            None => Ok(Self::with_initial_data(
                config.initial_data.clone().unwrap_or_default(),
            )),
        }
    }

    /// Recovers a poisoned lock; stores never hold partial writes.
    fn lock(&self) -> MutexGuard<'_, Box<dyn MemoryStore>> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_store(&self, key: &str, value: Value) -> Result<(), MemoryError> {
        self.lock().add_store(key, value)?;
        MemoryStored {
            key,
            persisted: self.persistent,
        }
        .log();
        Ok(())
    }

    pub fn retrieve_store(&self, key: &str) -> Result<Value, MemoryError> {
        self.lock().retrieve_store(key)
    }

    pub fn delete_store(&self, key: &str) -> Result<(), MemoryError> {
        self.lock().delete_store(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy entries into `register`, see [`Evaluator::get_memory`](crate::engine::Evaluator::get_memory).
    ///
    /// Defaults are written to the register only, never to memory.
    pub fn get(
        &self,
        mut register: Transformable,
        identifiers: &[MemoryIdentifier],
        default: &Record,
        delete: bool,
    ) -> Result<Transformable, MemoryError> {
        for identifier in identifiers {
            let key = identifier.memory_key();
            let value = match self.retrieve_store(key) {
                Ok(value) => value,
                Err(e) if e.is_not_found() => {
                    let fallback = default.get(key).cloned().ok_or(e)?;
                    MemoryDefaultUsed { key }.log();
                    fallback
                }
                Err(e) => return Err(e),
            };
            register.set(identifier.register_key(), value);
            if delete {
                self.delete_store(key)?;
            }
        }
        Ok(register)
    }

    pub fn set(&self, key: &str, value: Value) -> Result<(), MemoryError> {
        self.add_store(key, value)
    }

    pub fn delete(&self, key: &str) -> Result<(), MemoryError> {
        self.delete_store(key)
    }

    pub fn flush(&self) -> Result<(), MemoryError> {
        let mut store = self.lock();
        let entries = store.len();
        store.flush()?;
        MemoryFlushed { entries }.log();
        Ok(())
    }
}
