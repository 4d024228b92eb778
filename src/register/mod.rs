// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The data register threaded through a pipeline run.
//!
//! A [`Transformable`] wraps a flat mapping from string keys to dynamically
//! typed values. The register imposes no schema of its own; nesting only
//! exists because values may themselves be mappings or lists of mappings.
//! Type checking happens at [`Executable`](crate::traits::Executable)
//! boundaries, never here.

mod scope;

pub use scope::{ReplacingScope, ScopedView, DEFAULT_KEY};

use serde_json::{Map, Value};
use std::fmt;

/// Flat mapping from string keys to arbitrary values.
pub type Record = Map<String, Value>;

/// Mutable data register owned by whichever component currently executes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformable {
    state: Record,
}

impl Transformable {
    pub fn new(state: Record) -> Self {
        Self { state }
    }

    /// Unpack the underlying mapping.
    pub fn extract(self) -> Record {
        self.state
    }

    pub fn as_record(&self) -> &Record {
        &self.state
    }

    pub fn as_record_mut(&mut self) -> &mut Record {
        &mut self.state
    }

    /// Merge keys from `data`, overwriting existing ones.
    pub fn update(&mut self, data: Record) {
        self.state.extend(data);
    }

    /// Remove all keys.
    pub fn flush(&mut self) {
        self.state.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Safe lookup returning `default` when the key is absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.state.get(key).cloned().unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.state.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.state.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl From<Record> for Transformable {
    fn from(state: Record) -> Self {
        Self::new(state)
    }
}

impl From<Transformable> for Record {
    fn from(register: Transformable) -> Self {
        register.extract()
    }
}

impl From<Transformable> for Value {
    fn from(register: Transformable) -> Self {
        Value::Object(register.extract())
    }
}

impl fmt::Display for Transformable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transformable({})", Value::Object(self.state.clone()))
    }
}
