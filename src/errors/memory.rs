// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by memory stores.

use thiserror::Error;

/// Errors that can occur while reading or writing memory entries
#[derive(Error, Debug)]
pub enum MemoryError {
    /// No entry exists for the key, in process or on disk.
    #[error("No specified identifier found: {key}")]
    NotFound { key: String },

    /// The key cannot name a file inside the store directory.
    #[error("Invalid memory key '{key}': keys must be non-empty and free of path separators and '..'")]
    InvalidKey { key: String },

    /// Reading or writing the backing file failed.
    #[error("I/O error for memory key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value could not be (de)serialized as JSON.
    #[error("Serialization error for memory key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MemoryError {
    pub fn not_found(key: impl Into<String>) -> Self {
        MemoryError::NotFound { key: key.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MemoryError::NotFound { .. })
    }
}
