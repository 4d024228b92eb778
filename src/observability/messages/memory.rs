// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for memory store events.

use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::observability::messages::StructuredLog;
use crate::observability::LogLevel;

/// Value written to memory.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct MemoryStored<'a> {
    pub key: &'a str,
    pub persisted: bool,
}

impl Display for MemoryStored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.persisted {
            write!(f, "Memory: stored '{}' (persisted)", self.key)
        } else {
            write!(f, "Memory: stored '{}'", self.key)
        }
    }
}

impl StructuredLog for MemoryStored<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// Value read back from its on-disk file.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct MemoryLoadedFromDisk<'a> {
    pub key: &'a str,
    pub path: &'a Path,
}

impl Display for MemoryLoadedFromDisk<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Memory: loaded '{}' from {}",
            self.key,
            self.path.display()
        )
    }
}

impl StructuredLog for MemoryLoadedFromDisk<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// Identifier missing from memory; the supplied default was used.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct MemoryDefaultUsed<'a> {
    pub key: &'a str,
}

impl Display for MemoryDefaultUsed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Memory: '{}' not found, using default", self.key)
    }
}

impl StructuredLog for MemoryDefaultUsed<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// All entries removed.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct MemoryFlushed {
    pub entries: usize,
}

impl Display for MemoryFlushed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Memory: flushed {} entries", self.entries)
    }
}

impl StructuredLog for MemoryFlushed {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}
