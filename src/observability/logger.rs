// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

/// Logger name used for events emitted outside any evaluator.
pub const ENGINE_LOGGER: &str = "the_conduit";

/// Severity of a log event, or a logger threshold.
///
/// `Off` is only meaningful as a threshold: a logger at `Off` drops everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

/// Named emitter with a level threshold.
///
/// Events below the threshold are dropped before they reach `tracing`; the
/// installed subscriber still applies its own filtering on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Logger {
    name: String,
    level: LogLevel,
}

impl Logger {
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && self.level != LogLevel::Off && level >= self.level
    }

    pub fn log(&self, level: LogLevel, message: &dyn Display) {
        if self.enabled(level) {
            emit(level, &self.name, message);
        }
    }
}

pub(crate) fn emit(level: LogLevel, logger: &str, message: &dyn Display) {
    match level {
        LogLevel::Trace => tracing::trace!(logger, "{}", message),
        LogLevel::Debug => tracing::debug!(logger, "{}", message),
        LogLevel::Info => tracing::info!(logger, "{}", message),
        LogLevel::Warn => tracing::warn!(logger, "{}", message),
        LogLevel::Error => tracing::error!(logger, "{}", message),
        LogLevel::Off => {}
    }
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
pub fn init_tracing(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
