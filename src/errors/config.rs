// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for pipeline configuration loading and component instantiation.

use std::path::PathBuf;
use thiserror::Error;

use crate::errors::MemoryError;

/// Errors that can occur while loading a pipeline configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported config format for '{path}': expected .yaml, .yml or .toml")]
    UnsupportedFormat { path: PathBuf },

    /// A step references an action that is not built in.
    #[error("Unknown built-in action '{action}' for step {step}")]
    UnknownAction { step: usize, action: String },

    /// A required option is absent from a step.
    #[error("Step {step} ({action}) is missing required option '{option}'")]
    MissingOption {
        step: usize,
        action: String,
        option: &'static str,
    },

    /// An option is present but has the wrong shape.
    #[error("Step {step} ({action}) has invalid option '{option}': {reason}")]
    InvalidOption {
        step: usize,
        action: String,
        option: &'static str,
        reason: String,
    },

    /// The configured memory store could not be initialized.
    #[error("Failed to initialize memory: {0}")]
    Memory(#[from] MemoryError),
}
