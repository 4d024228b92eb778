// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::observability::LogLevel;
use crate::register::{Record, ReplacingScope};

const DEFAULT_EVALUATOR_NAME: &str = "Evaluator";

/// Declarative description of a linear pipeline.
///
/// A pipeline is an [`EvaluatorConfig`] plus the ordered list of built-in
/// steps its schema runs. It is typically loaded from a YAML or TOML file.
///
/// # Example
/// ```yaml
/// evaluator:
///   name: Greeter
///   log_level: info
///   fast_exit: true
///   memory:
///     initial_data:
///       salutation: Hello
/// steps:
///   - action: get_memory
///     options:
///       identifiers: [salutation]
///   - action: rename_attribute
///     name: Rename
///     options: { old: salutation, new: greeting }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

impl PipelineConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Evaluator settings.
///
/// # Fields
/// * `name` - Display name of the top-level evaluator (defaults to `Evaluator`)
/// * `log_level` - Threshold of the evaluator's logger (defaults to `trace`)
/// * `fast_exit` - Abort a schema at its first failing step (defaults to `true`)
/// * `memory` - Memory store settings; an empty in-memory store when absent
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default = "default_evaluator_name")]
    pub name: String,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default = "default_fast_exit")]
    pub fast_exit: bool,
    #[serde(default)]
    pub memory: Option<MemoryConfig>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            name: default_evaluator_name(),
            log_level: LogLevel::default(),
            fast_exit: default_fast_exit(),
            memory: None,
        }
    }
}

fn default_evaluator_name() -> String {
    DEFAULT_EVALUATOR_NAME.to_string()
}

fn default_fast_exit() -> bool {
    true
}

/// Memory store settings.
///
/// With a `directory`, entries persist as one JSON file per key; otherwise
/// they live in process memory. `initial_data` seeds the store either way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryConfig {
    pub directory: Option<PathBuf>,
    pub initial_data: Option<Record>,
}

/// One built-in step.
///
/// # Fields
/// * `action` - Built-in name, see [`LocalActionFactory`](crate::actions::LocalActionFactory)
/// * `name` - Display name override
/// * `get_key`, `set_key`, `default_key`, `replace` - Scoped view applied around the step
/// * `options` - Step-specific parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepConfig {
    pub action: String,
    pub name: Option<String>,
    pub get_key: Option<String>,
    pub set_key: Option<String>,
    pub default_key: Option<String>,
    pub replace: Option<ReplacingScope>,
    #[serde(default)]
    pub options: Record,
}

/// Load a pipeline from a `.yaml`, `.yml` or `.toml` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let read = || {
        fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_deref() {
        Some("yaml") | Some("yml") => PipelineConfig::from_yaml_str(&read()?),
        Some("toml") => PipelineConfig::from_toml_str(&read()?),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
