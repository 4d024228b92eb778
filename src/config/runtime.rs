// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::Arc;

use crate::actions::LocalActionFactory;
use crate::config::{load_config, PipelineConfig};
use crate::engine::{Evaluator, ExecutionSchema};
use crate::errors::ConfigError;
use crate::memory::MemoryManager;

/// Pipeline runtime builder - turns a [`PipelineConfig`] into a ready [`Evaluator`].
///
/// Every step is instantiated through [`LocalActionFactory`] in declaration
/// order; the first step that cannot be built aborts construction.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use the_conduit::config::{PipelineConfig, RuntimeBuilder};
///
/// let config = PipelineConfig::from_yaml_str(r#"
/// steps:
///   - action: set_value
///     options: { key: greeting, value: hello }
///   - action: nest_to_key
///     options: { key: message }
/// "#).unwrap();
///
/// let evaluator = RuntimeBuilder::from_config(&config).unwrap();
/// let output = evaluator.run(Default::default()).unwrap();
/// assert_eq!(output["message"], json!({"greeting": "hello"}));
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the evaluator described by `cfg`.
    pub fn from_config(cfg: &PipelineConfig) -> Result<Evaluator, ConfigError> {
        let steps = cfg
            .steps
            .iter()
            .enumerate()
            .map(|(step, config)| LocalActionFactory::create_component(step, config))
            .collect::<Result<Vec<_>, _>>()?;

        let memory = match &cfg.evaluator.memory {
            Some(memory) => MemoryManager::from_config(memory)?,
            None => MemoryManager::new(),
        };

        Ok(Evaluator::new(ExecutionSchema::from_steps(steps))
            .with_name(cfg.evaluator.name.clone())
            .with_log_level(cfg.evaluator.log_level)
            .with_fast_exit(cfg.evaluator.fast_exit)
            .with_memory_manager(Arc::new(memory)))
    }

    /// Load a configuration file and build its evaluator.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Evaluator, ConfigError> {
        Self::from_config(&load_config(path)?)
    }
}
