// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{
    AddData, Flush, NestToKey, RenameAttribute, RenameAttributeQuery, SetValue, UnpackValue,
};
use crate::config::StepConfig;
use crate::errors::ConfigError;
use crate::flow::Log;
use crate::memory::{
    DeleteMemory, GetMemory, MemoryGetInstruction, MemoryIdentifier, MemorySetInstruction,
    SetMemory,
};
use crate::observability::{LogLevel, Logger};
use crate::register::Record;
use crate::traits::{Action, Component};

/// Factory for built-in steps declared in configuration
pub struct LocalActionFactory;

#[derive(Deserialize)]
struct FlushOptions {
    keys: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct AddDataOptions {
    data: Record,
}

#[derive(Deserialize)]
struct RenameOptions {
    old: String,
    new: String,
}

#[derive(Deserialize)]
struct QueryOptions {
    query: String,
}

#[derive(Deserialize)]
struct SetValueOptions {
    key: String,
    value: Value,
}

#[derive(Deserialize)]
struct KeyOptions {
    key: String,
}

#[derive(Deserialize)]
struct SetMemoryOptions {
    key: String,
    #[serde(default)]
    instruction: MemorySetInstruction,
}

#[derive(Deserialize)]
struct GetMemoryOptions {
    identifiers: Vec<MemoryIdentifier>,
    #[serde(default)]
    default: Record,
    #[serde(default)]
    instruction: MemoryGetInstruction,
}

#[derive(Deserialize)]
struct DeleteMemoryOptions {
    identifiers: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct LogOptions {
    #[serde(default = "default_log_level")]
    level: LogLevel,
    #[serde(default)]
    message: String,
    #[serde(default = "default_include_input_data")]
    include_input_data: bool,
    logger: Option<String>,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_include_input_data() -> bool {
    true
}

impl LocalActionFactory {
    /// Create the component for step `step` of a pipeline.
    ///
    /// The `action` field selects the built-in; its parameters come from
    /// `options`. The scoped view keys (`get_key`, `set_key`, `default_key`,
    /// `replace`) wrap leaf actions; `set_memory` reads `get_key` as the
    /// register key to store.
    pub fn create_component(
        step: usize,
        config: &StepConfig,
    ) -> Result<Arc<dyn Component>, ConfigError> {
        match config.action.as_str() {
            "flush" => {
                let options: FlushOptions = parse_options(step, config, &[])?;
                let action = match options.keys {
                    Some(keys) => Flush::keys(keys),
                    None => Flush::all(),
                };
                Ok(scoped(action, config))
            }
            "add_data" => {
                let options: AddDataOptions = parse_options(step, config, &["data"])?;
                Ok(scoped(AddData::new(options.data), config))
            }
            "rename_attribute" => {
                let options: RenameOptions = parse_options(step, config, &["old", "new"])?;
                Ok(scoped(RenameAttribute::new(options.old, options.new), config))
            }
            "rename_attribute_query" => {
                let options: QueryOptions = parse_options(step, config, &["query"])?;
                let action = RenameAttributeQuery::new(options.query).map_err(|e| {
                    ConfigError::InvalidOption {
                        step,
                        action: config.action.clone(),
                        option: "query",
                        reason: e.to_string(),
                    }
                })?;
                Ok(scoped(action, config))
            }
            "set_value" => {
                let options: SetValueOptions = parse_options(step, config, &["key", "value"])?;
                Ok(scoped(SetValue::new(options.key, options.value), config))
            }
            "unpack_value" => {
                let options: KeyOptions = parse_options(step, config, &["key"])?;
                Ok(scoped(UnpackValue::new(options.key), config))
            }
            "nest_to_key" => {
                let options: KeyOptions = parse_options(step, config, &["key"])?;
                Ok(scoped(NestToKey::new(options.key), config))
            }
            "set_memory" => {
                let options: SetMemoryOptions = parse_options(step, config, &["key"])?;
                let component = SetMemory::new(options.key).instruction(options.instruction);
                let component = match &config.get_key {
                    Some(key) => component.get_key(key),
                    None => component,
                };
                Ok(named(component, config))
            }
            "get_memory" => {
                let options: GetMemoryOptions = parse_options(step, config, &["identifiers"])?;
                let component = GetMemory::new(options.identifiers)
                    .with_default(options.default)
                    .instruction(options.instruction);
                Ok(named(component, config))
            }
            "delete_memory" => {
                let options: DeleteMemoryOptions = parse_options(step, config, &[])?;
                let component = match options.identifiers {
                    Some(keys) => DeleteMemory::keys(keys),
                    None => DeleteMemory::all(),
                };
                Ok(named(component, config))
            }
            "log" => {
                let options: LogOptions = parse_options(step, config, &[])?;
                let component = Log::new(options.level)
                    .message(options.message)
                    .include_input_data(options.include_input_data);
                let component = match options.logger {
                    Some(logger) => component.logger(Logger::new(logger, LogLevel::Trace)),
                    None => component,
                };
                Ok(named(component, config))
            }
            other => Err(ConfigError::UnknownAction {
                step,
                action: other.to_string(),
            }),
        }
    }

    /// List all available built-in step names
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "flush",
            "add_data",
            "rename_attribute",
            "rename_attribute_query",
            "set_value",
            "unpack_value",
            "nest_to_key",
            "set_memory",
            "get_memory",
            "delete_memory",
            "log",
        ]
    }

    pub fn is_implementation_available(action: &str) -> bool {
        Self::list_available_implementations().contains(&action)
    }
}

fn parse_options<T: DeserializeOwned>(
    step: usize,
    config: &StepConfig,
    required: &[&'static str],
) -> Result<T, ConfigError> {
    if let Some(option) = required.iter().find(|o| !config.options.contains_key(**o)) {
        return Err(ConfigError::MissingOption {
            step,
            action: config.action.clone(),
            option: *option,
        });
    }
    serde_json::from_value(Value::Object(config.options.clone())).map_err(|e| {
        ConfigError::InvalidOption {
            step,
            action: config.action.clone(),
            option: "options",
            reason: e.to_string(),
        }
    })
}

fn scoped<A: Action + 'static>(action: A, config: &StepConfig) -> Arc<dyn Component> {
    let mut executor = action.into_executor();
    if let Some(key) = &config.get_key {
        executor = executor.get_key(key);
    }
    if let Some(key) = &config.set_key {
        executor = executor.set_key(key);
    }
    if let Some(key) = &config.default_key {
        executor = executor.default_key(key);
    }
    if let Some(replace) = config.replace {
        executor = executor.replace(replace);
    }
    named(executor, config)
}

fn named<C: Component + 'static>(mut component: C, config: &StepConfig) -> Arc<dyn Component> {
    if let Some(name) = &config.name {
        component.set_name(name.clone());
    }
    Arc::new(component)
}
