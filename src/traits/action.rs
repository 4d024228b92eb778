// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::engine::ActionExecutor;
use crate::errors::ExecutionError;
use crate::register::{Record, ReplacingScope, DEFAULT_KEY};
use crate::traits::component::short_type_name;

/// Shape of an action result, resolved by the action itself.
///
/// # Variants
/// * `Unchanged` - No-op; the register is returned as is
/// * `Mapping` - Key/value result merged or replaced per [`ReplacingScope`]
/// * `Value` - Any other value, stored under the set key or default key
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    Unchanged,
    Mapping(Record),
    Value(Value),
}

impl ActionOutput {
    /// Classify a raw JSON result: `null` leaves the register untouched,
    /// objects are mappings, anything else is a plain value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ActionOutput::Unchanged,
            Value::Object(record) => ActionOutput::Mapping(record),
            other => ActionOutput::Value(other),
        }
    }
}

impl From<Record> for ActionOutput {
    fn from(record: Record) -> Self {
        ActionOutput::Mapping(record)
    }
}

impl From<Value> for ActionOutput {
    fn from(value: Value) -> Self {
        ActionOutput::Value(value)
    }
}

/// Pure, synchronous transformation of a slice of the register.
///
/// An action receives a copy of the selected slice (the whole register as an
/// object, or the value under a get key) and never retains state between
/// calls except through its own fields. Wrap it with [`Action::into_executor`]
/// to turn it into a [`Component`](crate::traits::Component).
pub trait Action: Send + Sync {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError>;

    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Key used for results that are not mappings.
    fn default_key(&self) -> &str {
        DEFAULT_KEY
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Inplace
    }

    /// Wrap into a component operating on the register root.
    fn into_executor(self) -> ActionExecutor
    where
        Self: Sized + 'static,
    {
        ActionExecutor::new(self)
    }

    /// Wrap into a component operating on a scoped view of the register.
    fn scoped(self, get_key: Option<&str>, set_key: Option<&str>) -> ActionExecutor
    where
        Self: Sized + 'static,
    {
        let executor = ActionExecutor::new(self);
        let executor = match get_key {
            Some(key) => executor.get_key(key),
            None => executor,
        };
        match set_key {
            Some(key) => executor.set_key(key),
            None => executor,
        }
    }
}

/// Take the input as a mapping or fail with `InvalidInput`.
pub fn expect_record(input: Value) -> Result<Record, ExecutionError> {
    match input {
        Value::Object(record) => Ok(record),
        other => Err(ExecutionError::InvalidInput(format!(
            "Expected a mapping, received: {}",
            value_kind(&other)
        ))),
    }
}

/// Human-readable JSON type of a value.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
