// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ExecutionError;
use crate::register::{Record, Transformable};
use crate::traits::ActionOutput;

/// Key used for results that are not themselves mappings.
pub const DEFAULT_KEY: &str = "output";

/// Policy governing how a step's result is merged back into the register.
///
/// # Variants
/// * `Inplace` - Merge the result mapping into the current register
/// * `Local` - Replace the register with the result (or only the scoped key when one is set)
/// * `Global` - Replace the entire register unconditionally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacingScope {
    #[default]
    Inplace,
    Local,
    Global,
}

/// Get-key/set-key pair applied around a wrapped unit of work.
///
/// The view reads the value at `get_key` (the whole register when unset)
/// before the unit runs and writes the result back afterwards:
///
/// * a mapping result with no `set_key` is merged into the root (`Inplace`)
///   or replaces the register (`Local`, `Global`)
/// * any other result, or any result when `set_key` is given, lands at
///   `set_key` falling back to `default_key`; under `Global` that key becomes
///   the only key of the register
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedView {
    pub get_key: Option<String>,
    pub set_key: Option<String>,
    pub default_key: String,
    pub replace: ReplacingScope,
}

impl Default for ScopedView {
    fn default() -> Self {
        Self {
            get_key: None,
            set_key: None,
            default_key: DEFAULT_KEY.to_string(),
            replace: ReplacingScope::Inplace,
        }
    }
}

impl ScopedView {
    pub fn new(default_key: impl Into<String>, replace: ReplacingScope) -> Self {
        Self {
            default_key: default_key.into(),
            replace,
            ..Self::default()
        }
    }

    /// Shallow copy of the slice of the register this view reads from.
    pub fn select(&self, register: &Transformable) -> Result<Value, ExecutionError> {
        match &self.get_key {
            None => Ok(Value::Object(register.as_record().clone())),
            Some(key) => register
                .get(key)
                .cloned()
                .ok_or_else(|| ExecutionError::MissingKey { key: key.clone() }),
        }
    }

    /// Key a non-mapping (or explicitly keyed) result is written to.
    pub fn target_key(&self) -> &str {
        self.set_key.as_deref().unwrap_or(&self.default_key)
    }

    /// Merge `result` back into `register` following the view's policy.
    pub fn write(&self, mut register: Transformable, result: ActionOutput) -> Transformable {
        match result {
            ActionOutput::Unchanged => register,
            ActionOutput::Mapping(record) if self.set_key.is_none() => match self.replace {
                ReplacingScope::Local | ReplacingScope::Global => Transformable::new(record),
                ReplacingScope::Inplace => {
                    register.update(record);
                    register
                }
            },
            ActionOutput::Mapping(record) => self.store(register, Value::Object(record)),
            ActionOutput::Value(value) => self.store(register, value),
        }
    }

    fn store(&self, mut register: Transformable, value: Value) -> Transformable {
        let key = self.target_key().to_string();
        if self.replace == ReplacingScope::Global {
            let mut record = Record::new();
            record.insert(key, value);
            return Transformable::new(record);
        }
        register.set(key, value);
        register
    }
}
