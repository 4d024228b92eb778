// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::Value;

use crate::engine::Evaluator;
use crate::errors::ExecutionError;
use crate::register::Transformable;
use crate::traits::action::{expect_record, value_kind};
use crate::traits::{Component, ComponentResult, Outcome};

/// Run a schema once per element of a list, sequentially and in order.
///
/// Each element runs in isolation: a fresh register built from the element,
/// in a child evaluator. The list of results is written to `set_key`
/// (`get_key` when unset). A loop-exit signal raised by an element leaves
/// the register untouched and is passed on.
pub struct ForEach {
    name: String,
    schema: Arc<dyn Component>,
    get_key: String,
    set_key: String,
}

impl ForEach {
    pub fn new<C: Component + 'static>(schema: C, get_key: impl Into<String>) -> Self {
        let get_key = get_key.into();
        Self {
            name: "ForEach".to_string(),
            schema: Arc::new(schema),
            set_key: get_key.clone(),
            get_key,
        }
    }

    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.set_key = key.into();
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Materialize the list stored at `key`.
pub(crate) fn list_at(register: &Transformable, key: &str) -> Result<Vec<Value>, ExecutionError> {
    match register.get(key) {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(ExecutionError::InvalidInput(format!(
            "Expected a list at '{}', received: {}",
            key,
            value_kind(other)
        ))),
        None => Err(ExecutionError::MissingKey { key: key.to_string() }),
    }
}

impl Component for ForEach {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, mut input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let items = list_at(&input, &self.get_key)?;
        let body = evaluator.create_child(Arc::clone(&self.schema), &self.name);

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let element = Transformable::new(expect_record(item)?);
            match body.evaluate(element)? {
                Outcome::Next(result) => results.push(Value::from(result)),
                Outcome::ExitLoop(_) => return Ok(Outcome::ExitLoop(input)),
            }
        }

        input.set(self.set_key.clone(), Value::Array(results));
        Ok(Outcome::Next(input))
    }
}
