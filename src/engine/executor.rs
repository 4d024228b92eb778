// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Scoped-view wrappers for leaf units of work.
//!
//! Both executors read their input through a [`ScopedView`], run the wrapped
//! unit on a copy of that slice and write the result back following the
//! view's [`ReplacingScope`]. Every failure, including a missing get key, is
//! wrapped with the executor's display name.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use the_conduit::actions::SetValue;
//! use the_conduit::traits::{Action, Component};
//!
//! let step = SetValue::new("greeting", json!("hi")).scoped(None, Some("reply"));
//! let input = json!({"name": "ferris"}).as_object().cloned().unwrap();
//!
//! let output = step.run(input).unwrap();
//! assert_eq!(output["reply"], json!({"name": "ferris", "greeting": "hi"}));
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::engine::Evaluator;
use crate::errors::ExecutionError;
use crate::observability::messages::component::{ActionExecuted, ExecutableExecuted};
use crate::observability::messages::StructuredLog;
use crate::register::{ReplacingScope, ScopedView, Transformable, DEFAULT_KEY};
use crate::traits::action::{expect_record, value_kind};
use crate::traits::{Action, ActionOutput, Component, ComponentResult, Executable, Outcome};

/// Component wrapping an [`Action`].
#[derive(Clone)]
pub struct ActionExecutor {
    action: Arc<dyn Action>,
    name: String,
    view: ScopedView,
}

impl ActionExecutor {
    pub fn new<A: Action + 'static>(action: A) -> Self {
        let view = ScopedView::new(action.default_key(), action.replacing_scope());
        let name = action.name().to_string();
        Self {
            action: Arc::new(action),
            name,
            view,
        }
    }

    /// Read the action's input from `key` instead of the register root.
    pub fn get_key(mut self, key: impl Into<String>) -> Self {
        self.view.get_key = Some(key.into());
        self
    }

    /// Store the action's result at `key`, even when it is a mapping.
    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.view.set_key = Some(key.into());
        self
    }

    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        self.view.default_key = key.into();
        self
    }

    pub fn replace(mut self, replace: ReplacingScope) -> Self {
        self.view.replace = replace;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn view(&self) -> &ScopedView {
        &self.view
    }
}

impl Component for ActionExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let data = self
            .view
            .select(&input)
            .map_err(|e| ExecutionError::action(&self.name, e))?;
        let result = self
            .action
            .execute(data)
            .map_err(|e| ExecutionError::action(&self.name, e))?;

        ActionExecuted { action: &self.name }.log_to(evaluator.logger());
        Ok(Outcome::Next(self.view.write(input, result)))
    }
}

/// Component wrapping an [`Executable`].
///
/// A mapping input runs the executable once. A list input runs it once per
/// element; each element's result is the element merged with the
/// executable's output, and the list lands at the set key or default key.
pub struct ExecutableExecutor<E> {
    executable: Arc<E>,
    name: String,
    view: ScopedView,
}

impl<E> Clone for ExecutableExecutor<E> {
    fn clone(&self) -> Self {
        Self {
            executable: Arc::clone(&self.executable),
            name: self.name.clone(),
            view: self.view.clone(),
        }
    }
}

impl<E: Executable + 'static> ExecutableExecutor<E> {
    pub fn new(executable: E) -> Self {
        let view = ScopedView::new(DEFAULT_KEY, executable.replacing_scope());
        let name = executable.name().to_string();
        Self {
            executable: Arc::new(executable),
            name,
            view,
        }
    }

    pub fn get_key(mut self, key: impl Into<String>) -> Self {
        self.view.get_key = Some(key.into());
        self
    }

    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.view.set_key = Some(key.into());
        self
    }

    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        self.view.default_key = key.into();
        self
    }

    pub fn replace(mut self, replace: ReplacingScope) -> Self {
        self.view.replace = replace;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn view(&self) -> &ScopedView {
        &self.view
    }

    fn execute_each(&self, items: Vec<Value>, evaluator: &Evaluator) -> Result<Value, ExecutionError> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let mut record = expect_record(item).map_err(|e| ExecutionError::executable(&self.name, e))?;
            let output = self.executable.execute(record.clone(), evaluator)?;
            record.extend(output);
            results.push(Value::Object(record));
        }
        Ok(Value::Array(results))
    }
}

impl<E: Executable + 'static> Component for ExecutableExecutor<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Failures inside [`Executable::execute`] arrive already wrapped with
    /// the executable's name.
    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let data = self
            .view
            .select(&input)
            .map_err(|e| ExecutionError::executable(&self.name, e))?;
        let (result, items) = match data {
            Value::Object(record) => (
                ActionOutput::Mapping(self.executable.execute(record, evaluator)?),
                1,
            ),
            Value::Array(items) => {
                let count = items.len();
                (ActionOutput::Value(self.execute_each(items, evaluator)?), count)
            }
            other => {
                return Err(ExecutionError::executable(
                    &self.name,
                    ExecutionError::InvalidInput(format!(
                        "Unexpected data type for processing: {}",
                        value_kind(&other)
                    )),
                ))
            }
        };

        ExecutableExecuted {
            executable: &self.name,
            items,
        }
        .log_to(evaluator.logger());
        Ok(Outcome::Next(self.view.write(input, result)))
    }
}
