// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution context for pipeline runs.
//!
//! An [`Evaluator`] wraps one component (usually an [`ExecutionSchema`]) and
//! drives it against a register. It owns the [`Logger`] every nested step
//! logs through, the fast-exit policy schemas consult, and a shared
//! [`MemoryManager`].
//!
//! # Nesting
//!
//! Control-flow constructs run their bodies in child evaluators created with
//! [`Evaluator::create_child`]. A child is named `parent.child`, inherits the
//! parent's log level and fast-exit policy, and shares the parent's memory;
//! it never shares the parent's register.
//!
//! # Error chain
//!
//! Every error escaping the wrapped component is logged and wrapped with the
//! evaluator's name, so nested evaluators produce one named layer each:
//!
//! ```text
//! Evaluator: Evaluator.While: ExecutionSchema: Execution schema failed at step 0 (Parse): ...
//! ```

use std::fmt::Display;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::ExecutionSchema;
use crate::errors::ExecutionError;
use crate::memory::{MemoryIdentifier, MemoryManager};
use crate::observability::messages::engine::{EvaluationFailed, ExitLoopOutsideLoop};
use crate::observability::messages::StructuredLog;
use crate::observability::{LogLevel, Logger};
use crate::register::{Record, Transformable};
use crate::traits::{Component, ComponentResult, Outcome};

const EVALUATOR_NAME: &str = "Evaluator";

#[derive(Clone)]
pub struct Evaluator {
    name: String,
    logger: Logger,
    fast_exit: bool,
    memory: Arc<MemoryManager>,
    schema: Arc<dyn Component>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(ExecutionSchema::new())
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("name", &self.name)
            .field("logger", &self.logger)
            .field("fast_exit", &self.fast_exit)
            .field("schema", &self.schema.name())
            .finish()
    }
}

impl Evaluator {
    pub fn new<C: Component + 'static>(schema: C) -> Self {
        Self::from_shared(Arc::new(schema))
    }

    /// Wrap an already shared component.
    pub fn from_shared(schema: Arc<dyn Component>) -> Self {
        Self {
            name: EVALUATOR_NAME.to_string(),
            logger: Logger::new(EVALUATOR_NAME, LogLevel::default()),
            fast_exit: true,
            memory: Arc::new(MemoryManager::new()),
            schema,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name.into());
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.logger.set_level(level);
        self
    }

    pub fn with_fast_exit(mut self, fast_exit: bool) -> Self {
        self.fast_exit = fast_exit;
        self
    }

    pub fn with_memory_manager(mut self, memory: Arc<MemoryManager>) -> Self {
        self.memory = memory;
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn fast_exit(&self) -> bool {
        self.fast_exit
    }

    pub fn memory(&self) -> &Arc<MemoryManager> {
        &self.memory
    }

    pub fn schema(&self) -> &Arc<dyn Component> {
        &self.schema
    }

    /// Log `message` prefixed with this evaluator's name.
    pub fn log(&self, level: LogLevel, message: impl Display) {
        self.logger
            .log(level, &format_args!("{}: {}", self.name, message));
    }

    /// Nested evaluator for a control-flow body.
    pub fn create_child(&self, schema: Arc<dyn Component>, child_name: &str) -> Evaluator {
        let name = format!("{}.{}", self.name, child_name);
        Evaluator {
            logger: Logger::new(name.clone(), self.logger.level()),
            name,
            fast_exit: self.fast_exit,
            memory: Arc::clone(&self.memory),
            schema,
        }
    }

    /// Run the wrapped component with `self` as context.
    ///
    /// The loop-exit signal passes through unchanged; errors are logged and
    /// wrapped with this evaluator's name.
    pub fn evaluate(&self, input: Transformable) -> ComponentResult {
        let span = tracing::debug_span!("evaluate", evaluator = %self.name);
        let _enter = span.enter();

        self.schema.call(input, self).map_err(|error| {
            EvaluationFailed {
                evaluator: &self.name,
                error: &error,
            }
            .log_to(&self.logger);
            ExecutionError::evaluator(&self.name, error)
        })
    }

    /// Top-level entry point: run over `input` and return the final mapping.
    ///
    /// A loop-exit signal reaching this point ends the run normally with the
    /// register as it was when the signal was raised.
    pub fn run(&self, input: Record) -> Result<Record, ExecutionError> {
        match self.evaluate(Transformable::new(input))? {
            Outcome::Next(register) => Ok(register.extract()),
            Outcome::ExitLoop(register) => {
                ExitLoopOutsideLoop {
                    evaluator: &self.name,
                }
                .log_to(&self.logger);
                Ok(register.extract())
            }
        }
    }

    /// Copy memory entries into `register`.
    ///
    /// Identifiers missing from memory fall back to `default`, keyed by the
    /// memory key; a miss without a default fails with `NotFound`. With
    /// `delete`, every entry read is removed from memory.
    pub fn get_memory(
        &self,
        register: Transformable,
        identifiers: &[MemoryIdentifier],
        default: &Record,
        delete: bool,
    ) -> Result<Transformable, ExecutionError> {
        Ok(self.memory.get(register, identifiers, default, delete)?)
    }

    /// Store the value at `get_key` (the whole register when `None`) under
    /// `set_key` in memory.
    pub fn set_memory(
        &self,
        register: &Transformable,
        get_key: Option<&str>,
        set_key: &str,
    ) -> Result<(), ExecutionError> {
        let value = match get_key {
            None => Value::Object(register.as_record().clone()),
            Some(key) => register
                .get(key)
                .cloned()
                .ok_or_else(|| ExecutionError::MissingKey {
                    key: key.to_string(),
                })?,
        };
        Ok(self.memory.set(set_key, value)?)
    }

    pub fn delete_memory(&self, identifier: &str) -> Result<(), ExecutionError> {
        Ok(self.memory.delete(identifier)?)
    }

    pub fn flush_memory(&self) -> Result<(), ExecutionError> {
        Ok(self.memory.flush()?)
    }
}

/// An evaluator nested as a step runs its own component under its own name
/// and memory; the enclosing context is not consulted.
impl Component for Evaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.logger = Logger::new(name.clone(), self.logger.level());
        self.name = name;
    }

    fn call(&self, input: Transformable, _: &Evaluator) -> ComponentResult {
        self.evaluate(input)
    }
}
