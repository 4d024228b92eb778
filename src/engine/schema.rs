// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential program of components.
//!
//! An [`ExecutionSchema`] threads the register through its steps in
//! declaration order. Composition stays flat: chaining two schemas with
//! [`Component::then`] splices the steps of the second into the first rather
//! than nesting it as a single step.
//!
//! # Failure policy
//!
//! With fast exit enabled on the driving [`Evaluator`] (the default), the
//! first failing step aborts the schema with
//! [`ExecutionError::SchemaFailed`]. With fast exit disabled, the failure is
//! logged and the next step receives the register as it was before the
//! failing step.
//!
//! A step returning [`Outcome::ExitLoop`] ends the schema immediately and the
//! signal is handed to the caller untouched.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use the_conduit::actions::{RenameAttribute, SetValue};
//! use the_conduit::traits::{Action, Component};
//!
//! let schema = SetValue::new("a", json!(1)).into_executor()
//!     .then(RenameAttribute::new("a", "b").into_executor());
//!
//! let output = schema.run(Default::default()).unwrap();
//! assert_eq!(output, json!({"b": 1}).as_object().cloned().unwrap());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::engine::Evaluator;
use crate::errors::ExecutionError;
use crate::observability::messages::engine::{StepCompleted, StepFailed, StepSkipped};
use crate::observability::messages::StructuredLog;
use crate::register::Transformable;
use crate::traits::{Component, ComponentResult, Outcome};

const SCHEMA_NAME: &str = "ExecutionSchema";

#[derive(Clone)]
pub struct ExecutionSchema {
    name: String,
    program: Vec<Arc<dyn Component>>,
}

impl Default for ExecutionSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExecutionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionSchema")
            .field("name", &self.name)
            .field(
                "program",
                &self.program.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ExecutionSchema {
    pub fn new() -> Self {
        Self {
            name: SCHEMA_NAME.to_string(),
            program: Vec::new(),
        }
    }

    pub fn from_steps(steps: Vec<Arc<dyn Component>>) -> Self {
        Self {
            name: SCHEMA_NAME.to_string(),
            program: steps,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append `component` as a single step. A schema added this way keeps its
    /// own name and runs as one nested step.
    pub fn add<C: Component + 'static>(mut self, component: C) -> Self {
        self.program.push(Arc::new(component));
        self
    }

    pub fn add_shared(mut self, component: Arc<dyn Component>) -> Self {
        self.program.push(component);
        self
    }

    /// Append the steps `component` contributes, flattening schemas.
    pub fn append<C: Component + 'static>(mut self, component: C) -> Self {
        self.program.extend(component.into_steps());
        self
    }

    pub fn steps(&self) -> &[Arc<dyn Component>] {
        &self.program
    }

    pub fn len(&self) -> usize {
        self.program.len()
    }

    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }
}

impl Component for ExecutionSchema {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let logger = evaluator.logger();
        let mut register = input;

        for (step, component) in self.program.iter().enumerate() {
            let snapshot = (!evaluator.fast_exit()).then(|| register.clone());

            match component.call(register, evaluator) {
                Ok(Outcome::Next(next)) => {
                    StepCompleted {
                        schema: &self.name,
                        step,
                        component: component.name(),
                    }
                    .log_to(logger);
                    register = next;
                }
                Ok(exit @ Outcome::ExitLoop(_)) => return Ok(exit),
                Err(error) => {
                    StepFailed {
                        schema: &self.name,
                        step,
                        component: component.name(),
                        error: &error,
                    }
                    .log_to(logger);

                    match snapshot {
                        Some(previous) => {
                            StepSkipped {
                                schema: &self.name,
                                step,
                            }
                            .log_to(logger);
                            register = previous;
                        }
                        None => {
                            return Err(ExecutionError::schema_failed(
                                &self.name,
                                step,
                                component.name(),
                                error,
                            ))
                        }
                    }
                }
            }
        }

        Ok(Outcome::Next(register))
    }

    fn into_steps(self) -> Vec<Arc<dyn Component>> {
        self.program
    }

    /// Keeps this schema's name.
    fn then<C>(self, next: C) -> ExecutionSchema
    where
        C: Component + 'static,
    {
        self.append(next)
    }
}
