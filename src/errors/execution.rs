// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while executing components.
//!
//! Every layer of the engine (scoped executors, schemas, evaluators) wraps the
//! error of the layer immediately inside it together with its own name, so the
//! rendered message of the outermost error names every enclosing scope from the
//! top-level run down to the failing leaf:
//!
//! ```text
//! Pipeline: Execution schema failed at step 1 (Normalize): Action error: Normalize: Attribute 'text' not found in input data
//! ```
//!
//! The wrapped error is rendered in the message and is not exposed through
//! [`Error::source`](std::error::Error::source). Use
//! [`ExecutionError::root_cause`] and [`ExecutionError::context_chain`] to
//! inspect the nesting.

use thiserror::Error;

use crate::errors::MemoryError;

/// Comprehensive error type for component execution.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A leaf action's `execute` failed.
    #[error("Action error: {name}: {inner}")]
    Action {
        name: String,
        inner: Box<ExecutionError>,
    },

    /// Input/output validation or invocation of an executable failed.
    #[error("Executable error: {name}: {inner}")]
    Executable {
        name: String,
        inner: Box<ExecutionError>,
    },

    /// A step inside a schema failed while fast exit was enabled.
    #[error("{name}: Execution schema failed at step {step} ({component}): {inner}")]
    SchemaFailed {
        name: String,
        step: usize,
        component: String,
        inner: Box<ExecutionError>,
    },

    /// An error escaped the component wrapped by an evaluator.
    #[error("{name}: {inner}")]
    Evaluator {
        name: String,
        inner: Box<ExecutionError>,
    },

    /// Expected key is absent from the input data.
    #[error("Attribute '{key}' not found in input data")]
    MissingKey { key: String },

    /// A rename query could not be parsed.
    #[error("Invalid transformation format: '{query}'")]
    InvalidQuery { query: String },

    /// Input data has an unexpected shape.
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    /// Data did not match a declared schema.
    #[error("Validation error: expected schema {schema}: {reason}")]
    Validation { schema: &'static str, reason: String },

    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// Failure raised by user-supplied code (closures, predicates, executables).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExecutionError {
    pub fn action(name: impl Into<String>, source: ExecutionError) -> Self {
        ExecutionError::Action {
            name: name.into(),
            inner: Box::new(source),
        }
    }

    pub fn executable(name: impl Into<String>, source: ExecutionError) -> Self {
        ExecutionError::Executable {
            name: name.into(),
            inner: Box::new(source),
        }
    }

    pub fn schema_failed(
        name: impl Into<String>,
        step: usize,
        component: impl Into<String>,
        source: ExecutionError,
    ) -> Self {
        ExecutionError::SchemaFailed {
            name: name.into(),
            step,
            component: component.into(),
            inner: Box::new(source),
        }
    }

    pub fn evaluator(name: impl Into<String>, source: ExecutionError) -> Self {
        ExecutionError::Evaluator {
            name: name.into(),
            inner: Box::new(source),
        }
    }

    /// Shorthand for failures raised by user code.
    pub fn msg(message: impl std::fmt::Display) -> Self {
        ExecutionError::Other(anyhow::anyhow!("{}", message))
    }

    /// Innermost error of a wrapping chain.
    pub fn root_cause(&self) -> &ExecutionError {
        match self {
            ExecutionError::Action { inner, .. }
            | ExecutionError::Executable { inner, .. }
            | ExecutionError::SchemaFailed { inner, .. }
            | ExecutionError::Evaluator { inner, .. } => inner.root_cause(),
            other => other,
        }
    }

    /// Names of every wrapping scope, outermost first.
    pub fn context_chain(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self;
        loop {
            match current {
                ExecutionError::Action { name, inner }
                | ExecutionError::Executable { name, inner }
                | ExecutionError::Evaluator { name, inner } => {
                    names.push(name.as_str());
                    current = inner.as_ref();
                }
                ExecutionError::SchemaFailed { name, inner, .. } => {
                    names.push(name.as_str());
                    current = inner.as_ref();
                }
                _ => return names,
            }
        }
    }
}
