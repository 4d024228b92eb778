// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::ExecutionError;
use crate::register::{Record, ReplacingScope, DEFAULT_KEY};
use crate::traits::action::expect_record;
use crate::traits::{Action, ActionOutput};

type Function = dyn Fn(Value) -> Result<ActionOutput, ExecutionError> + Send + Sync;

/// Action backed by a closure.
///
/// Use [`ExecuteFunction::record`] for mapping-to-mapping functions and
/// [`ExecuteFunction::value`] for functions over arbitrary JSON, whose result
/// is classified with [`ActionOutput::from_json`].
///
/// ```rust
/// use serde_json::{json, Value};
/// use the_conduit::actions::ExecuteFunction;
/// use the_conduit::register::ReplacingScope;
/// use the_conduit::traits::{Action, Component};
///
/// let twice = ExecuteFunction::value(|v: Value| Ok(json!([v.clone(), v])))
///     .default_key("pair")
///     .replace(ReplacingScope::Global);
/// let output = twice.into_executor().run(json!({"a": 0}).as_object().cloned().unwrap()).unwrap();
/// assert_eq!(output["pair"], json!([{"a": 0}, {"a": 0}]));
/// assert_eq!(output.len(), 1);
/// ```
#[derive(Clone)]
pub struct ExecuteFunction {
    function: Arc<Function>,
    name: String,
    default_key: String,
    replace: ReplacingScope,
}

impl fmt::Debug for ExecuteFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecuteFunction")
            .field("name", &self.name)
            .field("default_key", &self.default_key)
            .field("replace", &self.replace)
            .finish()
    }
}

impl ExecuteFunction {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(Value) -> Result<ActionOutput, ExecutionError> + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
            name: "ExecuteFunction".to_string(),
            default_key: DEFAULT_KEY.to_string(),
            replace: ReplacingScope::Inplace,
        }
    }

    /// Function over a mapping; non-mapping input fails with `InvalidInput`.
    pub fn record<F>(function: F) -> Self
    where
        F: Fn(Record) -> Result<Record, ExecutionError> + Send + Sync + 'static,
    {
        Self::new(move |input| function(expect_record(input)?).map(ActionOutput::Mapping))
    }

    pub fn value<F>(function: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ExecutionError> + Send + Sync + 'static,
    {
        Self::new(move |input| function(input).map(ActionOutput::from_json))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        self.default_key = key.into();
        self
    }

    pub fn replace(mut self, replace: ReplacingScope) -> Self {
        self.replace = replace;
        self
    }
}

impl Action for ExecuteFunction {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        (self.function)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn default_key(&self) -> &str {
        &self.default_key
    }

    fn replacing_scope(&self) -> ReplacingScope {
        self.replace
    }
}
