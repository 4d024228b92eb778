// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::Evaluator;
use crate::errors::ExecutionError;
use crate::memory::MemoryIdentifier;
use crate::register::{Record, Transformable};
use crate::traits::{Component, Predicate};

/// Predicate evaluated over the result of a sub-schema.
///
/// The sub-schema runs in a child evaluator on a copy of the register, after
/// the listed memory entries (if any) are merged into that copy. The
/// validator then sees the sub-schema's result. The caller's register is
/// never modified.
pub struct Condition {
    name: String,
    validator: Arc<dyn Predicate>,
    schema: Arc<dyn Component>,
    state: Option<Vec<MemoryIdentifier>>,
}

impl Condition {
    pub fn new<P, C>(validator: P, schema: C) -> Self
    where
        P: Predicate + 'static,
        C: Component + 'static,
    {
        Self {
            name: "Condition".to_string(),
            validator: Arc::new(validator),
            schema: Arc::new(schema),
            state: None,
        }
    }

    /// Merge these memory entries into the copy before the sub-schema runs.
    pub fn with_state<I, T>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MemoryIdentifier>,
    {
        self.state = Some(identifiers.into_iter().map(Into::into).collect());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, input: &Transformable, evaluator: &Evaluator) -> Result<bool, ExecutionError> {
        let mut register = input.clone();
        if let Some(state) = &self.state {
            register = evaluator.get_memory(register, state, &Record::new(), false)?;
        }

        let result = evaluator
            .create_child(Arc::clone(&self.schema), &self.name)
            .evaluate(register)?
            .into_register();
        self.validator.check(&result, evaluator)
    }
}

impl Predicate for Condition {
    fn check(&self, data: &Transformable, evaluator: &Evaluator) -> Result<bool, ExecutionError> {
        self.evaluate(data, evaluator)
    }
}
