// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::{Evaluator, ExecutionSchema};
use crate::errors::ExecutionError;
use crate::register::{Record, Transformable};

/// Result of a single component call.
///
/// `ExitLoop` is the non-error control transfer raised by
/// [`Break`](crate::flow::Break). Schemas and evaluators pass it through
/// untouched; only loop constructs consume it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Next(Transformable),
    ExitLoop(Transformable),
}

impl Outcome {
    /// The register carried by either variant.
    pub fn into_register(self) -> Transformable {
        match self {
            Outcome::Next(register) | Outcome::ExitLoop(register) => register,
        }
    }

    pub fn register(&self) -> &Transformable {
        match self {
            Outcome::Next(register) | Outcome::ExitLoop(register) => register,
        }
    }

    pub fn is_exit_loop(&self) -> bool {
        matches!(self, Outcome::ExitLoop(_))
    }
}

pub type ComponentResult = Result<Outcome, ExecutionError>;

/// Composable unit of work.
///
/// Components are shared between schemas and evaluators behind `Arc`, so they
/// only take `&self` while running; any per-run state lives in the register
/// or in memory.
pub trait Component: Send + Sync {
    /// Display name used for logging and error attribution. Not an identity key.
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Execute against `input` in the context of `evaluator`.
    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult;

    /// Steps this component contributes when composed into a schema.
    fn into_steps(self) -> Vec<Arc<dyn Component>>
    where
        Self: Sized + 'static,
    {
        vec![Arc::new(self)]
    }

    /// Compose with `next` into a flat [`ExecutionSchema`]; `self` runs first.
    fn then<C>(self, next: C) -> ExecutionSchema
    where
        Self: Sized + 'static,
        C: Component + 'static,
    {
        ExecutionSchema::from_steps(self.into_steps()).append(next)
    }

    /// Run standalone under a default [`Evaluator`] and unwrap the final mapping.
    fn run(&self, input: Record) -> Result<Record, ExecutionError>
    where
        Self: Sized,
    {
        let evaluator = Evaluator::default();
        self.call(Transformable::new(input), &evaluator)
            .map(|outcome| outcome.into_register().extract())
    }
}

/// Last path segment of a type name, without generic arguments.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
