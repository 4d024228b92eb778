// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::Evaluator;
use crate::errors::ExecutionError;
use crate::register::Transformable;

/// Boolean test over the register, used by branches, loops and filters.
///
/// Plain closures `Fn(&Transformable, &Evaluator) -> bool` are predicates;
/// [`Condition`](crate::flow::Condition) is the fallible variant that runs a
/// sub-schema first.
pub trait Predicate: Send + Sync {
    fn check(&self, data: &Transformable, evaluator: &Evaluator) -> Result<bool, ExecutionError>;
}

impl<F> Predicate for F
where
    F: Fn(&Transformable, &Evaluator) -> bool + Send + Sync,
{
    fn check(&self, data: &Transformable, evaluator: &Evaluator) -> Result<bool, ExecutionError> {
        Ok(self(data, evaluator))
    }
}
