// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::Evaluator;
use crate::errors::ExecutionError;
use crate::observability::messages::component::BranchTaken;
use crate::observability::messages::StructuredLog;
use crate::register::Transformable;
use crate::traits::{Component, ComponentResult, Outcome, Predicate};

/// Result of offering a register to a [`Branch`].
#[derive(Debug, Clone, PartialEq)]
pub enum BranchOutcome {
    /// Condition held (or was absent) and the body ran.
    Taken(Outcome),
    /// Condition failed; the register is handed back unchanged.
    Skipped(Transformable),
}

/// Optional condition paired with a body.
pub struct Branch {
    name: String,
    condition: Option<Arc<dyn Predicate>>,
    schema: Arc<dyn Component>,
    exit_branch: bool,
}

impl Branch {
    /// Unconditional branch that ends the switch once taken.
    pub fn new<C: Component + 'static>(schema: C) -> Self {
        Self {
            name: "Branch".to_string(),
            condition: None,
            schema: Arc::new(schema),
            exit_branch: true,
        }
    }

    pub fn when<P: Predicate + 'static>(mut self, condition: P) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// With `false`, later branches are still evaluated after this one runs.
    pub fn exit_branch(mut self, exit_branch: bool) -> Self {
        self.exit_branch = exit_branch;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_exit_branch(&self) -> bool {
        self.exit_branch
    }

    pub fn evaluate(&self, input: Transformable, evaluator: &Evaluator) -> Result<BranchOutcome, ExecutionError> {
        let matched = match &self.condition {
            Some(condition) => condition.check(&input, evaluator)?,
            None => true,
        };
        if !matched {
            return Ok(BranchOutcome::Skipped(input));
        }

        let body = evaluator.create_child(Arc::clone(&self.schema), &self.name);
        Ok(BranchOutcome::Taken(body.evaluate(input)?))
    }
}

/// Ordered branches with first-match, optional fall-through semantics.
///
/// Branches are offered the register in declaration order. A taken branch
/// replaces the register with its result; if it is an exit branch the switch
/// stops, otherwise the remaining branches see the updated register.
pub struct Switch {
    name: String,
    branches: Vec<Branch>,
}

impl Switch {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self {
            name: "Switch".to_string(),
            branches,
        }
    }

    pub fn branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Component for Switch {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let mut register = input;
        for (index, branch) in self.branches.iter().enumerate() {
            match branch.evaluate(register, evaluator)? {
                BranchOutcome::Skipped(unchanged) => register = unchanged,
                BranchOutcome::Taken(Outcome::ExitLoop(exited)) => return Ok(Outcome::ExitLoop(exited)),
                BranchOutcome::Taken(Outcome::Next(next)) => {
                    BranchTaken {
                        switch: &self.name,
                        branch: branch.name(),
                        index,
                    }
                    .log_to(evaluator.logger());
                    register = next;
                    if branch.is_exit_branch() {
                        break;
                    }
                }
            }
        }
        Ok(Outcome::Next(register))
    }
}
