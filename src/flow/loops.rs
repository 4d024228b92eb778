// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::borrow::Cow;
use std::sync::Arc;

use crate::engine::Evaluator;
use crate::observability::messages::component::{LoopFinished, UnboundedLoop};
use crate::observability::messages::StructuredLog;
use crate::register::Transformable;
use crate::traits::{Component, ComponentResult, Outcome, Predicate};

/// Repeat a body while a condition holds and the iteration budget lasts.
///
/// Before every iteration the budget is checked first, then the condition
/// against the current register. A [`Break`] anywhere in the body ends the
/// loop immediately with the register as it was at the break.
pub struct While {
    name: String,
    schema: Arc<dyn Component>,
    condition: Option<Arc<dyn Predicate>>,
    max_iterations: Option<usize>,
}

impl While {
    /// Warns when neither a condition nor an iteration bound is given.
    pub fn new<C: Component + 'static>(
        schema: C,
        condition: Option<Arc<dyn Predicate>>,
        max_iterations: Option<usize>,
    ) -> Self {
        WhileBuilder {
            condition,
            max_iterations,
            ..Self::builder(schema)
        }
        .build()
    }

    /// Start a loop whose name and bounds are settled before the
    /// unbounded check runs.
    pub fn builder<C: Component + 'static>(schema: C) -> WhileBuilder {
        WhileBuilder {
            name: "While".to_string(),
            schema: Arc::new(schema),
            condition: None,
            max_iterations: None,
        }
    }

    pub fn with_condition<C, P>(schema: C, condition: P) -> Self
    where
        C: Component + 'static,
        P: Predicate + 'static,
    {
        Self::builder(schema).condition(condition).build()
    }

    pub fn with_max_iterations<C: Component + 'static>(schema: C, max_iterations: usize) -> Self {
        Self::builder(schema).max_iterations(max_iterations).build()
    }

    /// Rename a built loop. Unbounded loops should be named on the
    /// [`WhileBuilder`] so the construction warning carries the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.condition.is_some() || self.max_iterations.is_some()
    }
}

/// Deferred construction of a [`While`].
pub struct WhileBuilder {
    name: String,
    schema: Arc<dyn Component>,
    condition: Option<Arc<dyn Predicate>>,
    max_iterations: Option<usize>,
}

impl WhileBuilder {
    pub fn condition<P: Predicate + 'static>(mut self, condition: P) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Warns when the loop has neither a condition nor an iteration bound.
    pub fn build(self) -> While {
        if self.condition.is_none() && self.max_iterations.is_none() {
            UnboundedLoop { name: &self.name }.log();
        }
        While {
            name: self.name,
            schema: self.schema,
            condition: self.condition,
            max_iterations: self.max_iterations,
        }
    }
}

impl Component for While {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let body = evaluator.create_child(Arc::clone(&self.schema), &self.name);
        let mut register = input;
        let mut iterations = 0;
        let mut exited = false;

        loop {
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                break;
            }
            if let Some(condition) = &self.condition {
                if !condition.check(&register, evaluator)? {
                    break;
                }
            }

            match body.evaluate(register)? {
                Outcome::Next(next) => register = next,
                Outcome::ExitLoop(at_break) => {
                    register = at_break;
                    exited = true;
                    break;
                }
            }
            iterations += 1;
        }

        LoopFinished {
            name: &self.name,
            iterations,
            exited,
        }
        .log_to(evaluator.logger());
        Ok(Outcome::Next(register))
    }
}

/// Raises the loop-exit signal, ending the nearest enclosing [`While`].
#[derive(Debug, Clone)]
pub struct Break {
    name: Cow<'static, str>,
}

/// Shared break step.
pub const BREAK: Break = Break {
    name: Cow::Borrowed("Break"),
};

impl Default for Break {
    fn default() -> Self {
        BREAK
    }
}

impl Component for Break {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = Cow::Owned(name);
    }

    fn call(&self, input: Transformable, _: &Evaluator) -> ComponentResult {
        Ok(Outcome::ExitLoop(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    use crate::actions::ExecuteFunction;
    use crate::errors::ExecutionError;
    use crate::flow::{Branch, Condition, Switch};
    use crate::observability::capture::capture_logs;
    use crate::register::Record;
    use crate::traits::Action;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn f_of(data: &Record) -> i64 {
        data.get("f").and_then(Value::as_i64).unwrap_or(0)
    }

    fn increment() -> ExecuteFunction {
        ExecuteFunction::record(|data| Ok(record(json!({"f": f_of(&data) + 1}))))
    }

    #[test]
    fn test_max_iterations() {
        let looped = While::with_max_iterations(increment().into_executor(), 10);
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap(), record(json!({"f": 10})));
    }

    #[test]
    fn test_zero_iterations_skips_body() {
        let looped = While::with_max_iterations(increment().into_executor(), 0);
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap(), record(json!({"f": 0})));
    }

    #[test]
    fn test_function_condition() {
        let looped = While::with_condition(
            increment().into_executor(),
            |data: &Transformable, _: &Evaluator| f_of(data.as_record()) < 5,
        );
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap()["f"], json!(5));
    }

    #[test]
    fn test_object_condition() {
        let condition = Condition::new(
            |data: &Transformable, _: &Evaluator| data.get("f") != Some(&json!(0)),
            ExecuteFunction::record(|data| Ok(record(json!({"f": f_of(&data) % 10})))).into_executor(),
        );
        let looped = While::with_condition(increment().into_executor(), condition);
        assert_eq!(looped.run(record(json!({"f": 1}))).unwrap()["f"], json!(10));
    }

    #[test]
    fn test_break_first_skips_body() {
        let looped = While::with_max_iterations(BREAK.then(increment().into_executor()), 10);
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap()["f"], json!(0));
    }

    #[test]
    fn test_break_inside_switch_ends_loop() {
        let body = increment().into_executor().then(Switch::new(vec![Branch::new(BREAK).when(
            |data: &Transformable, _: &Evaluator| f_of(data.as_record()) >= 3,
        )]));
        let looped = While::with_max_iterations(body, 100);
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap()["f"], json!(3));
    }

    #[test]
    fn test_condition_and_bound_combine() {
        let looped = While::builder(increment().into_executor())
            .condition(|data: &Transformable, _: &Evaluator| f_of(data.as_record()) < 50)
            .max_iterations(4)
            .build();
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap()["f"], json!(4));
    }

    #[test]
    fn test_body_failure_propagates_with_loop_name() {
        let failing = ExecuteFunction::record(|_| Err(ExecutionError::msg("nope")));
        let looped = While::with_max_iterations(failing.into_executor(), 3).named("Retry");
        let error = Evaluator::new(looped).run(Record::new()).unwrap_err();
        assert_eq!(error.context_chain()[..2], ["Evaluator", "Evaluator.Retry"]);
    }

    #[test]
    fn test_unbounded_flag() {
        let looped = While::new(BREAK, None, None);
        assert!(!looped.is_bounded());
        assert_eq!(looped.run(record(json!({"f": 1}))).unwrap()["f"], json!(1));
    }

    #[test]
    fn test_unbounded_warning_uses_final_name() {
        let logs = capture_logs(|| {
            While::builder(BREAK).named("Poll").build();
        });
        assert!(logs.contains("While: Poll: Loop is not bounded!"), "{logs}");
        assert!(logs.contains("WARN"));
        assert!(!logs.contains("While: While:"));
    }

    #[test]
    fn test_bounding_on_builder_suppresses_warning() {
        let logs = capture_logs(|| {
            let looped = While::builder(BREAK).named("Poll").max_iterations(2).build();
            assert!(looped.is_bounded());
            While::with_max_iterations(BREAK, 0);
        });
        assert!(!logs.contains("not bounded"), "{logs}");
    }

    #[test]
    fn test_three_argument_constructor_warns() {
        let logs = capture_logs(|| {
            While::new(BREAK, None, None);
        });
        assert!(logs.contains("While: While: Loop is not bounded!"), "{logs}");
    }
}
