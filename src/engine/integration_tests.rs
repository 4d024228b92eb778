// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end scenarios across schemas, control flow and memory.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::actions::ExecuteFunction;
use crate::engine::{ActionExecutor, Evaluator, ExecutionSchema};
use crate::errors::ExecutionError;
use crate::flow::{Branch, Filter, ForEach, Switch, While, BREAK};
use crate::memory::{GetMemory, MemoryGetInstruction, SetMemory};
use crate::register::{Record, ReplacingScope, Transformable};
use crate::traits::{Action, Component, Executable};

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

fn f_of(data: &Transformable) -> i64 {
    data.get("f").and_then(Value::as_i64).unwrap_or(0)
}

#[derive(Serialize, Deserialize)]
struct Counter {
    f: i64,
}

/// Adds one to `f`, validating both sides.
struct Increment;

impl Executable for Increment {
    type Input = Counter;
    type Output = Counter;

    fn invoke(&self, input: Counter, _: &Evaluator) -> Result<Record, ExecutionError> {
        Ok(record(json!({"f": input.f + 1})))
    }
}

/// Appends `label` to the `trace` list.
fn mark(label: &'static str) -> ActionExecutor {
    ExecuteFunction::record(move |mut data| {
        let mut trace = data
            .get("trace")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        trace.push(json!(label));
        data.insert("trace".to_string(), Value::Array(trace));
        Ok(data)
    })
    .named(label)
    .into_executor()
}

fn always(_: &Transformable, _: &Evaluator) -> bool {
    true
}

#[test]
fn test_pipeline_of_executables() {
    let pipeline = Increment
        .into_executor()
        .then(Increment.into_executor())
        .then(Increment.into_executor().set_key("output"))
        .then(Increment.into_executor().get_key("output").set_key("result"));

    assert_eq!(pipeline.len(), 4);
    let output = pipeline.run(record(json!({"f": 1}))).unwrap();
    assert_eq!(output["result"]["f"], json!(5));
    assert_eq!(output["f"], json!(3));
}

#[test]
fn test_executable_scoped_view() {
    let output = Increment
        .into_executor()
        .get_key("input")
        .set_key("output")
        .run(record(json!({"input": {"f": 4}})))
        .unwrap();
    assert_eq!(output, record(json!({"input": {"f": 4}, "output": {"f": 5}})));
}

#[test]
fn test_executable_local_scope() {
    let local = || Increment.into_executor().replace(ReplacingScope::Local);

    assert_eq!(local().run(record(json!({"f": 0}))).unwrap(), record(json!({"f": 1})));
    assert_eq!(
        local().get_key("a").run(record(json!({"a": {"f": 0}, "b": 1}))).unwrap(),
        record(json!({"f": 1}))
    );
    assert_eq!(
        local().get_key("a").run(record(json!({"a": [{"f": 0}]}))).unwrap(),
        record(json!({"a": [{"f": 0}], "output": [{"f": 1}]}))
    );
    assert_eq!(
        local().get_key("a").set_key("a").run(record(json!({"a": {"f": 0, "b": 1}}))).unwrap(),
        record(json!({"a": {"f": 1}}))
    );
    assert_eq!(
        local().get_key("a").set_key("a").run(record(json!({"a": [{"f": 0}], "b": 1}))).unwrap(),
        record(json!({"a": [{"f": 1}], "b": 1}))
    );
}

#[test]
fn test_executable_global_scope() {
    let global = || Increment.into_executor().replace(ReplacingScope::Global);

    assert_eq!(global().run(record(json!({"f": 0}))).unwrap(), record(json!({"f": 1})));
    assert_eq!(
        global().get_key("a").run(record(json!({"a": {"f": 0}, "b": 1}))).unwrap(),
        record(json!({"f": 1}))
    );
    assert_eq!(
        global().get_key("a").run(record(json!({"a": [{"f": 0}]}))).unwrap(),
        record(json!({"output": [{"f": 1}]}))
    );
    assert_eq!(
        global()
            .get_key("a")
            .set_key("a")
            .run(record(json!({"a": {"f": 0, "b": 1}, "b": 1})))
            .unwrap(),
        record(json!({"a": {"f": 1}}))
    );
    assert_eq!(
        global().get_key("a").set_key("a").run(record(json!({"a": [{"f": 0}], "b": 1}))).unwrap(),
        record(json!({"a": [{"f": 1}]}))
    );
}

#[test]
fn test_inplace_mapping_only_adds_keys() {
    let inputs = [json!({}), json!({"a": 1}), json!({"x": 0, "y": [1, 2]})];
    for input in inputs {
        let step = ExecuteFunction::record(|_| Ok(record(json!({"x": 1, "z": "new"}))));
        let output = step.into_executor().run(record(input.clone())).unwrap();

        let mut expected = record(input);
        expected.extend(record(json!({"x": 1, "z": "new"})));
        assert_eq!(output, expected);
    }
}

#[test]
fn test_global_mapping_replaces_register() {
    let inputs = [json!({}), json!({"a": 1}), json!({"x": 0, "y": [1, 2]})];
    for input in inputs {
        let step = ExecuteFunction::record(|_| Ok(record(json!({"only": true}))))
            .replace(ReplacingScope::Global);
        let output = step.into_executor().run(record(input)).unwrap();
        assert_eq!(output, record(json!({"only": true})));
    }
}

#[test]
fn test_while_max_iterations() {
    let looped = While::with_max_iterations(Increment.into_executor(), 10);
    assert_eq!(looped.run(record(json!({"f": 0}))).unwrap(), record(json!({"f": 10})));
}

#[test]
fn test_while_function_condition() {
    let looped = While::with_condition(Increment.into_executor(), |data: &Transformable, _: &Evaluator| {
        f_of(data) < 5
    });
    assert_eq!(looped.run(record(json!({"f": 0}))).unwrap()["f"], json!(5));
}

#[test]
fn test_while_break_first_has_no_effect() {
    for k in [1, 10, 100] {
        let looped = While::with_max_iterations(BREAK.then(Increment.into_executor()), k);
        assert_eq!(looped.run(record(json!({"f": 0}))).unwrap(), record(json!({"f": 0})));
    }
}

#[test]
fn test_break_outside_loop_ends_run() {
    let schema = mark("first").then(BREAK).then(mark("never"));
    let output = Evaluator::new(schema).run(Record::new()).unwrap();
    assert_eq!(output["trace"], json!(["first"]));
}

#[test]
fn test_filter_keeps_matching_in_order() {
    let fs: Vec<Value> = (0..100).map(|i| json!({"f": i})).collect();
    let filter = Filter::new(
        |data: &Transformable, _: &Evaluator| f_of(data) > 25,
        "fs",
    );

    let output = filter.run(record(json!({"fs": fs}))).unwrap();
    let kept = output["fs"].as_array().unwrap();
    assert_eq!(kept.len(), 74);
    assert_eq!(kept.first(), Some(&json!({"f": 26})));
    assert_eq!(kept.last(), Some(&json!({"f": 99})));
}

#[test]
fn test_filter_twice_equals_once() {
    let fs: Vec<Value> = (0..30).map(|i| json!({"f": i})).collect();
    let odd = || Filter::new(|data: &Transformable, _: &Evaluator| f_of(data) % 2 == 1, "fs");

    let once = odd().run(record(json!({"fs": fs.clone()}))).unwrap();
    let twice = odd().then(odd()).run(record(json!({"fs": fs}))).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_switch_exit_branch_stops_evaluation() {
    let switch = Switch::new(vec![
        Branch::new(mark("b1")).when(always),
        Branch::new(mark("b2")),
    ]);
    assert_eq!(switch.run(Record::new()).unwrap()["trace"], json!(["b1"]));
}

#[test]
fn test_switch_fallthrough_runs_in_order() {
    let switch = Switch::new(vec![
        Branch::new(mark("b1")).when(always).exit_branch(false),
        Branch::new(mark("b2")),
    ]);
    assert_eq!(switch.run(Record::new()).unwrap()["trace"], json!(["b1", "b2"]));
}

#[test]
fn test_for_each_matches_standalone_runs() {
    let fs: Vec<Value> = (0..10).map(|i| json!({"f": i})).collect();
    let output = ForEach::new(Increment.into_executor(), "fs")
        .set_key("results")
        .run(record(json!({"fs": fs.clone()})))
        .unwrap();

    let results = output["results"].as_array().unwrap();
    assert_eq!(results.len(), fs.len());
    for (input, result) in fs.iter().zip(results) {
        let standalone = Increment
            .into_executor()
            .run(input.as_object().cloned().unwrap())
            .unwrap();
        assert_eq!(result, &Value::Object(standalone));
    }
    assert_eq!(output["fs"], Value::Array(fs));
}

#[test]
fn test_memory_round_trip() {
    let value = json!({"nested": [1, 2, 3]});
    let schema = SetMemory::new("k")
        .get_key("v")
        .then(GetMemory::new([("k", "restored")]));

    let output = schema.run(record(json!({"v": value.clone()}))).unwrap();
    assert_eq!(output["restored"], value);
}

#[test]
fn test_memory_pop_twice_fails() {
    let evaluator = Evaluator::new(
        SetMemory::new("k")
            .get_key("v")
            .then(GetMemory::new(["k"]).instruction(MemoryGetInstruction::Pop)),
    );
    let output = evaluator.run(record(json!({"v": 1}))).unwrap();
    assert_eq!(output["k"], json!(1));
    assert!(!evaluator.memory().contains("k"));

    let pop = GetMemory::new(["k"]).instruction(MemoryGetInstruction::Pop);
    let error = pop.call(Transformable::default(), &evaluator).unwrap_err();
    assert!(matches!(error.root_cause(), ExecutionError::Memory(e) if e.is_not_found()));

    let with_default = GetMemory::new(["k"]).with_default(record(json!({"k": "fallback"})));
    let register = with_default
        .call(Transformable::default(), &evaluator)
        .unwrap()
        .into_register();
    assert_eq!(register.get("k"), Some(&json!("fallback")));
    assert!(!evaluator.memory().contains("k"));
}

#[test]
fn test_nested_error_chain_names_every_scope() {
    let body = ExecutionSchema::new().add(Increment.into_executor()).named("Body");
    let schema = ExecutionSchema::new().add(While::with_max_iterations(body, 3).named("Retry"));
    let error = Evaluator::new(schema)
        .with_name("Run")
        .run(record(json!({"f": "not a number"})))
        .unwrap_err();

    assert_eq!(
        error.context_chain(),
        vec!["Run", "ExecutionSchema", "Run.Retry", "Body", "Increment"]
    );
    assert!(matches!(error.root_cause(), ExecutionError::Validation { schema: "Counter", .. }));
    assert!(error.to_string().starts_with(
        "Run: ExecutionSchema: Execution schema failed at step 0 (Retry): Run.Retry: Body: \
         Execution schema failed at step 0 (Increment): Executable error: Increment: Validation error"
    ));
}

#[test]
fn test_disabled_fast_exit_skips_failed_steps() {
    let failing = ExecuteFunction::record(|_| Err(ExecutionError::msg("flaky"))).named("Flaky");
    let schema = mark("a").then(failing.into_executor()).then(mark("b"));
    let output = Evaluator::new(schema).with_fast_exit(false).run(Record::new()).unwrap();
    assert_eq!(output["trace"], json!(["a", "b"]));
}
