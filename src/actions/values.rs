// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::errors::ExecutionError;
use crate::register::{Record, ReplacingScope};
use crate::traits::action::{expect_record, value_kind};
use crate::traits::{Action, ActionOutput};

/// Set one key to a fixed value.
#[derive(Debug, Clone)]
pub struct SetValue {
    key: String,
    value: Value,
}

impl SetValue {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl Action for SetValue {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let mut record = expect_record(input)?;
        record.insert(self.key.clone(), self.value.clone());
        Ok(ActionOutput::Mapping(record))
    }
}

/// Remove `key` and merge its mapping into the input.
#[derive(Debug, Clone)]
pub struct UnpackValue {
    key: String,
}

impl UnpackValue {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Action for UnpackValue {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let mut record = expect_record(input)?;
        let nested = record
            .remove(&self.key)
            .ok_or_else(|| ExecutionError::MissingKey {
                key: self.key.clone(),
            })?;
        match nested {
            Value::Object(inner) => {
                record.extend(inner);
                Ok(ActionOutput::Mapping(record))
            }
            other => Err(ExecutionError::InvalidInput(format!(
                "Expected: mapping. Received value of type: {}",
                value_kind(&other)
            ))),
        }
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Local
    }
}

/// Wrap the whole input under `key`.
#[derive(Debug, Clone)]
pub struct NestToKey {
    key: String,
}

impl NestToKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Action for NestToKey {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let mut record = Record::new();
        record.insert(self.key.clone(), input);
        Ok(ActionOutput::Mapping(record))
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::traits::Component;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_set_value() {
        let set = || SetValue::new("a", json!(1));

        assert_eq!(set().into_executor().run(record(json!({"a": 1}))).unwrap(), record(json!({"a": 1})));
        assert_eq!(
            set().into_executor().run(record(json!({"b": 1}))).unwrap(),
            record(json!({"a": 1, "b": 1}))
        );
        assert_eq!(
            set().scoped(Some("a"), None).run(record(json!({"a": {"a": 1}}))).unwrap(),
            record(json!({"a": 1}))
        );
        assert_eq!(
            set().scoped(Some("a"), Some("a")).run(record(json!({"a": {}}))).unwrap(),
            record(json!({"a": {"a": 1}}))
        );
    }

    #[test]
    fn test_unpack_value() {
        let unpack = || UnpackValue::new("a");

        assert_eq!(
            unpack().into_executor().run(record(json!({"a": {"b": 1, "c": 2}}))).unwrap(),
            record(json!({"b": 1, "c": 2}))
        );

        let input = record(json!({"c": {"b": 1, "a": {"d": 1}}}));
        assert_eq!(
            unpack().scoped(Some("c"), None).run(input.clone()).unwrap(),
            record(json!({"d": 1, "b": 1}))
        );
        assert_eq!(
            unpack().scoped(Some("c"), Some("c")).run(input).unwrap(),
            record(json!({"c": {"b": 1, "d": 1}}))
        );
    }

    #[test]
    fn test_unpack_value_rejects_non_mapping() {
        let error = UnpackValue::new("a")
            .into_executor()
            .run(record(json!({"a": [1, 2]})))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Action error: UnpackValue: Invalid input data: Expected: mapping. Received value of type: list"
        );
    }

    #[test]
    fn test_unpack_value_missing_key() {
        let error = UnpackValue::new("a").into_executor().run(Record::new()).unwrap_err();
        assert!(matches!(error.root_cause(), ExecutionError::MissingKey { .. }));
    }

    #[test]
    fn test_nest_to_key() {
        let nest = || NestToKey::new("a");

        assert_eq!(
            nest().into_executor().run(record(json!({"b": 1}))).unwrap(),
            record(json!({"a": {"b": 1}}))
        );
        assert_eq!(
            nest().scoped(Some("c"), None).run(record(json!({"c": {"b": 1}}))).unwrap(),
            record(json!({"a": {"b": 1}}))
        );
        assert_eq!(
            nest().scoped(Some("c"), Some("c")).run(record(json!({"c": {"b": 1}}))).unwrap(),
            record(json!({"c": {"a": {"b": 1}}}))
        );
    }

    #[test]
    fn test_nest_scalar() {
        let output = NestToKey::new("wrapped")
            .scoped(Some("n"), None)
            .run(record(json!({"n": 3})))
            .unwrap();
        assert_eq!(output, record(json!({"wrapped": 3})));
    }
}
