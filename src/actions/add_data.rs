// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::errors::ExecutionError;
use crate::register::Record;
use crate::traits::action::expect_record;
use crate::traits::{Action, ActionOutput};

/// Merge fixed key/values into the input.
#[derive(Debug, Clone)]
pub struct AddData {
    data: Record,
}

impl AddData {
    pub fn new(data: Record) -> Self {
        Self { data }
    }
}

impl Action for AddData {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let mut record = expect_record(input)?;
        record.extend(self.data.clone());
        Ok(ActionOutput::Mapping(record))
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
    fn test_add_data() {
        let input = record(json!({"b": 2, "c": {"d": 1}}));

        let output = AddData::new(record(json!({"a": 1})))
            .into_executor()
            .run(input.clone())
            .unwrap();
        assert_eq!(output, record(json!({"a": 1, "b": 2, "c": {"d": 1}})));

        let output = AddData::new(record(json!({"a": 1})))
            .scoped(Some("c"), None)
            .run(input.clone())
            .unwrap();
        assert_eq!(output, record(json!({"a": 1, "b": 2, "c": {"d": 1}, "d": 1})));

        let output = AddData::new(record(json!({"a": 1})))
            .scoped(Some("c"), Some("c"))
            .run(input)
            .unwrap();
        assert_eq!(output, record(json!({"b": 2, "c": {"a": 1, "d": 1}})));
    }

    #[test]
    fn test_add_data_overrides_existing_keys() {
        let output = AddData::new(record(json!({"a": "new"})))
            .into_executor()
            .run(record(json!({"a": "old"})))
            .unwrap();
        assert_eq!(output["a"], json!("new"));
    }
}
