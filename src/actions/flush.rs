// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::errors::ExecutionError;
use crate::register::{Record, ReplacingScope};
use crate::traits::action::expect_record;
use crate::traits::{Action, ActionOutput};

/// Remove keys from the input, or everything when no keys are given.
#[derive(Debug, Clone, Default)]
pub struct Flush {
    keys: Option<Vec<String>>,
}

impl Flush {
    pub fn all() -> Self {
        Self { keys: None }
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }
}

impl Action for Flush {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let Some(keys) = &self.keys else {
            return Ok(ActionOutput::Mapping(Record::new()));
        };

        let mut record = expect_record(input)?;
        for key in keys {
            record
                .remove(key)
                .ok_or_else(|| ExecutionError::MissingKey { key: key.clone() })?;
        }
        Ok(ActionOutput::Mapping(record))
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Local
    }
}
