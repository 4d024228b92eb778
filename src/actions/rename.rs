// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Key renaming actions.
//!
//! [`RenameAttributeQuery`] accepts a compact query language:
//!
//! ```text
//! new_name <- old_name ; other_new <- other_old
//! ```
//!
//! Transformations are separated by `;` and applied left to right, `<-`
//! points from the old key to the new one, and whitespace around names is
//! ignored. The query is parsed once, at construction.

use serde_json::Value;

use crate::errors::ExecutionError;
use crate::register::{Record, ReplacingScope};
use crate::traits::action::expect_record;
use crate::traits::{Action, ActionOutput};

const TRANSFORMATION_DELIMITER: char = ';';
const TRANSFORMATION_POINTER: &str = "<-";

fn rename(record: &mut Record, old: &str, new: &str) -> Result<(), ExecutionError> {
    let value = record.remove(old).ok_or_else(|| ExecutionError::MissingKey {
        key: old.to_string(),
    })?;
    record.insert(new.to_string(), value);
    Ok(())
}

/// Move one value to a new key.
#[derive(Debug, Clone)]
pub struct RenameAttribute {
    old: String,
    new: String,
}

impl RenameAttribute {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

impl Action for RenameAttribute {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let mut record = expect_record(input)?;
        rename(&mut record, &self.old, &self.new)?;
        Ok(ActionOutput::Mapping(record))
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Local
    }
}

/// Rename several keys described by a query string.
#[derive(Debug, Clone)]
pub struct RenameAttributeQuery {
    query: String,
    /// `(old, new)` pairs in application order.
    renames: Vec<(String, String)>,
}

impl RenameAttributeQuery {
    pub fn new(query: impl Into<String>) -> Result<Self, ExecutionError> {
        let query = query.into();
        let renames = query
            .split(TRANSFORMATION_DELIMITER)
            .map(parse_transformation)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { query, renames })
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

fn parse_transformation(part: &str) -> Result<(String, String), ExecutionError> {
    let names: Vec<&str> = part.split(TRANSFORMATION_POINTER).collect();
    match names.as_slice() {
        [new, old] => Ok((old.trim().to_string(), new.trim().to_string())),
        _ => Err(ExecutionError::InvalidQuery {
            query: part.to_string(),
        }),
    }
}

impl Action for RenameAttributeQuery {
    fn execute(&self, input: Value) -> Result<ActionOutput, ExecutionError> {
        let mut record = expect_record(input)?;
        for (old, new) in &self.renames {
            rename(&mut record, old, new)?;
        }
        Ok(ActionOutput::Mapping(record))
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Local
    }
}
