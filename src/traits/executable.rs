// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::engine::{Evaluator, ExecutableExecutor};
use crate::errors::ExecutionError;
use crate::register::{Record, ReplacingScope};
use crate::traits::action::value_kind;
use crate::traits::component::short_type_name;

/// Unit of work whose input and output are validated against declared schemas.
///
/// The declared schemas are the `Input` and `Output` types: the raw mapping is
/// deserialized into `Input` before [`invoke`](Executable::invoke), and the
/// returned mapping must deserialize into `Output` afterwards. This is the
/// boundary contract between the engine and external collaborators such as
/// model predictors or datasource connectors.
pub trait Executable: Send + Sync {
    type Input: DeserializeOwned;
    type Output: Serialize + DeserializeOwned;

    fn invoke(&self, input: Self::Input, evaluator: &Evaluator) -> Result<Record, ExecutionError>;

    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    fn replacing_scope(&self) -> ReplacingScope {
        ReplacingScope::Inplace
    }

    fn validate_input(&self, data: Record) -> Result<Self::Input, ExecutionError> {
        validate::<Self::Input>(data)
    }

    fn validate_output(&self, data: Record) -> Result<Self::Output, ExecutionError> {
        validate::<Self::Output>(data)
    }

    /// Validate input, invoke, validate output. Any failure is wrapped with
    /// the executable's name.
    fn execute(&self, data: Record, evaluator: &Evaluator) -> Result<Record, ExecutionError> {
        let run = || -> Result<Record, ExecutionError> {
            let input = self.validate_input(data)?;
            let output = self.validate_output(self.invoke(input, evaluator)?)?;
            extract(&output)
        };
        run().map_err(|e| ExecutionError::executable(self.name(), e))
    }

    /// Wrap into a component operating on the register root.
    fn into_executor(self) -> ExecutableExecutor<Self>
    where
        Self: Sized + 'static,
    {
        ExecutableExecutor::new(self)
    }
}

fn validate<T: DeserializeOwned>(data: Record) -> Result<T, ExecutionError> {
    serde_json::from_value(Value::Object(data)).map_err(|e| ExecutionError::Validation {
        schema: short_type_name::<T>(),
        reason: e.to_string(),
    })
}

/// Unpack validated data back into a mapping.
fn extract<T: Serialize>(validated: &T) -> Result<Record, ExecutionError> {
    match serde_json::to_value(validated) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(ExecutionError::Validation {
            schema: short_type_name::<T>(),
            reason: format!("expected a mapping, serialized to {}", value_kind(&other)),
        }),
        Err(e) => Err(ExecutionError::Validation {
            schema: short_type_name::<T>(),
            reason: e.to_string(),
        }),
    }
}
