// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline interpreter.
//!
//! * [`ExecutionSchema`] - ordered program of components, threading the register
//! * [`Evaluator`] - execution context owning the logger and memory
//! * [`ActionExecutor`] / [`ExecutableExecutor`] - scoped-view wrappers that
//!   turn leaf units of work into components

pub mod evaluator;
pub mod executor;
pub mod schema;
#[cfg(test)]
mod integration_tests;

pub use evaluator::Evaluator;
pub use executor::{ActionExecutor, ExecutableExecutor};
pub use schema::ExecutionSchema;
