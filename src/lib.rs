// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod actions;       // built-in leaf actions
pub mod config;        // config + runtime builder
pub mod engine;        // schema, evaluator, scoped executors
pub mod errors;        // error handling
pub mod flow;          // control-flow components
pub mod memory;        // side-channel memory
pub mod observability;
pub mod register;      // the data register
pub mod traits;        // unified abstractions

pub use engine::{ActionExecutor, Evaluator, ExecutableExecutor, ExecutionSchema};
pub use errors::{ExecutionError, MemoryError};
pub use register::{Record, ReplacingScope, Transformable};
pub use traits::{Action, ActionOutput, Component, Executable, Outcome, Predicate};
