// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the engine, plus the [`Logger`] each
//! [`Evaluator`](crate::engine::Evaluator) owns. Message types follow a struct-based
//! pattern with a `Display` implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep the severity of each event next to its wording
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Schema steps and evaluator failures
//! * `messages::component` - Actions, executables and control-flow events
//! * `messages::memory` - Memory store reads, writes and deletions
//!
//! # Usage
//!
//! ```rust
//! use the_conduit::observability::{LogLevel, Logger};
//! use the_conduit::observability::messages::{engine::StepCompleted, StructuredLog};
//!
//! let logger = Logger::new("Pipeline", LogLevel::Info);
//! StepCompleted {
//!     schema: "ExecutionSchema",
//!     step: 0,
//!     component: "AddData",
//! }
//! .log_to(&logger);
//! ```

#[cfg(test)]
pub(crate) mod capture;
mod logger;
pub mod messages;

pub use logger::{init_tracing, LogLevel, Logger, ENGINE_LOGGER};
