// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for schema execution and evaluator events.

use std::fmt::{Display, Formatter};

use crate::observability::messages::StructuredLog;
use crate::observability::LogLevel;

/// Schema step completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StepCompleted<'a> {
    pub schema: &'a str,
    pub step: usize,
    pub component: &'a str,
}

impl Display for StepCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: Step {}({}) executed successfully.",
            self.schema, self.step, self.component
        )
    }
}

impl StructuredLog for StepCompleted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// Schema step failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct StepFailed<'a> {
    pub schema: &'a str,
    pub step: usize,
    pub component: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: Error at step {}({}): {}",
            self.schema, self.step, self.component, self.error
        )
    }
}

impl StructuredLog for StepFailed<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Failed step skipped because fast exit is disabled.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct StepSkipped<'a> {
    pub schema: &'a str,
    pub step: usize,
}

impl Display for StepSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: Continuing after step {} with the previous register",
            self.schema, self.step
        )
    }
}

impl StructuredLog for StepSkipped<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }
}

/// An error escaped the component wrapped by an evaluator.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct EvaluationFailed<'a> {
    pub evaluator: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EvaluationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Evaluator '{}' failed: {}", self.evaluator, self.error)
    }
}

impl StructuredLog for EvaluationFailed<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Loop-exit signal reached the top of a run outside any loop.
///
/// # Log Level
/// `warn!` - Potential issue
pub struct ExitLoopOutsideLoop<'a> {
    pub evaluator: &'a str,
}

impl Display for ExitLoopOutsideLoop<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Evaluator '{}': exit loop signal raised outside a loop; run ends here",
            self.evaluator
        )
    }
}

impl StructuredLog for ExitLoopOutsideLoop<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }
}
