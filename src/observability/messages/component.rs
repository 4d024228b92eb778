// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for leaf components and control-flow constructs.

use std::fmt::{Display, Formatter};

use crate::observability::messages::StructuredLog;
use crate::observability::LogLevel;

/// Action executed.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct ActionExecuted<'a> {
    pub action: &'a str,
}

impl Display for ActionExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Action: {}: Executed", self.action)
    }
}

impl StructuredLog for ActionExecuted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// Executable invoked over one mapping or a list of mappings.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct ExecutableExecuted<'a> {
    pub executable: &'a str,
    pub items: usize,
}

impl Display for ExecutableExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Executable: {}: Executed over {} item(s)",
            self.executable, self.items
        )
    }
}

impl StructuredLog for ExecutableExecuted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// Loop constructed without a condition or an iteration bound.
///
/// # Log Level
/// `warn!` - Potential issue
///
/// # Example
/// ```
/// use the_conduit::observability::messages::component::UnboundedLoop;
///
/// let msg = UnboundedLoop { name: "Poll" };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct UnboundedLoop<'a> {
    pub name: &'a str,
}

impl Display for UnboundedLoop<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "While: {}: Loop is not bounded!", self.name)
    }
}

impl StructuredLog for UnboundedLoop<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }
}

/// Loop finished.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct LoopFinished<'a> {
    pub name: &'a str,
    pub iterations: usize,
    pub exited: bool,
}

impl Display for LoopFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let reason = if self.exited { "exit signal" } else { "bound reached" };
        write!(
            f,
            "While: {}: finished after {} iteration(s) ({})",
            self.name, self.iterations, reason
        )
    }
}

impl StructuredLog for LoopFinished<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

/// Switch branch taken.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct BranchTaken<'a> {
    pub switch: &'a str,
    pub branch: &'a str,
    pub index: usize,
}

impl Display for BranchTaken<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Switch: {}: branch {}({}) executed",
            self.switch, self.index, self.branch
        )
    }
}

impl StructuredLog for BranchTaken<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
}
