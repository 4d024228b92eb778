// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for its wording and [`StructuredLog`]
//! for its severity, so call sites never pick a level by hand.
//!
//! # Organization
//!
//! * `engine` - Schema steps and evaluator failures
//! * `component` - Actions, executables and control-flow events
//! * `memory` - Memory store events

pub mod component;
pub mod engine;
pub mod memory;

use std::fmt::Display;

use crate::observability::logger::emit;
use crate::observability::{LogLevel, Logger, ENGINE_LOGGER};

/// A log message with a fixed severity.
pub trait StructuredLog: Display {
    fn level(&self) -> LogLevel;

    /// Emit through the global subscriber, outside any evaluator.
    fn log(&self)
    where
        Self: Sized,
    {
        emit(self.level(), ENGINE_LOGGER, self);
    }

    /// Emit through `logger`, honoring its threshold.
    fn log_to(&self, logger: &Logger)
    where
        Self: Sized,
    {
        logger.log(self.level(), self);
    }
}
