// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Control-flow components.
//!
//! Every body (condition sub-schema, branch, loop body, per-item schema) runs
//! in a child evaluator named after the construct, over its own copy of the
//! register. Only the construct's own write-back reaches the caller's
//! register; memory is the one channel shared across the boundary.

pub mod condition;
pub mod filter;
pub mod for_each;
pub mod log;
pub mod loops;
pub mod switch;

pub use condition::Condition;
pub use filter::Filter;
pub use for_each::ForEach;
pub use log::Log;
pub use loops::{Break, While, WhileBuilder, BREAK};
pub use switch::{Branch, BranchOutcome, Switch};
