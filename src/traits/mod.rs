// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod action;
pub mod component;
pub mod executable;
pub mod predicate;

pub use action::{Action, ActionOutput};
pub use component::{Component, ComponentResult, Outcome};
pub use executable::Executable;
pub use predicate::Predicate;
