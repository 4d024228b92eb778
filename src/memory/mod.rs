// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Side-channel key/value memory.
//!
//! Memory lives outside the register and is shared by an evaluator and all of
//! its children, which makes it the channel for state that has to cross scope
//! boundaries (loop iterations, branch bodies, per-item runs).
//!
//! * [`MemoryStore`] - storage backend, in process or file backed
//! * [`MemoryManager`] - register-aware access used by the evaluator
//! * [`SetMemory`], [`GetMemory`], [`DeleteMemory`] - pipeline components

pub mod components;
pub mod manager;
pub mod store;

pub use components::{DeleteMemory, GetMemory, MemoryGetInstruction, MemorySetInstruction, SetMemory};
pub use manager::{MemoryIdentifier, MemoryManager};
pub use store::{FileStore, InMemoryStore, MemoryStore};
