// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in actions.
//!
//! Every action here is a pure transformation of the slice of the register
//! selected by its executor. Wrap one with
//! [`Action::into_executor`](crate::traits::Action::into_executor) or
//! [`Action::scoped`](crate::traits::Action::scoped) to place it in a schema,
//! or build it from configuration through [`LocalActionFactory`].

pub mod add_data;
pub mod execute_function;
pub mod factory;
pub mod flush;
pub mod rename;
pub mod values;

pub use add_data::AddData;
pub use execute_function::ExecuteFunction;
pub use factory::LocalActionFactory;
pub use flush::Flush;
pub use rename::{RenameAttribute, RenameAttributeQuery};
pub use values::{NestToKey, SetValue, UnpackValue};
