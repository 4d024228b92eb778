// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline components reading and writing evaluator memory.

use serde::Deserialize;

use crate::engine::Evaluator;
use crate::memory::MemoryIdentifier;
use crate::register::{Record, Transformable};
use crate::traits::{Component, ComponentResult, Outcome};

/// How [`SetMemory`] treats the register after writing.
///
/// # Variants
/// * `Set` - Write to memory and keep the data in the register
/// * `Move` - Write to memory and remove the source from the register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySetInstruction {
    #[default]
    Set,
    Move,
}

/// How [`GetMemory`] treats memory after reading.
///
/// # Variants
/// * `Get` - Read into the register and keep the entry
/// * `Pop` - Read into the register and delete the entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryGetInstruction {
    #[default]
    Get,
    Pop,
}

/// Store a register value (or the whole register) in memory.
#[derive(Debug, Clone)]
pub struct SetMemory {
    name: String,
    set_key: String,
    get_key: Option<String>,
    instruction: MemorySetInstruction,
}

impl SetMemory {
    /// Store the whole register under `set_key`.
    pub fn new(set_key: impl Into<String>) -> Self {
        Self {
            name: "SetMemory".to_string(),
            set_key: set_key.into(),
            get_key: None,
            instruction: MemorySetInstruction::Set,
        }
    }

    /// Store only the value at `get_key`.
    pub fn get_key(mut self, key: impl Into<String>) -> Self {
        self.get_key = Some(key.into());
        self
    }

    pub fn instruction(mut self, instruction: MemorySetInstruction) -> Self {
        self.instruction = instruction;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Component for SetMemory {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, mut input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        evaluator.set_memory(&input, self.get_key.as_deref(), &self.set_key)?;
        if self.instruction == MemorySetInstruction::Move {
            match &self.get_key {
                Some(key) => {
                    input.remove(key);
                }
                None => input.flush(),
            }
        }
        Ok(Outcome::Next(input))
    }
}

/// Copy memory entries into the register.
///
/// Identifiers missing from memory take their value from the defaults map
/// (keyed by memory key); a miss without a default is an error.
#[derive(Debug, Clone)]
pub struct GetMemory {
    name: String,
    identifiers: Vec<MemoryIdentifier>,
    default: Record,
    instruction: MemoryGetInstruction,
}

impl GetMemory {
    pub fn new<I, T>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MemoryIdentifier>,
    {
        Self {
            name: "GetMemory".to_string(),
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            default: Record::new(),
            instruction: MemoryGetInstruction::Get,
        }
    }

    pub fn with_default(mut self, default: Record) -> Self {
        self.default = default;
        self
    }

    pub fn instruction(mut self, instruction: MemoryGetInstruction) -> Self {
        self.instruction = instruction;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Component for GetMemory {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let delete = self.instruction == MemoryGetInstruction::Pop;
        let register = evaluator.get_memory(input, &self.identifiers, &self.default, delete)?;
        Ok(Outcome::Next(register))
    }
}

/// Delete listed entries, or flush the whole memory when none are listed.
#[derive(Debug, Clone)]
pub struct DeleteMemory {
    name: String,
    identifiers: Option<Vec<String>>,
}

impl DeleteMemory {
    pub fn all() -> Self {
        Self {
            name: "DeleteMemory".to_string(),
            identifiers: None,
        }
    }

    pub fn keys<I, T>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            identifiers: Some(identifiers.into_iter().map(Into::into).collect()),
            ..Self::all()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Component for DeleteMemory {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        match self.identifiers.as_deref() {
            None | Some([]) => evaluator.flush_memory()?,
            Some(keys) => {
                for key in keys {
                    evaluator.delete_memory(key)?;
                }
            }
        }
        Ok(Outcome::Next(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::memory::MemoryManager;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn evaluator_with<C: Component + 'static>(component: C, memory: &Arc<MemoryManager>) -> Evaluator {
        Evaluator::new(component).with_memory_manager(Arc::clone(memory))
    }

    #[test]
    fn test_get_then_pop() {
        let memory = Arc::new(MemoryManager::with_initial_data(record(json!({"test": "OK"}))));

        let output = evaluator_with(GetMemory::new(["test"]), &memory)
            .run(Record::new())
            .unwrap();
        assert_eq!(output["test"], json!("OK"));
        assert_eq!(memory.retrieve_store("test").unwrap(), json!("OK"));

        let popped = GetMemory::new(["test"]).instruction(MemoryGetInstruction::Pop);
        let output = evaluator_with(popped, &memory).run(Record::new()).unwrap();
        assert_eq!(output["test"], json!("OK"));
        assert!(!memory.contains("test"));
    }

    #[test]
    fn test_set_and_move() {
        let memory = Arc::new(MemoryManager::with_initial_data(record(json!({"else": "data"}))));

        let output = evaluator_with(SetMemory::new("test").get_key("data"), &memory)
            .run(record(json!({"data": "OK"})))
            .unwrap();
        assert_eq!(output["data"], json!("OK"));
        assert_eq!(memory.retrieve_store("test").unwrap(), json!("OK"));

        let moved = SetMemory::new("test")
            .get_key("other")
            .instruction(MemorySetInstruction::Move);
        let output = evaluator_with(moved, &memory)
            .run(record(json!({"other": "Nice"})))
            .unwrap();
        assert!(output.get("other").is_none());
        assert_eq!(memory.retrieve_store("test").unwrap(), json!("Nice"));
        assert_eq!(memory.retrieve_store("else").unwrap(), json!("data"));
    }

    #[test]
    fn test_move_whole_register_flushes_it() {
        let memory = Arc::new(MemoryManager::new());
        let moved = SetMemory::new("snapshot").instruction(MemorySetInstruction::Move);
        let output = evaluator_with(moved, &memory)
            .run(record(json!({"a": 1, "b": 2})))
            .unwrap();
        assert!(output.is_empty());
        assert_eq!(memory.retrieve_store("snapshot").unwrap(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_delete_listed_and_flush() {
        let memory = Arc::new(MemoryManager::with_initial_data(record(
            json!({"test1": "OK", "test2": "OK"}),
        )));
        let output = evaluator_with(DeleteMemory::keys(["test1"]), &memory)
            .run(record(json!({"data": "OK"})))
            .unwrap();
        assert_eq!(output["data"], json!("OK"));
        assert!(!memory.contains("test1"));
        assert!(memory.contains("test2"));

        evaluator_with(DeleteMemory::all(), &memory)
            .run(Record::new())
            .unwrap();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_get_uses_default_on_miss() {
        let step = GetMemory::new(["absent"]).with_default(record(json!({"absent": 0})));
        let output = step.run(Record::new()).unwrap();
        assert_eq!(output["absent"], json!(0));

        let error = GetMemory::new(["absent"]).run(Record::new()).unwrap_err();
        assert_eq!(error.to_string(), "No specified identifier found: absent");
    }
}
