// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::Value;

use crate::engine::Evaluator;
use crate::flow::for_each::list_at;
use crate::register::Transformable;
use crate::traits::action::expect_record;
use crate::traits::{Component, ComponentResult, Outcome, Predicate};

/// Keep the elements of a list for which a predicate holds.
///
/// Each element is offered to the predicate as its own register. Survivors
/// keep their order and are written to `set_key` (`get_key` when unset).
pub struct Filter {
    name: String,
    condition: Arc<dyn Predicate>,
    get_key: String,
    set_key: String,
}

impl Filter {
    pub fn new<P: Predicate + 'static>(condition: P, get_key: impl Into<String>) -> Self {
        let get_key = get_key.into();
        Self {
            name: "Filter".to_string(),
            condition: Arc::new(condition),
            set_key: get_key.clone(),
            get_key,
        }
    }

    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.set_key = key.into();
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Component for Filter {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn call(&self, mut input: Transformable, evaluator: &Evaluator) -> ComponentResult {
        let mut kept = Vec::new();
        for item in list_at(&input, &self.get_key)? {
            let element = Transformable::new(expect_record(item)?);
            if self.condition.check(&element, evaluator)? {
                kept.push(Value::from(element));
            }
        }

        input.set(self.set_key.clone(), Value::Array(kept));
        Ok(Outcome::Next(input))
    }
}
