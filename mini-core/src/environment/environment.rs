use std::collections::HashMap;

use super::prelude::Value;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    pub store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new()
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.store.insert(name, value);
    }
}
