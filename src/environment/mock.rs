use crate::environment::Environment;
use std::collections::HashMap;

/// Mock environment for testing without touching process state
#[derive(Debug, Clone, Default)]
pub struct MockEnvironment {
    variables: HashMap<String, String>,
}

impl MockEnvironment {
    /// Create a new empty mock environment
    pub fn new() -> Self {
        MockEnvironment {
            variables: HashMap::new(),
        }
    }

    /// Set a variable, returning the environment for chaining
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_variable(name, value);
        self
    }

    /// Set a variable
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Remove a variable
    pub fn remove_variable(&mut self, name: &str) {
        self.variables.remove(name);
    }
}

impl Environment for MockEnvironment {
    fn get_variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}
