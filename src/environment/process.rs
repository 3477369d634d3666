use crate::environment::Environment;

/// Environment accessor backed by the current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        ProcessEnvironment
    }
}

impl Environment for ProcessEnvironment {
    fn get_variable(&self, name: &str) -> Option<String> {
        std::env::var_os(name)
            .map(|value| value.to_string_lossy().into_owned())
    }
}
