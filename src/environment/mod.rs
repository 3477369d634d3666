//! Environment variable access layer
//!
//! Build agents never read the process environment directly. They go
//! through the [Environment] trait so that detection and message generation
//! can be exercised against synthetic variable sets.
//!
//! - [process::ProcessEnvironment]: reads the live process environment
//! - [mock::MockEnvironment]: in-memory variables for tests
//!
//! ```rust
//! # use ci_version::environment::{Environment, MockEnvironment};
//! let env = MockEnvironment::new().with_variable("TF_BUILD", "True");
//! assert_eq!(env.get_variable("TF_BUILD").as_deref(), Some("True"));
//! assert_eq!(env.get_variable("BUILD_BUILDNUMBER"), None);
//! ```

pub mod mock;
pub mod process;

pub use mock::MockEnvironment;
pub use process::ProcessEnvironment;

/// Read-only lookup of environment variables by name
///
/// Implementors must be `Send + Sync` so a single accessor can be shared by
/// every build agent in a resolver.
pub trait Environment: Send + Sync {
    /// Get the value of an environment variable
    ///
    /// # Returns
    /// * `Some(value)` - The variable is set (the value may be empty)
    /// * `None` - The variable is not set
    fn get_variable(&self, name: &str) -> Option<String>;

    /// Whether a variable is set to a non-empty value
    fn has_non_empty(&self, name: &str) -> bool {
        self.get_variable(name)
            .is_some_and(|value| !value.is_empty())
    }
}
