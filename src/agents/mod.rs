//! Build agent abstraction layer
//!
//! A build agent encapsulates one CI provider's environment conventions and
//! output protocol. The [BuildAgent] trait is implemented once per provider:
//!
//! - [azure_pipelines::AzurePipelines]: Azure Pipelines (`TF_BUILD`)
//! - [local::LocalBuild]: the default when no CI provider is detected
//!
//! [resolver::BuildAgentResolver] checks the providers in order and falls back
//! to [local::LocalBuild].
//!
//! ```rust
//! # use std::sync::Arc;
//! # use ci_version::agents::{BuildAgent, BuildAgentResolver};
//! # use ci_version::config::Config;
//! # use ci_version::environment::MockEnvironment;
//! let env = MockEnvironment::new().with_variable("TF_BUILD", "True");
//! let resolver = BuildAgentResolver::new(Arc::new(env), &Config::default());
//! assert_eq!(resolver.resolve().name(), "AzurePipelines");
//! ```

pub mod azure_pipelines;
pub mod local;
pub mod resolver;

pub use azure_pipelines::AzurePipelines;
pub use local::LocalBuild;
pub use resolver::BuildAgentResolver;

use crate::variables::VersionVariables;
use std::io::{self, Write};

/// Contract every CI provider adapter implements
///
/// Agents hold no mutable state, so every operation is a function of its
/// arguments and whatever environment the agent was built with.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
pub trait BuildAgent: Send + Sync {
    /// Provider name used in logs and CLI output
    fn name(&self) -> &'static str;

    /// Whether the tool is running under this provider
    ///
    /// Providers report true iff their marker variable is set to a
    /// non-empty value.
    fn detect(&self) -> bool;

    /// Current branch ref, if the provider exposes it
    ///
    /// `None` means "fall back to git-based branch detection", not failure.
    fn get_current_branch(&self, _using_dynamic_repos: bool) -> Option<String> {
        None
    }

    /// Whether the checkout is already authoritative, making a fetch redundant
    fn prevent_fetch(&self) -> bool {
        true
    }

    /// Command lines that expose one named output variable
    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String>;

    /// Command (or plain text) that updates the CI build number
    fn generate_set_version_message(&self, variables: &VersionVariables) -> String;

    /// Set-parameter lines for every variable, in mapping order
    fn generate_build_log_output(&self, variables: &VersionVariables) -> Vec<String> {
        variables
            .iter()
            .flat_map(|(name, value)| {
                self.generate_set_parameter_message(name, value.unwrap_or_default())
            })
            .collect()
    }

    /// Write the full CI integration output.
    ///
    /// Writes the set-version message when `update_build_number` is set, then
    /// one set of parameter lines per variable. Empty messages are skipped.
    fn write_integration(
        &self,
        writer: &mut dyn Write,
        variables: &VersionVariables,
        update_build_number: bool,
    ) -> io::Result<()> {
        let agent = self.name();

        if update_build_number {
            tracing::info!("Executing GenerateSetVersionMessage for '{}'.", agent);
            let message = self.generate_set_version_message(variables);
            if !message.is_empty() {
                writeln!(writer, "{}", message)?;
            }
        }

        tracing::info!("Executing GenerateBuildLogOutput for '{}'.", agent);
        for line in self.generate_build_log_output(variables) {
            writeln!(writer, "{}", line)?;
        }

        Ok(())
    }
}
