use crate::agents::BuildAgent;
use crate::config::DEFAULT_NAMESPACE;
use crate::environment::Environment;
use crate::substitution;
use crate::variables::VersionVariables;
use std::sync::Arc;

/// Set to `True` by the Azure Pipelines agent
pub const ENVIRONMENT_VARIABLE_NAME: &str = "TF_BUILD";

/// Ref that triggered the build (`refs/heads/...`, `refs/tags/...`, `refs/pull/...`)
pub const SOURCE_BRANCH_VARIABLE: &str = "BUILD_SOURCEBRANCH";

/// Build number as configured in the pipeline's `name:` field
pub const BUILD_NUMBER_VARIABLE: &str = "BUILD_BUILDNUMBER";

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Azure Pipelines build agent
///
/// Exposes variables through `##vso[task.setvariable]` logging commands and
/// rewrites the run's build number with `##vso[build.updatebuildnumber]`.
pub struct AzurePipelines {
    environment: Arc<dyn Environment>,
    namespace: String,
}

impl AzurePipelines {
    pub fn new(environment: Arc<dyn Environment>) -> Self {
        Self::with_namespace(environment, DEFAULT_NAMESPACE)
    }

    /// Create an agent that prefixes variable names with `namespace`
    pub fn with_namespace(environment: Arc<dyn Environment>, namespace: impl Into<String>) -> Self {
        AzurePipelines {
            environment,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn update_build_number_command(build_number: &str) -> String {
        format!("##vso[build.updatebuildnumber]{}", build_number)
    }
}

impl BuildAgent for AzurePipelines {
    fn name(&self) -> &'static str {
        "AzurePipelines"
    }

    fn detect(&self) -> bool {
        self.environment.has_non_empty(ENVIRONMENT_VARIABLE_NAME)
    }

    fn get_current_branch(&self, _using_dynamic_repos: bool) -> Option<String> {
        // Only branch builds carry refs/heads/; tag and PR builds do not name a branch.
        self.environment
            .get_variable(SOURCE_BRANCH_VARIABLE)
            .filter(|source| source.starts_with(BRANCH_REF_PREFIX))
    }

    fn prevent_fetch(&self) -> bool {
        true
    }

    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String> {
        let variable = format!("{}.{}", self.namespace, name);
        vec![
            format!("##vso[task.setvariable variable={}]{}", variable, value),
            format!(
                "##vso[task.setvariable variable={};isOutput=true]{}",
                variable, value
            ),
        ]
    }

    fn generate_set_version_message(&self, variables: &VersionVariables) -> String {
        let full_sem_ver = variables.full_sem_ver();

        let build_number = match self.environment.get_variable(BUILD_NUMBER_VARIABLE) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                tracing::debug!("Build number is not set, reporting FullSemVer");
                return full_sem_ver.to_string();
            }
        };

        let new_build_number = substitution::substitute(&build_number, variables);

        if new_build_number == build_number {
            tracing::debug!("No placeholders in '{}', using FullSemVer", build_number);
            let version = full_sem_ver.strip_suffix("+0").unwrap_or(full_sem_ver);
            return Self::update_build_number_command(version);
        }

        Self::update_build_number_command(&new_build_number)
    }
}
