use crate::error::{CiVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name searched for in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "ci-version.toml";

/// Namespace prefixed to every exported variable name by default
pub const DEFAULT_NAMESPACE: &str = "GitVersion";

/// Represents the complete configuration for ci-version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_update_build_number() -> bool {
    true
}

/// Configuration for build agent output.
///
/// Controls how variables are named and whether the CI build number is
/// rewritten during integration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AgentConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_update_build_number")]
    pub update_build_number: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            namespace: default_namespace(),
            update_build_number: default_update_build_number(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ci-version.toml` in current directory
/// 3. `ci-version.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local_path = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local_path.exists() {
        fs::read_to_string(local_path)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
///
/// Rejects an empty namespace, which would produce variable names like
/// `.FullSemVer`.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    if config.agent.namespace.trim().is_empty() {
        return Err(CiVersionError::config("agent.namespace must not be empty"));
    }
    Ok(config)
}
