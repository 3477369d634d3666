use thiserror::Error;

/// Unified error type for ci-version operations
#[derive(Error, Debug)]
pub enum CiVersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version variables error: {0}")]
    Variables(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in ci-version
pub type Result<T> = std::result::Result<T, CiVersionError>;

impl CiVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CiVersionError::Config(msg.into())
    }

    /// Create a version variables error with context
    pub fn variables(msg: impl Into<String>) -> Self {
        CiVersionError::Variables(msg.into())
    }
}
