pub mod agents;
pub mod config;
pub mod environment;
pub mod error;
pub mod output;
pub mod substitution;
pub mod variables;

pub use agents::{BuildAgent, BuildAgentResolver};
pub use error::{CiVersionError, Result};
pub use variables::VersionVariables;
