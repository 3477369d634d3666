use crate::agents::BuildAgent;
use crate::variables::VersionVariables;

/// Build agent used when no CI provider is detected
///
/// Always applies and emits nothing, so integration output is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBuild;

impl LocalBuild {
    pub fn new() -> Self {
        LocalBuild
    }
}

impl BuildAgent for LocalBuild {
    fn name(&self) -> &'static str {
        "LocalBuild"
    }

    fn detect(&self) -> bool {
        true
    }

    fn prevent_fetch(&self) -> bool {
        false
    }

    fn generate_set_parameter_message(&self, _name: &str, _value: &str) -> Vec<String> {
        Vec::new()
    }

    fn generate_set_version_message(&self, _variables: &VersionVariables) -> String {
        String::new()
    }
}
