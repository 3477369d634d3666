use crate::error::{CiVersionError, Result};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::io::Read;

/// Key of the version field every build agent falls back to
pub const FULL_SEM_VER: &str = "FullSemVer";

/// Ordered mapping of version-field name to its computed value.
///
/// Produced by an external version engine and only ever read here. Keys are
/// unique and iteration follows insertion order. A value may be unset, which
/// substitutes as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionVariables {
    entries: Vec<(String, Option<String>)>,
}

impl VersionVariables {
    /// Create an empty mapping
    pub fn new() -> Self {
        VersionVariables {
            entries: Vec::new(),
        }
    }

    /// Insert a value, keeping the original position if the key already exists
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert of a set value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Look up a value by exact key
    ///
    /// Returns `None` both for unknown keys and for keys whose value is unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The `FullSemVer` field, or an empty string when it is missing
    pub fn full_sem_ver(&self) -> &str {
        self.get(FULL_SEM_VER).unwrap_or_default()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the JSON object a version engine emits.
    ///
    /// String values are kept as-is, `null` becomes unset and other scalars
    /// keep their JSON text (`4`, `true`). The document must contain
    /// `FullSemVer`.
    pub fn from_json(json: &str) -> Result<Self> {
        let variables: VersionVariables = serde_json::from_str(json)?;
        variables.validate()?;
        Ok(variables)
    }

    /// Read and parse a JSON document from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        let full_sem_ver = match self.get(FULL_SEM_VER) {
            Some(value) => value,
            None => {
                return Err(CiVersionError::variables(format!(
                    "'{}' is missing or null",
                    FULL_SEM_VER
                )))
            }
        };

        if let Err(e) = semver::Version::parse(full_sem_ver) {
            tracing::warn!(
                "{} '{}' is not a valid semantic version: {}",
                FULL_SEM_VER,
                full_sem_ver,
                e
            );
        }

        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for VersionVariables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = VersionVariables::new();
        for (key, value) in iter {
            variables.insert(key, Some(value.into()));
        }
        variables
    }
}

struct VersionVariablesVisitor;

impl<'de> Visitor<'de> for VersionVariablesVisitor {
    type Value = VersionVariables;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of version field names to scalar values")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut variables = VersionVariables::new();
        while let Some((key, value)) = map.next_entry::<String, Option<serde_json::Value>>()? {
            let value = match value {
                None | Some(serde_json::Value::Null) => None,
                Some(serde_json::Value::String(s)) => Some(s),
                Some(other) => Some(other.to_string()),
            };
            variables.insert(key, value);
        }
        Ok(variables)
    }
}

impl<'de> Deserialize<'de> for VersionVariables {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(VersionVariablesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let variables = VersionVariables::new()
            .with("Minor", "2")
            .with("FullSemVer", "1.2.3")
            .with("Major", "1");

        let keys: Vec<&str> = variables.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Minor", "FullSemVer", "Major"]);
    }

    #[test]
    fn test_insert_existing_key_keeps_position() {
        let mut variables = VersionVariables::new()
            .with("Major", "1")
            .with("Minor", "2");
        variables.insert("Major", Some("9".to_string()));

        assert_eq!(variables.len(), 2);
        assert_eq!(variables.iter().next(), Some(("Major", Some("9"))));
    }

    #[test]
    fn test_full_sem_ver_missing_is_empty() {
        assert_eq!(VersionVariables::new().full_sem_ver(), "");
    }

    #[test]
    fn test_from_json_mixed_scalars() {
        let json = r#"{
            "Major": 1,
            "FullSemVer": "1.2.3+4",
            "PreReleaseTag": "",
            "BuildMetaData": null,
            "UncommittedChanges": 0,
            "IsRelease": true
        }"#;

        let variables = VersionVariables::from_json(json).unwrap();
        assert_eq!(variables.get("Major"), Some("1"));
        assert_eq!(variables.full_sem_ver(), "1.2.3+4");
        assert_eq!(variables.get("PreReleaseTag"), Some(""));
        assert_eq!(variables.get("BuildMetaData"), None);
        assert!(variables.contains_key("BuildMetaData"));
        assert_eq!(variables.get("IsRelease"), Some("true"));

        let keys: Vec<&str> = variables.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "Major",
                "FullSemVer",
                "PreReleaseTag",
                "BuildMetaData",
                "UncommittedChanges",
                "IsRelease"
            ]
        );
    }

    #[test]
    fn test_from_json_requires_full_sem_ver() {
        let result = VersionVariables::from_json(r#"{"Major": "1"}"#);
        assert!(matches!(result, Err(CiVersionError::Variables(_))));

        let result = VersionVariables::from_json(r#"{"FullSemVer": null}"#);
        assert!(matches!(result, Err(CiVersionError::Variables(_))));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let result = VersionVariables::from_json("[1, 2]");
        assert!(matches!(result, Err(CiVersionError::Json(_))));
    }

    #[test]
    fn test_from_json_accepts_non_semver_full_sem_ver() {
        let json = r#"{"FullSemVer": "not-a-version"}"#;
        let variables = VersionVariables::from_json(json).unwrap();
        assert_eq!(variables.full_sem_ver(), "not-a-version");
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{"FullSemVer": "0.1.0"}"#;
        let variables = VersionVariables::from_reader(&json[..]).unwrap();
        assert_eq!(variables.full_sem_ver(), "0.1.0");
    }
}
