//! `$(GITVERSION.<Key>)` placeholder substitution.
//!
//! Build numbers supplied by a CI provider may reference computed version
//! fields, e.g. `$(GITVERSION.Major).$(GITVERSION_Minor)-ci`. Each placeholder
//! is matched case-insensitively with either `.` or `_` after `GITVERSION`.

use crate::variables::VersionVariables;
use regex::{NoExpand, Regex};

/// Build the matcher for a single version field.
///
/// The key is escaped, so it always matches as literal text.
fn token_pattern(key: &str) -> Result<Regex, regex::Error> {
    let pattern = format!(r"(?i)\$\(GITVERSION[_.]{}\)", regex::escape(key));
    Regex::new(&pattern)
}

/// Replace every placeholder for `key` in `template` with `value`.
///
/// An unset value replaces with the empty string. The value is inserted
/// literally, `$` sequences in it are not expanded.
///
/// # Example
/// ```rust
/// # use ci_version::substitution::replace_token;
/// let out = replace_token("$(GITVERSION.major)-$(gitversion_MAJOR)", "Major", Some("1"));
/// assert_eq!(out, "1-1");
/// ```
pub fn replace_token(template: &str, key: &str, value: Option<&str>) -> String {
    match token_pattern(key) {
        Ok(re) => {
            let replacement = NoExpand(value.unwrap_or_default());
            re.replace_all(template, replacement).into_owned()
        }
        Err(e) => {
            tracing::warn!("Skipping substitution for '{}': {}", key, e);
            template.to_string()
        }
    }
}

/// Substitute every version field into `template`.
///
/// Runs [replace_token] as a left fold in the mapping's iteration order, so
/// text produced by an earlier field is scanned again by later fields.
pub fn substitute(template: &str, variables: &VersionVariables) -> String {
    variables
        .iter()
        .fold(template.to_string(), |accumulator, (key, value)| {
            replace_token(&accumulator, key, value)
        })
}
