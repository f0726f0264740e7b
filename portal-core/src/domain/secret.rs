//! Secret store paths

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a secret in the secret store
///
/// Paths are namespaced per component and per credential prefix:
/// `<component>/<prefix>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretPath {
    component: String,
    prefix: String,
    name: String,
}

impl SecretPath {
    pub fn new(
        component: impl Into<String>,
        prefix: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    /// Parse a `<component>/<prefix>/<name>` path
    ///
    /// Returns `None` unless there are exactly three non-empty segments.
    pub fn parse(input: &str) -> Option<Self> {
        let mut segments = input.trim_matches('/').split('/');
        let component = segments.next().filter(|s| !s.is_empty())?;
        let prefix = segments.next().filter(|s| !s.is_empty())?;
        let name = segments.next().filter(|s| !s.is_empty())?;
        if segments.next().is_some() {
            return None;
        }
        Some(Self::new(component, prefix, name))
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SecretPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.component, self.prefix, self.name)
    }
}

impl TryFrom<String> for SecretPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SecretPath::parse(&value).ok_or_else(|| format!("invalid secret path: {value}"))
    }
}

impl From<SecretPath> for String {
    fn from(path: SecretPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let path = SecretPath::new("comp-1", "github", "app");
        assert_eq!(path.to_string(), "comp-1/github/app");
        assert_eq!(SecretPath::parse("comp-1/github/app"), Some(path));
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        assert_eq!(SecretPath::parse("comp-1/github"), None);
        assert_eq!(SecretPath::parse("comp-1//app"), None);
        assert_eq!(SecretPath::parse("a/b/c/d"), None);
    }
}
