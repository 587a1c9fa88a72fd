//! # Component Identity Newtypes
//!
//! A component is addressed by its name (`"button"`, `"character-count"`)
//! and the frontend release it belongs to (`"v4.7.0"`). Both end up in
//! filesystem paths and cache keys, so they are validated once here and
//! carried as distinct types afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of a frontend component, e.g. `table` or `error-summary`.
///
/// Lowercase ASCII letters, digits and single hyphens only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName(String);

/// A frontend release identifier, e.g. `v4.7.0` or a branch name.
///
/// Any non-empty string without path separators, `..` or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrontendVersion(String);

impl ComponentName {
    /// Validate and wrap a component name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentifier` if the name is empty, contains
    /// characters outside `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if !name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            Some("only lowercase letters, digits and hyphens are allowed")
        } else if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
            Some("hyphens must separate words")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidIdentifier {
                kind: "component name",
                value: name,
                reason,
            }),
            None => Ok(Self(name)),
        }
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FrontendVersion {
    /// Validate and wrap a version identifier.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentifier` if the version is empty or
    /// could escape the directory it is joined onto.
    pub fn new(version: impl Into<String>) -> Result<Self, CoreError> {
        let version = version.into();
        let reason = if version.is_empty() {
            Some("must not be empty")
        } else if version.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if version.contains("..") {
            Some("must not contain '..'")
        } else if version.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("must not contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidIdentifier {
                kind: "frontend version",
                value: version,
                reason,
            }),
            None => Ok(Self(version)),
        }
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ComponentName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for FrontendVersion {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComponentName> for String {
    fn from(value: ComponentName) -> Self {
        value.0
    }
}

impl From<FrontendVersion> for String {
    fn from(value: FrontendVersion) -> Self {
        value.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FrontendVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
