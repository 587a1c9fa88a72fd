//! Repository layout configuration.
//!
//! Component specs live in per-version checkouts of the frontend
//! repository:
//!
//! ```text
//! $GOVUK_FRONTEND_ROOT/<version>/$GOVUK_COMPONENTS_PATH/<name>/<name>.yaml
//! ```
//!
//! Both variables are optional. Override via environment variables or
//! explicit construction for tests.

use std::path::{Path, PathBuf};

use govuk_core::{ComponentName, FrontendVersion};
use thiserror::Error;

/// Directory holding one frontend checkout per version.
pub const ROOT_ENV: &str = "GOVUK_FRONTEND_ROOT";
/// Path of the components directory inside a checkout.
pub const COMPONENTS_PATH_ENV: &str = "GOVUK_COMPONENTS_PATH";
/// Default for [`COMPONENTS_PATH_ENV`].
pub const DEFAULT_COMPONENTS_PATH: &str = "src/govuk/components";

/// Error while reading layout configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but empty.
    #[error("{var} is set but empty")]
    Empty {
        /// Variable name.
        var: &'static str,
    },

    /// The components path must stay inside the checkout.
    #[error("{var} must be a relative path inside the checkout, got '{value}'")]
    EscapingComponentsPath {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Where component specs are found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    /// Directory holding one checkout per frontend version.
    pub root: PathBuf,
    /// Components directory relative to a checkout.
    pub components_path: PathBuf,
}

impl RepositoryLayout {
    /// A layout rooted at `root` with the default components path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            components_path: PathBuf::from(DEFAULT_COMPONENTS_PATH),
        }
    }

    /// Load the layout from process environment variables.
    ///
    /// Variables:
    /// - `GOVUK_FRONTEND_ROOT` (default: `.`)
    /// - `GOVUK_COMPONENTS_PATH` (default: `src/govuk/components`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the layout through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let root = match lookup(ROOT_ENV) {
            Some(value) if value.is_empty() => return Err(ConfigError::Empty { var: ROOT_ENV }),
            Some(value) => PathBuf::from(value),
            None => PathBuf::from("."),
        };

        let components_path = match lookup(COMPONENTS_PATH_ENV) {
            Some(value) if value.is_empty() => {
                return Err(ConfigError::Empty {
                    var: COMPONENTS_PATH_ENV,
                })
            }
            Some(value) => {
                let path = PathBuf::from(&value);
                if !stays_inside(&path) {
                    return Err(ConfigError::EscapingComponentsPath {
                        var: COMPONENTS_PATH_ENV,
                        value,
                    });
                }
                path
            }
            None => PathBuf::from(DEFAULT_COMPONENTS_PATH),
        };

        Ok(Self {
            root,
            components_path,
        })
    }

    /// Replace the root directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Path of a component's spec file at a version.
    pub fn spec_path(&self, version: &FrontendVersion, component: &ComponentName) -> PathBuf {
        self.root
            .join(version.as_str())
            .join(&self.components_path)
            .join(component.as_str())
            .join(format!("{component}.yaml"))
    }
}

fn stays_inside(path: &Path) -> bool {
    use std::path::Component;
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
