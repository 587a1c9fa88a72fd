//! # Error Types
//!
//! Compilation and validation never fail with an error: the compiler is
//! total and validation reports [`ValidationIssues`](crate::ValidationIssues).
//! The only fallible step this crate drives is asking a caller-supplied
//! loader for a spec, which the [`ValidatorCache`](crate::ValidatorCache)
//! wraps here.

use govuk_core::{ComponentName, FrontendVersion};
use thiserror::Error;

/// Errors surfaced by `govuk-schema`.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The caller's spec loader failed.
    #[error("cannot load spec for component '{component}' at version '{version}': {reason}")]
    SpecLoad {
        /// Component whose spec was requested.
        component: ComponentName,
        /// Frontend version requested.
        version: FrontendVersion,
        /// Loader error message.
        reason: String,
    },
}
