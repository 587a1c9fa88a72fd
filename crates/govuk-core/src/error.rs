//! # Error Types
//!
//! Errors raised while decoding declarative component specs or
//! constructing identifiers. All errors use `thiserror`.

use thiserror::Error;

/// Top-level error type for `govuk-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The declarative spec text could not be decoded.
    #[error("cannot decode {format} component spec: {reason}")]
    Decode {
        /// Source format, `"yaml"`, `"json"` or `"value"`.
        format: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// An identifier failed validation.
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        /// Which identifier was being constructed.
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
