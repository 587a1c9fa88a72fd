//! # govuk-cli: Component Schema Command-Line Interface
//!
//! Provides the `govuk-components` binary. This crate is the filesystem
//! side of the workspace: it finds component specs in a GOV.UK Frontend
//! checkout, reads request bodies, and hands both to `govuk-schema`.
//!
//! ## Subcommands
//!
//! - `govuk-components check`: validate a request body against a component.
//! - `govuk-components schema`: print the compiled validator tree.
//! - `govuk-components normalize`: print the normalized parameter list.
//! - `govuk-components examples`: validate a spec's embedded examples.
//!
//! ## Exit Codes
//!
//! `0` success, `1` validation failure, `2` operational error.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; compilation and validation live in
//!   `govuk-schema`.
//! - Every handler writes to a caller-supplied writer so output is testable.

pub mod check;
pub mod config;
pub mod examples;
pub mod inspect;
pub mod source;
