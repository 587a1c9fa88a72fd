//! # govuk-core: Foundational Types for the Component Renderer
//!
//! Defines the declarative data model that every other crate in the
//! workspace consumes: the parameter specification published alongside
//! each GOV.UK Frontend component, plus the identifiers used to address a
//! component at a given frontend version.
//!
//! ## Key Design Principles
//!
//! 1. **Closed type tags.** `ParamType` is a single enum matched
//!    exhaustively everywhere. Tags the enum does not know decode to
//!    `ParamType::Unknown` instead of failing.
//!
//! 2. **Newtype identifiers.** `ComponentName` and `FrontendVersion` are
//!    validated at construction, so a value that reaches path resolution
//!    or a cache key can never contain a path separator.
//!
//! 3. **Decode, don't fetch.** Specs are decoded from in-memory YAML/JSON
//!    text or values. Reading them from disk or the network belongs to
//!    callers.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `govuk-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod param;

pub use error::CoreError;
pub use identity::{ComponentName, FrontendVersion};
pub use param::{ComponentExample, ComponentSpec, ParamType, ParameterSpec};
