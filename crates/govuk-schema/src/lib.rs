//! # govuk-schema: Component Parameter Schema Compiler
//!
//! Turns a component's declarative parameter spec into a validator for
//! request bodies of the shape `{ "params": { ... } }`.
//!
//! ## Pipeline
//!
//! ```text
//! ComponentSpec ──normalize──▶ nested params ──SchemaCompiler──▶ CompiledValidator
//!                                                                     │
//!                              request body ──validate────────────────┘
//!                                                  │
//!                            ValidatedParams ◀─────┴─────▶ ValidationIssues
//! ```
//!
//! - [`normalize`] regroups dotted names (`hint.text`) into nested objects.
//! - [`SchemaCompiler`] builds a data-valued validator tree, consulting the
//!   [`OverrideTable`] for corrections to the upstream specs.
//! - [`CompiledValidator::validate`] checks a body exhaustively and returns
//!   either the untouched `params` object or every issue found.
//! - [`ValidatorCache`] shares compiled validators per component and version.
//!
//! ## Crate Policy
//!
//! - No I/O. Specs arrive decoded; loaders are supplied by callers.
//! - Values are verified, never coerced.
//! - Normalization and compilation are total.

pub mod cache;
pub mod compile;
pub mod error;
pub mod issue;
pub mod normalize;
pub mod overrides;
pub mod validate;

pub use cache::ValidatorCache;
pub use compile::{
    compile_component, ArrayNode, CompiledValidator, Field, LeafKind, Node, ObjectNode,
    SchemaCompiler,
};
pub use error::SchemaError;
pub use issue::{Issue, IssueKind, PathSegment, ValidationIssues};
pub use normalize::normalize;
pub use overrides::{FieldOverride, FieldTransform, OverrideTable, OPTIONAL_SUFFIXES};
pub use validate::{ValidatedParams, MAX_SAFE_INTEGER};
