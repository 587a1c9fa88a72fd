//! # Declarative-Source Overrides
//!
//! The upstream component specs are not fully consistent with the
//! templates that consume them. The corrections applied by the compiler
//! live here, in one table, so they can be audited, extended or retired
//! without touching the generic compilation logic.
//!
//! ## Optional name suffixes
//!
//! Components accept mutually exclusive `text`/`html` pairs (`text` or
//! `html`, `hintText` or `hintHtml`) and the specs mark both members
//! `required: true`. Any field whose name ends in one of
//! [`OPTIONAL_SUFFIXES`] (ASCII case-insensitive) is compiled as optional.
//!
//! ## Field transforms
//!
//! | Component | Field | Transform | Reason |
//! |-----------|-------|-----------|--------|
//! | `table` | `rows` | [`FieldTransform::ArrayOfRows`] | spec omits one array level |

use serde::Serialize;

/// Name suffixes that make a field optional regardless of its declared flag.
pub const OPTIONAL_SUFFIXES: &[&str] = &["text", "html"];

/// A structural correction applied to one field of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTransform {
    /// Compile the field as an array of arrays whose innermost elements
    /// match the field's nested params. Only applies when nested params
    /// are declared.
    ArrayOfRows,
}

/// One row of the field override table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOverride {
    /// Component the override is scoped to.
    pub component: String,
    /// Field name, matched at any nesting depth within the component.
    pub field: String,
    /// Correction to apply.
    pub transform: FieldTransform,
    /// Why the correction exists.
    pub reason: String,
}

/// Built-in field overrides for the GOV.UK Frontend component specs.
const GOVUK_FIELD_OVERRIDES: &[(&str, &str, FieldTransform, &str)] = &[(
    "table",
    "rows",
    FieldTransform::ArrayOfRows,
    "rows is an array of rows, each an array of cells; the spec declares the cell params directly under rows",
)];

/// The complete set of overrides consulted by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideTable {
    optional_suffixes: Vec<String>,
    field_overrides: Vec<FieldOverride>,
}

impl OverrideTable {
    /// A table with no overrides: every field honors its declared flag and
    /// shape.
    pub fn empty() -> Self {
        Self {
            optional_suffixes: Vec::new(),
            field_overrides: Vec::new(),
        }
    }

    /// The corrections needed by the published GOV.UK Frontend specs.
    pub fn govuk_frontend() -> Self {
        Self {
            optional_suffixes: OPTIONAL_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            field_overrides: GOVUK_FIELD_OVERRIDES
                .iter()
                .map(|(component, field, transform, reason)| FieldOverride {
                    component: component.to_string(),
                    field: field.to_string(),
                    transform: *transform,
                    reason: reason.to_string(),
                })
                .collect(),
        }
    }

    /// Add a name suffix that makes matching fields optional.
    pub fn with_optional_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.optional_suffixes.push(suffix.into().to_ascii_lowercase());
        self
    }

    /// Add a field transform. A later row for the same (component, field)
    /// takes precedence.
    pub fn with_field_override(mut self, row: FieldOverride) -> Self {
        self.field_overrides.push(row);
        self
    }

    /// Configured optional suffixes, lowercase.
    pub fn optional_suffixes(&self) -> &[String] {
        &self.optional_suffixes
    }

    /// Configured field transforms in insertion order.
    pub fn field_overrides(&self) -> &[FieldOverride] {
        &self.field_overrides
    }

    /// Whether a field is forced optional by its name.
    pub fn forces_optional(&self, field: &str) -> bool {
        let lower = field.to_ascii_lowercase();
        self.optional_suffixes
            .iter()
            .any(|suffix| lower.ends_with(suffix.as_str()))
    }

    /// The transform registered for a field of a component, if any.
    pub fn transform_for(&self, component: &str, field: &str) -> Option<FieldTransform> {
        self.field_overrides
            .iter()
            .rev()
            .find(|row| row.component == component && row.field == field)
            .map(|row| row.transform)
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::govuk_frontend()
    }
}
