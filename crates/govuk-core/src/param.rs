//! # Declarative Parameter Specifications
//!
//! Every frontend component ships a `<name>.yaml` file describing the
//! parameters its template accepts:
//!
//! ```yaml
//! params:
//!   - name: text
//!     type: string
//!     required: true
//!   - name: attributes
//!     type: object
//!     required: false
//! examples:
//!   - name: default
//!     data:
//!       text: Save and continue
//! ```
//!
//! This module decodes that document into [`ComponentSpec`]. Decoding is
//! lenient in the same places the upstream data is: unknown keys are
//! ignored, `required` defaults to `false`, and unrecognized type tags are
//! preserved as [`ParamType::Unknown`] for the compiler to handle.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `object`, optionally with nested params.
    Object,
    /// `array`, optionally with nested params describing each element.
    Array,
    /// `nunjucks-block`: an opaque markup fragment passed as a string.
    Block,
    /// Any tag not listed above, kept verbatim.
    Unknown(String),
}

impl ParamType {
    /// Map a declarative type tag to its variant.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            "nunjucks-block" => Self::Block,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The declarative tag for this variant.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Block => "nunjucks-block",
            Self::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// One declared parameter of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Field name. May be a dotted path (`"hint.text"`) before normalization.
    pub name: String,

    /// Declared type tag.
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Whether the upstream data marks the field as required.
    #[serde(default)]
    pub required: bool,

    /// Free-text description, carried for inspection only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nested parameters of an `object` field, or of each element of an
    /// `array` field. `None` and `Some(vec![])` both mean "open".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ParameterSpec>>,
}

impl ParameterSpec {
    /// An optional parameter with no nested params.
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            description: None,
            params: None,
        }
    }

    /// Set the declared `required` flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach nested params.
    pub fn with_params(mut self, params: Vec<ParameterSpec>) -> Self {
        self.params = Some(params);
        self
    }

    /// Nested params, empty when none are declared.
    pub fn nested(&self) -> &[ParameterSpec] {
        self.params.as_deref().unwrap_or_default()
    }
}

/// An example invocation embedded in a component spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentExample {
    /// Example name, e.g. `"default"`.
    pub name: String,

    /// The `params` object the example renders with.
    #[serde(default)]
    pub data: Value,

    /// Hidden examples exist for test coverage rather than documentation.
    #[serde(default)]
    pub hidden: bool,
}

/// The declarative parameter specification for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Top-level parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParameterSpec>,

    /// Example invocations, if the spec carries any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ComponentExample>,
}

impl ComponentSpec {
    /// A spec with the given params and no examples.
    pub fn new(params: Vec<ParameterSpec>) -> Self {
        Self {
            params,
            examples: Vec::new(),
        }
    }

    /// Decode a spec from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the text is not YAML or does not have
    /// the `{ params: [...] }` shape.
    pub fn from_yaml_str(text: &str) -> Result<Self, CoreError> {
        serde_yaml::from_str(text).map_err(|e| CoreError::Decode {
            format: "yaml",
            reason: e.to_string(),
        })
    }

    /// Decode a spec from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` on malformed JSON or a mismatched shape.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| CoreError::Decode {
            format: "json",
            reason: e.to_string(),
        })
    }

    /// Decode a spec from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the value does not have the spec shape.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        serde_json::from_value(value).map_err(|e| CoreError::Decode {
            format: "value",
            reason: e.to_string(),
        })
    }
}
