//! # Schema Compilation
//!
//! Turns a component's declarative parameter list into a [`CompiledValidator`]:
//! a plain data tree that mirrors the spec and can be inspected, compared
//! and serialized independently of validation.
//!
//! ## Compilation Rules
//!
//! | Declared type | Node |
//! |---|---|
//! | `boolean` | `Leaf(Boolean)` |
//! | `string` | `Leaf(String)` |
//! | `integer` | `Leaf(Integer)`, whole numbers within ±(2^53 − 1) |
//! | `nunjucks-block` | `Leaf(Block)`, any string |
//! | `object` | `Object` with compiled nested fields (none = open) |
//! | `array` | `Array` of compiled nested `Object` (none = any element) |
//! | anything else | `Leaf(Any)` |
//!
//! Every compiled object node has `allow_unknown: true`: declared fields
//! are checked, extra keys are ignored.
//!
//! Requiredness and structural corrections come from the
//! [`OverrideTable`]. Compilation never fails.

use govuk_core::{ComponentSpec, ParamType, ParameterSpec};
use serde::Serialize;

use crate::normalize::normalize;
use crate::overrides::{FieldTransform, OverrideTable};

// ---------------------------------------------------------------------------
// Validator tree
// ---------------------------------------------------------------------------

/// Scalar acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafKind {
    /// Exactly `true` or `false`.
    Boolean,
    /// Any string.
    String,
    /// A finite whole number representable without precision loss.
    Integer,
    /// A markup fragment, carried as a string.
    Block,
    /// Any value at all.
    Any,
}

impl LeafKind {
    /// Name of the accepted type, as it appears in issue messages.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String | Self::Block => "string",
            Self::Integer => "integer",
            Self::Any => "any",
        }
    }
}

/// One node of a compiled validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// A scalar check.
    Leaf(LeafKind),
    /// An object with declared fields.
    Object(ObjectNode),
    /// An array, optionally constraining its elements.
    Array(ArrayNode),
}

impl Node {
    /// Name of the accepted type, as it appears in issue messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Leaf(kind) => kind.expected(),
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }
}

/// A declared field of an object node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Key the field is read from.
    pub name: String,
    /// Whether absence of the key is an issue.
    pub required: bool,
    /// Check applied to the value when present.
    pub node: Node,
}

/// An object check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectNode {
    /// Declared fields, in declaration order.
    pub fields: Vec<Field>,
    /// Whether keys with no declared field are accepted.
    pub allow_unknown: bool,
}

impl ObjectNode {
    /// An object accepting any keys and checking none.
    pub fn open() -> Self {
        Self {
            fields: Vec::new(),
            allow_unknown: true,
        }
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Add a field, replacing any earlier field of the same name in place.
    fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }
}

/// An array check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayNode {
    /// Check applied to every element, or `None` for unconstrained elements.
    pub element: Option<Box<Node>>,
}

impl ArrayNode {
    /// An array accepting elements of any shape.
    pub fn open() -> Self {
        Self { element: None }
    }

    /// An array whose elements must each satisfy `element`.
    pub fn of(element: Node) -> Self {
        Self {
            element: Some(Box::new(element)),
        }
    }
}

/// Validator for one component's request body, `{ "params": { ... } }`.
///
/// The envelope is fixed: the body must be an object holding a `params`
/// object, other top-level keys are ignored. Only the `params` node is
/// derived from the component spec.
///
/// Immutable once built and `Send + Sync`, so it can be shared between
/// requests for the same component and version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledValidator {
    component: String,
    params: ObjectNode,
}

impl CompiledValidator {
    /// Component the validator was compiled for.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// The compiled `params` object node.
    pub fn params(&self) -> &ObjectNode {
        &self.params
    }
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

/// Builds [`CompiledValidator`]s, consulting an [`OverrideTable`].
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    overrides: OverrideTable,
}

impl SchemaCompiler {
    /// A compiler using the GOV.UK Frontend override table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler using a custom override table.
    pub fn with_overrides(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    /// The override table in use.
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Normalize a component spec and compile it.
    pub fn compile(&self, component: &str, spec: &ComponentSpec) -> CompiledValidator {
        self.compile_normalized(component, &normalize(&spec.params))
    }

    /// Compile an already normalized parameter list.
    pub fn compile_normalized(&self, component: &str, params: &[ParameterSpec]) -> CompiledValidator {
        CompiledValidator {
            component: component.to_string(),
            params: self.compile_object(component, params),
        }
    }

    fn compile_object(&self, component: &str, params: &[ParameterSpec]) -> ObjectNode {
        let mut object = ObjectNode::open();
        for param in params {
            object.insert(self.compile_field(component, param));
        }
        object
    }

    fn compile_field(&self, component: &str, param: &ParameterSpec) -> Field {
        let node = match self.overrides.transform_for(component, &param.name) {
            Some(FieldTransform::ArrayOfRows) if !param.nested().is_empty() => {
                tracing::debug!(component, field = %param.name, "compiling field as array of rows");
                let row = Node::Object(self.compile_object(component, param.nested()));
                Node::Array(ArrayNode::of(Node::Array(ArrayNode::of(row))))
            }
            _ => self.compile_type(component, param),
        };

        Field {
            name: param.name.clone(),
            required: param.required && !self.overrides.forces_optional(&param.name),
            node,
        }
    }

    fn compile_type(&self, component: &str, param: &ParameterSpec) -> Node {
        match &param.param_type {
            ParamType::Boolean => Node::Leaf(LeafKind::Boolean),
            ParamType::String => Node::Leaf(LeafKind::String),
            ParamType::Integer => Node::Leaf(LeafKind::Integer),
            ParamType::Block => Node::Leaf(LeafKind::Block),
            ParamType::Object => Node::Object(self.compile_object(component, param.nested())),
            ParamType::Array if param.nested().is_empty() => Node::Array(ArrayNode::open()),
            ParamType::Array => Node::Array(ArrayNode::of(Node::Object(
                self.compile_object(component, param.nested()),
            ))),
            ParamType::Unknown(tag) => {
                tracing::warn!(
                    component,
                    field = %param.name,
                    tag = %tag,
                    "unrecognized parameter type; accepting any value"
                );
                Node::Leaf(LeafKind::Any)
            }
        }
    }
}

/// Normalize and compile a component spec with the default override table.
pub fn compile_component(component: &str, spec: &ComponentSpec) -> CompiledValidator {
    SchemaCompiler::new().compile(component, spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, ty: ParamType) -> ParameterSpec {
        ParameterSpec::new(name, ty)
    }

    #[test]
    fn scalar_types_compile_to_leaves() {
        let spec = ComponentSpec::new(vec![
            p("a", ParamType::Boolean),
            p("b", ParamType::String),
            p("c", ParamType::Integer),
            p("d", ParamType::Block),
            p("e", ParamType::Unknown("date".into())),
        ]);
        let compiled = compile_component("x", &spec);
        let kinds: Vec<_> = compiled
            .params()
            .fields
            .iter()
            .map(|f| f.node.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                Node::Leaf(LeafKind::Boolean),
                Node::Leaf(LeafKind::String),
                Node::Leaf(LeafKind::Integer),
                Node::Leaf(LeafKind::Block),
                Node::Leaf(LeafKind::Any),
            ]
        );
    }

    #[test]
    fn empty_spec_compiles_to_open_params() {
        let compiled = compile_component("button", &ComponentSpec::default());
        assert_eq!(compiled.component(), "button");
        assert!(compiled.params().fields.is_empty());
        assert!(compiled.params().allow_unknown);
    }

    #[test]
    fn containers_without_nested_params_are_open() {
        let spec = ComponentSpec::new(vec![
            p("attributes", ParamType::Object),
            p("items", ParamType::Array),
            p("empty", ParamType::Array).with_params(vec![]),
        ]);
        let compiled = compile_component("x", &spec);
        let params = compiled.params();
        assert_eq!(params.fields[0].node, Node::Object(ObjectNode::open()));
        assert_eq!(params.fields[1].node, Node::Array(ArrayNode::open()));
        assert_eq!(params.fields[2].node, Node::Array(ArrayNode::open()));
    }

    #[test]
    fn array_elements_compile_to_permissive_objects() {
        let spec = ComponentSpec::new(vec![p("items", ParamType::Array)
            .required(true)
            .with_params(vec![p("href", ParamType::String).required(true)])]);
        let compiled = compile_component("x", &spec);
        let Node::Array(items) = &compiled.params().fields[0].node else {
            panic!("expected array node");
        };
        let Some(element) = items.element.as_deref() else {
            panic!("expected element node");
        };
        let Node::Object(obj) = element else {
            panic!("expected object element");
        };
        assert!(obj.allow_unknown);
        assert!(obj.field("href").is_some_and(|f| f.required));
    }

    #[test]
    fn text_and_html_fields_are_optional() {
        let spec = ComponentSpec::new(vec![
            p("text", ParamType::String).required(true),
            p("html", ParamType::String).required(true),
            p("titleText", ParamType::String).required(true),
            p("id", ParamType::String).required(true),
        ]);
        let compiled = compile_component("x", &spec);
        let required: Vec<bool> = compiled.params().fields.iter().map(|f| f.required).collect();
        assert_eq!(required, vec![false, false, false, true]);
    }

    #[test]
    fn table_rows_compile_to_array_of_rows() {
        let rows = p("rows", ParamType::Array)
            .required(true)
            .with_params(vec![p("text", ParamType::String)]);
        let spec = ComponentSpec::new(vec![rows.clone()]);

        let table = compile_component("table", &spec);
        let field = &table.params().fields[0];
        assert!(field.required);
        let Node::Array(outer) = &field.node else { panic!("expected array") };
        let Some(Node::Array(inner)) = outer.element.as_deref() else {
            panic!("expected nested array");
        };
        assert!(matches!(inner.element.as_deref(), Some(Node::Object(_))));

        // Same field on another component is compiled generically.
        let other = compile_component("summary-list", &spec);
        let Node::Array(outer) = &other.params().fields[0].node else { panic!() };
        assert!(matches!(outer.element.as_deref(), Some(Node::Object(_))));
    }

    #[test]
    fn table_rows_without_nested_params_are_generic() {
        let spec = ComponentSpec::new(vec![p("rows", ParamType::Array)]);
        let compiled = compile_component("table", &spec);
        assert_eq!(compiled.params().fields[0].node, Node::Array(ArrayNode::open()));
    }

    #[test]
    fn empty_override_table_honors_declared_flags() {
        let spec = ComponentSpec::new(vec![
            p("text", ParamType::String).required(true),
            p("rows", ParamType::Array).with_params(vec![p("text", ParamType::String)]),
        ]);
        let compiled = SchemaCompiler::with_overrides(OverrideTable::empty()).compile("table", &spec);
        let params = compiled.params();
        assert!(params.fields[0].required);
        let Node::Array(rows) = &params.fields[1].node else { panic!() };
        assert!(matches!(rows.element.as_deref(), Some(Node::Object(_))));
    }

    #[test]
    fn compile_normalizes_dotted_names() {
        let spec = ComponentSpec::new(vec![
            p("hint.text", ParamType::String),
            p("hint.classes", ParamType::String),
        ]);
        let compiled = compile_component("x", &spec);
        let hint = compiled.params().field("hint").unwrap();
        assert!(hint.required);
        let Node::Object(obj) = &hint.node else { panic!() };
        assert!(obj.field("text").is_some());
        assert!(obj.field("classes").is_some());
    }

    #[test]
    fn duplicate_names_keep_the_last_definition() {
        let params = vec![p("a", ParamType::String), p("a", ParamType::Boolean)];
        let compiled = SchemaCompiler::new().compile_normalized("x", &params);
        assert_eq!(compiled.params().fields.len(), 1);
        assert_eq!(compiled.params().fields[0].node, Node::Leaf(LeafKind::Boolean));
    }

    #[test]
    fn duplicate_names_through_compile_become_an_open_object() {
        let spec = ComponentSpec::new(vec![
            p("a", ParamType::String),
            p("b", ParamType::Integer),
            p("a", ParamType::Boolean),
        ]);
        let compiled = compile_component("x", &spec);
        let names: Vec<&str> = compiled.params().fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        let a = &compiled.params().fields[0];
        assert!(a.required);
        assert_eq!(a.node, Node::Object(ObjectNode::open()));
    }

    #[test]
    fn table_rows_keep_their_declared_optional_flag() {
        let rows = p("rows", ParamType::Array)
            .required(false)
            .with_params(vec![p("text", ParamType::String)]);
        let table = compile_component("table", &ComponentSpec::new(vec![rows]));
        let field = &table.params().fields[0];
        assert!(!field.required);
        let Node::Array(outer) = &field.node else { panic!("expected array") };
        assert!(matches!(outer.element.as_deref(), Some(Node::Array(_))));
        assert!(table.validate(serde_json::json!({ "params": {} })).is_ok());
    }

    #[test]
    fn compilation_is_deterministic() {
        let spec = ComponentSpec::new(vec![
            p("a.x", ParamType::String).required(true),
            p("items", ParamType::Array).with_params(vec![p("value", ParamType::Integer)]),
        ]);
        assert_eq!(compile_component("x", &spec), compile_component("x", &spec));
    }

    #[test]
    fn compiled_tree_serializes_for_inspection() {
        let spec = ComponentSpec::new(vec![p("id", ParamType::String).required(true)]);
        let json = serde_json::to_value(compile_component("x", &spec)).unwrap();
        assert_eq!(json["component"], "x");
        let params = &json["params"];
        assert_eq!(params["allow_unknown"], true);
        assert_eq!(params["fields"][0]["node"]["leaf"], "string");
    }

    #[test]
    fn validators_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledValidator>();
    }
}
