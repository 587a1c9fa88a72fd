//! # Request Validation
//!
//! Checks a decoded request body against a [`CompiledValidator`].
//!
//! ## Contract
//!
//! - The body must be an object with a `params` key holding an object.
//! - Every declared field is checked. Validation does not stop at the first
//!   failure: all issues in the tree are collected, in declaration order.
//! - Keys nobody declared are ignored on every compiled object node.
//! - Values are verified, never converted. On success the caller receives
//!   the exact `params` object it sent.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::compile::{CompiledValidator, LeafKind, Node, ObjectNode};
use crate::issue::{Issue, PathSegment, ValidationIssues};

/// Largest integer magnitude representable without precision loss in an
/// IEEE-754 double, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// The `params` object of a request body that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedParams(Map<String, Value>);

impl ValidatedParams {
    /// Borrow the validated object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the validated object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Consume into a JSON value, ready for a rendering context.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl CompiledValidator {
    /// Collect every issue in `body`. An empty result means the body is valid.
    pub fn check(&self, body: &Value) -> Vec<Issue> {
        match params_object(body) {
            Ok(params) => self.check_params(params),
            Err(issue) => vec![issue],
        }
    }

    /// Validate a request body, returning its untouched `params` object.
    ///
    /// # Errors
    ///
    /// Returns every issue found when the body does not match.
    pub fn validate(&self, body: Value) -> Result<ValidatedParams, ValidationIssues> {
        let issues = match params_object(&body) {
            Ok(params) => self.check_params(params),
            Err(issue) => vec![issue],
        };
        if !issues.is_empty() {
            tracing::debug!(
                component = %self.component(),
                issues = issues.len(),
                "request body rejected"
            );
            return Err(ValidationIssues::new(issues));
        }
        Ok(ValidatedParams(into_params(body)))
    }

    fn check_params(&self, params: &Map<String, Value>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut path = vec![PathSegment::from("params")];
        check_object(self.params(), params, &mut path, &mut issues);
        issues
    }
}

/// The `params` object of a request envelope, or the issue explaining why
/// there is none.
fn params_object(body: &Value) -> Result<&Map<String, Value>, Issue> {
    let Value::Object(map) = body else {
        return Err(Issue::mismatch(&[], "object", body));
    };
    let path = [PathSegment::from("params")];
    match map.get("params") {
        Some(Value::Object(params)) => Ok(params),
        Some(other) => Err(Issue::mismatch(&path, "object", other)),
        None => Err(Issue::missing(&path, "object")),
    }
}

/// Move the `params` object out of an envelope accepted by [`params_object`].
fn into_params(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(mut map) => match map.remove("params") {
            Some(Value::Object(params)) => params,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

fn check_node(node: &Node, value: &Value, path: &mut Vec<PathSegment>, issues: &mut Vec<Issue>) {
    match (node, value) {
        (Node::Leaf(kind), value) => {
            if !leaf_accepts(*kind, value) {
                issues.push(Issue::mismatch(path, kind.expected(), value));
            }
        }
        (Node::Object(object), Value::Object(map)) => check_object(object, map, path, issues),
        (Node::Array(array), Value::Array(items)) => {
            if let Some(element) = array.element.as_deref() {
                for (i, item) in items.iter().enumerate() {
                    path.push(PathSegment::Index(i));
                    check_node(element, item, path, issues);
                    path.pop();
                }
            }
        }
        (node, value) => issues.push(Issue::mismatch(path, node.expected(), value)),
    }
}

fn check_object(
    object: &ObjectNode,
    map: &Map<String, Value>,
    path: &mut Vec<PathSegment>,
    issues: &mut Vec<Issue>,
) {
    for field in &object.fields {
        path.push(PathSegment::Key(field.name.clone()));
        match map.get(&field.name) {
            Some(value) => check_node(&field.node, value, path, issues),
            None if field.required => issues.push(Issue::missing(path, field.node.expected())),
            None => {}
        }
        path.pop();
    }

    if !object.allow_unknown {
        for key in map.keys().filter(|k| object.field(k).is_none()) {
            path.push(PathSegment::Key(key.clone()));
            issues.push(Issue::unrecognized(path));
            path.pop();
        }
    }
}

fn leaf_accepts(kind: LeafKind, value: &Value) -> bool {
    match kind {
        LeafKind::Boolean => value.is_boolean(),
        LeafKind::String | LeafKind::Block => value.is_string(),
        LeafKind::Integer => matches!(value, Value::Number(n) if is_safe_integer(n)),
        LeafKind::Any => true,
    }
}

fn is_safe_integer(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        return (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i);
    }
    if let Some(u) = n.as_u64() {
        return u <= MAX_SAFE_INTEGER as u64;
    }
    n.as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64)
}
