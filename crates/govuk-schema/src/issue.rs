//! # Validation Issues
//!
//! Structured reports produced when a request body does not match a
//! compiled validator. Every issue carries the path to the offending value,
//! its kind and a human-readable message. A [`ValidationIssues`] list is
//! what a transport layer turns into a client-error response; it
//! serializes to a JSON array.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One step of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// What went wrong at an issue's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// A value is present but has the wrong type or shape.
    StructuralMismatch {
        /// Type the validator accepts.
        expected: &'static str,
        /// Type of the value found.
        received: &'static str,
    },
    /// A required key is absent.
    MissingRequired,
    /// A key is present that a closed object does not declare.
    UnrecognizedKey,
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Keys and indices from the request body root to the value.
    pub path: Vec<PathSegment>,
    /// Failure classification.
    #[serde(flatten)]
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    pub(crate) fn mismatch(path: &[PathSegment], expected: &'static str, value: &Value) -> Self {
        let received = type_name(value);
        let message = match value {
            Value::Number(n) if expected == "integer" => {
                format!("Expected integer, received {n}, which is not a safe whole number")
            }
            _ => format!("Expected {expected}, received {received}"),
        };
        Self {
            path: path.to_vec(),
            kind: IssueKind::StructuralMismatch { expected, received },
            message,
        }
    }

    pub(crate) fn missing(path: &[PathSegment], expected: &'static str) -> Self {
        Self {
            path: path.to_vec(),
            kind: IssueKind::MissingRequired,
            message: format!("Required {expected} is missing"),
        }
    }

    pub(crate) fn unrecognized(path: &[PathSegment]) -> Self {
        Self {
            path: path.to_vec(),
            kind: IssueKind::UnrecognizedKey,
            message: "Unrecognized key".to_string(),
        }
    }

    /// The path rendered as `params.items[0].text`.
    pub fn dotted_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.dotted_path(), self.message)
        }
    }
}

/// JSON type name of a value, as used in issue messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A non-empty, ordered list of issues from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationIssues {
    issues: Vec<Issue>,
}

impl ValidationIssues {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        debug_assert!(!issues.is_empty(), "issue lists are never empty");
        Self { issues }
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always false for lists produced by a validator.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns a slice of all issues, in discovery order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Iterate over the issues.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Issue> {
        self.issues
    }
}

impl<'a> IntoIterator for &'a ValidationIssues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationIssues {}
