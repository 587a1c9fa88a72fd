//! Integration tests: compile real-shaped GOV.UK Frontend component specs and
//! validate request bodies against them.
//!
//! The fixtures under `tests/fixtures/` follow the layout of the upstream
//! `<component>.yaml` files, including their inconsistencies: mutually
//! exclusive `text`/`html` pairs both marked required, dotted names, an
//! unrecognized type tag, and the table component's missing array level.

use std::path::PathBuf;

use govuk_core::ComponentSpec;
use govuk_schema::{compile_component, IssueKind, PathSegment};
use serde_json::{json, Value};

fn fixture(component: &str) -> ComponentSpec {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{component}.yaml"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    ComponentSpec::from_yaml_str(&text).expect("fixture should decode")
}

fn keys(segments: &[&str]) -> Vec<PathSegment> {
    segments.iter().map(|s| PathSegment::from(*s)).collect()
}

// ---------------------------------------------------------------------------
// Embedded examples
// ---------------------------------------------------------------------------

#[test]
fn every_fixture_example_validates() {
    for component in ["button", "checkboxes", "table"] {
        let spec = fixture(component);
        let validator = compile_component(component, &spec);
        assert!(!spec.examples.is_empty(), "{component} has no examples");
        for example in &spec.examples {
            let body = json!({ "params": example.data });
            if let Err(issues) = validator.validate(body) {
                panic!("{component} example '{}' failed:\n{issues}", example.name);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// table: rows override
// ---------------------------------------------------------------------------

#[test]
fn table_rows_accept_array_of_arrays() {
    let validator = compile_component("table", &fixture("table"));
    let body = json!({
        "params": {
            "rows": [
                [{ "text": "January" }, { "text": "£85", "format": "numeric" }],
                [{ "html": "<b>February</b>" }, { "text": "£75", "colspan": 2 }]
            ]
        }
    });
    assert!(validator.validate(body).is_ok());
}

#[test]
fn table_rows_reject_flat_array() {
    let validator = compile_component("table", &fixture("table"));
    let body = json!({ "params": { "rows": [{ "text": "January" }, { "text": "£85" }] } });
    let issues = validator.validate(body).unwrap_err();

    assert_eq!(issues.len(), 2);
    for (i, issue) in issues.iter().enumerate() {
        assert_eq!(issue.path, vec!["params".into(), "rows".into(), PathSegment::Index(i)]);
        assert_eq!(
            issue.kind,
            IssueKind::StructuralMismatch { expected: "array", received: "object" }
        );
    }
}

#[test]
fn table_cells_are_type_checked() {
    let validator = compile_component("table", &fixture("table"));
    let body = json!({ "params": { "rows": [[{ "text": "a", "colspan": "2" }]] } });
    let issues = validator.validate(body).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].dotted_path(), "params.rows[0][0].colspan");
}

#[test]
fn table_requires_rows() {
    let validator = compile_component("table", &fixture("table"));
    let issues = validator.validate(json!({ "params": { "caption": "x" } })).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].path, keys(&["params", "rows"]));
    assert_eq!(issues.issues()[0].kind, IssueKind::MissingRequired);
}

// ---------------------------------------------------------------------------
// button: text/html override
// ---------------------------------------------------------------------------

#[test]
fn button_text_and_html_are_both_optional() {
    let validator = compile_component("button", &fixture("button"));
    assert!(validator.validate(json!({ "params": {} })).is_ok());
    assert!(validator.validate(json!({ "params": { "html": "<span>Go</span>" } })).is_ok());
}

#[test]
fn button_scenario_issues_are_exhaustive() {
    let validator = compile_component("button", &fixture("button"));
    let body = json!({
        "params": { "text": 1, "disabled": "yes", "attributes": [], "unknown": { "x": 1 } }
    });
    let issues = validator.validate(body).unwrap_err();
    let paths: Vec<String> = issues.iter().map(|i| i.dotted_path()).collect();
    assert_eq!(paths, ["params.text", "params.disabled", "params.attributes"]);
}

// ---------------------------------------------------------------------------
// checkboxes: dotted names and unknown type tags
// ---------------------------------------------------------------------------

#[test]
fn checkboxes_dotted_names_become_required_objects() {
    let validator = compile_component("checkboxes", &fixture("checkboxes"));

    // `formGroup.classes` groups into a synthetic required `formGroup`.
    let body = json!({ "params": { "name": "n", "items": [] } });
    let issues = validator.validate(body).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].path, keys(&["params", "formGroup"]));
    assert_eq!(issues.issues()[0].kind, IssueKind::MissingRequired);

    let body = json!({ "params": { "name": "n", "items": [], "formGroup": {} } });
    assert!(validator.validate(body).is_ok());
}

#[test]
fn checkbox_items_need_their_synthetic_groups() {
    let validator = compile_component("checkboxes", &fixture("checkboxes"));
    let body = json!({
        "params": {
            "name": "n",
            "formGroup": {},
            "items": [{ "value": "a", "text": "A" }]
        }
    });
    let issues = validator.validate(body).unwrap_err();
    let paths: Vec<String> = issues.iter().map(|i| i.dotted_path()).collect();
    assert_eq!(paths, ["params.items[0].hint", "params.items[0].conditional"]);
}

#[test]
fn checkbox_unknown_type_accepts_anything() {
    let validator = compile_component("checkboxes", &fixture("checkboxes"));
    for html in [json!("<p>x</p>"), json!(12), json!(null), json!({ "a": [] })] {
        let body = json!({
            "params": {
                "name": "n",
                "formGroup": {},
                "items": [{ "value": "a", "hint": {}, "conditional": { "html": html } }]
            }
        });
        assert!(validator.validate(body).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Spec scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_empty_spec() {
    let validator = compile_component(
        "component",
        &ComponentSpec::from_yaml_str("params: []").unwrap(),
    );
    assert!(validator.validate(json!({ "params": {} })).is_ok());
    assert!(validator.validate(json!({})).is_err());

    let issues = validator.validate(json!({ "params": [] })).unwrap_err();
    assert_eq!(issues.issues()[0].path, keys(&["params"]));
    assert_eq!(
        issues.issues()[0].kind,
        IssueKind::StructuralMismatch { expected: "object", received: "array" }
    );
}

#[test]
fn scenario_foo_bar() {
    let validator = compile_component(
        "component",
        &ComponentSpec::from_yaml_str(
            "params:\n  - { name: bar, type: boolean, required: true }\n  - { name: foo, type: string, required: true }\n",
        )
        .unwrap(),
    );
    assert!(validator.validate(json!({ "params": { "foo": "x", "bar": true } })).is_ok());

    let issues = validator
        .validate(json!({ "params": { "foo": 1, "bar": true } }))
        .unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.issues()[0].path, keys(&["params", "foo"]));
    assert!(matches!(issues.issues()[0].kind, IssueKind::StructuralMismatch { .. }));
}

#[test]
fn scenario_dotted_siblings() {
    let validator = compile_component(
        "component",
        &ComponentSpec::from_yaml_str(
            "params:\n  - { name: a.x, type: string }\n  - { name: a.y, type: integer }\n",
        )
        .unwrap(),
    );
    assert!(validator.validate(json!({ "params": { "a": { "x": "s", "y": 2 } } })).is_ok());

    let issues = validator.validate(json!({ "params": {} })).unwrap_err();
    assert_eq!(issues.issues()[0].path, keys(&["params", "a"]));
    assert_eq!(issues.issues()[0].kind, IssueKind::MissingRequired);
}

#[test]
fn issue_list_serializes_for_client_errors() {
    let validator = compile_component("button", &fixture("button"));
    let issues = validator.validate(json!({ "params": { "type": 3 } })).unwrap_err();
    let body: Value = serde_json::to_value(&issues).unwrap();
    assert_eq!(body[0]["path"], json!(["params", "type"]));
    assert_eq!(body[0]["kind"], "structural_mismatch");
    assert_eq!(body[0]["message"], "Expected string, received number");
}
