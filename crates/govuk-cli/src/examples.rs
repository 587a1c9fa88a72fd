//! # Examples Subcommand
//!
//! Validates every example embedded in a component spec against the
//! validator compiled from the same spec. Upstream examples are real
//! render calls, so a failing example means either the spec or an override
//! is wrong.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use govuk_core::ComponentSpec;
use govuk_schema::{SchemaCompiler, ValidationIssues};

use crate::source::SpecArgs;

/// Arguments for the `govuk-components examples` subcommand.
#[derive(Args, Debug)]
pub struct ExamplesArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Also validate examples marked `hidden`.
    #[arg(long)]
    pub include_hidden: bool,
}

/// Outcome of validating a spec's examples.
#[derive(Debug, Default)]
pub struct ExampleReport {
    /// Examples validated.
    pub total: usize,
    /// Examples that passed.
    pub passed: usize,
    /// Names and issues of failing examples.
    pub failures: Vec<(String, ValidationIssues)>,
}

/// Execute the examples subcommand.
///
/// Returns exit code: 0 when every example passes, 1 otherwise.
pub fn run_examples(args: &ExamplesArgs, out: &mut dyn Write) -> Result<u8> {
    let loaded = args.spec.load()?;
    let report = validate_examples(loaded.component.as_str(), &loaded.spec, args.include_hidden);

    writeln!(
        out,
        "Examples: {}/{} passed ({})",
        report.passed,
        report.total,
        loaded.path.display()
    )?;
    for (name, issues) in &report.failures {
        writeln!(out, "  FAIL: {name}")?;
        for issue in issues {
            writeln!(out, "  {issue}")?;
        }
    }

    Ok(if report.failures.is_empty() { 0 } else { 1 })
}

/// Validate each example's `data` as the `params` of a request body.
pub fn validate_examples(
    component: &str,
    spec: &ComponentSpec,
    include_hidden: bool,
) -> ExampleReport {
    let validator = SchemaCompiler::new().compile(component, spec);
    let mut report = ExampleReport::default();

    for example in spec.examples.iter().filter(|e| include_hidden || !e.hidden) {
        report.total += 1;
        match validator.validate(json!({ "params": example.data })) {
            Ok(_) => report.passed += 1,
            Err(issues) => {
                tracing::debug!(component, example = %example.name, "example rejected");
                report.failures.push((example.name.clone(), issues));
            }
        }
    }

    report
}
