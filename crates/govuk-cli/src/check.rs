//! # Check Subcommand
//!
//! Validates a request body against a component's compiled validator.
//! The body is read from a file or stdin and must be a JSON object with a
//! `params` member, the same envelope a rendering service receives.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use govuk_schema::SchemaCompiler;

use crate::source::SpecArgs;

/// Arguments for the `govuk-components check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// JSON request body to validate. Reads stdin when omitted or `-`.
    #[arg(value_name = "BODY")]
    pub body: Option<PathBuf>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the body is valid, 1 when it is not.
pub fn run_check(args: &CheckArgs, out: &mut dyn Write) -> Result<u8> {
    let loaded = args.spec.load()?;
    let body = read_body(args.body.as_deref())?;
    check_body(loaded.component.as_str(), &loaded.spec, body, args.json, out)
}

pub(crate) fn check_body(
    component: &str,
    spec: &govuk_core::ComponentSpec,
    body: Value,
    json: bool,
    out: &mut dyn Write,
) -> Result<u8> {
    let validator = SchemaCompiler::new().compile(component, spec);

    match validator.validate(body) {
        Ok(params) => {
            if json {
                let report = serde_json::json!({ "valid": true, "params": params });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "OK: {component}")?;
            }
            Ok(0)
        }
        Err(issues) => {
            tracing::info!(component, issues = issues.len(), "request body rejected");
            if json {
                let report = serde_json::json!({ "valid": false, "issues": issues });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "FAIL: {component} ({} issue(s))", issues.len())?;
                writeln!(out, "{issues}")?;
            }
            Ok(1)
        }
    }
}

fn read_body(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("cannot read request body {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read request body from stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("request body is not valid JSON")
}
