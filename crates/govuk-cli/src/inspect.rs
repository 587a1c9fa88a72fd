//! # Inspection Subcommands
//!
//! `schema` prints the compiled validator tree as JSON. `normalize` prints
//! the parameter list after dotted-name grouping, in the same YAML shape
//! as the input spec.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use govuk_core::ComponentSpec;
use govuk_schema::{normalize, SchemaCompiler};

use crate::source::SpecArgs;

/// Arguments for the `govuk-components schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub spec: SpecArgs,
}

/// Arguments for the `govuk-components normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub spec: SpecArgs,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs, out: &mut dyn Write) -> Result<u8> {
    let loaded = args.spec.load()?;
    write_schema(loaded.component.as_str(), &loaded.spec, out)?;
    Ok(0)
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs, out: &mut dyn Write) -> Result<u8> {
    let loaded = args.spec.load()?;
    write_normalized(&loaded.spec, out)?;
    Ok(0)
}

fn write_schema(component: &str, spec: &ComponentSpec, out: &mut dyn Write) -> Result<()> {
    let validator = SchemaCompiler::new().compile(component, spec);
    writeln!(out, "{}", serde_json::to_string_pretty(&validator)?)?;
    Ok(())
}

fn write_normalized(spec: &ComponentSpec, out: &mut dyn Write) -> Result<()> {
    // Examples are dropped; they are not part of the parameter tree.
    let normalized = ComponentSpec::new(normalize(&spec.params));
    write!(out, "{}", serde_yaml::to_string(&normalized)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::{spec_args, write_button};
    use serde_json::{json, Value};

    const DOTTED: &str = "\
params:
  - name: hint.text
    type: string
  - name: hint.classes
    type: string
  - name: name
    type: string
    required: true
";

    #[test]
    fn schema_reflects_overrides() {
        let spec = ComponentSpec::from_yaml_str(crate::source::tests::BUTTON_YAML).unwrap();
        let mut out = Vec::new();
        write_schema("button", &spec, &mut out).unwrap();
        let tree: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(tree["component"], "button");
        let fields = tree["params"]["fields"].as_array().unwrap();
        let text = fields.iter().find(|f| f["name"] == "text").unwrap();
        assert_eq!(text["required"], json!(false));
    }

    #[test]
    fn normalize_groups_dotted_names() {
        let spec = ComponentSpec::from_yaml_str(DOTTED).unwrap();
        let mut out = Vec::new();
        write_normalized(&spec, &mut out).unwrap();

        let round = ComponentSpec::from_yaml_str(std::str::from_utf8(&out).unwrap()).unwrap();
        let names: Vec<&str> = round.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["hint", "name"]);
        let hint: Vec<&str> = round.params[0].nested().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(hint, ["text", "classes"]);
        assert!(round.params[0].required);
    }

    #[test]
    fn run_schema_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = SchemaArgs {
            spec: spec_args("button", Some(write_button(dir.path()))),
        };
        let mut out = Vec::new();
        assert_eq!(run_schema(&args, &mut out).unwrap(), 0);
        assert!(!out.is_empty());
    }
}
