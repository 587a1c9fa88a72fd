//! # Dotted-Name Normalization
//!
//! Upstream component specs sometimes flatten nested fields into dotted
//! names at the same level:
//!
//! ```yaml
//! params:
//!   - name: hint.text
//!     type: string
//!   - name: hint.html
//!     type: string
//! ```
//!
//! Templates read these as `params.hint.text`, so before compiling we
//! regroup them under a synthesized `hint` object. Grouping is keyed on the
//! segment before the first `.`, in first-seen order:
//!
//! - a group holding a single undotted entry is passed through;
//! - any other group becomes a required `object` named after the key, whose
//!   params are the members with the key and dot stripped, normalized again.
//!
//! Members whose stripped name is empty or equal to the key are dropped, so
//! a synthesized object never contains itself. Normalization is total and
//! idempotent.

use std::collections::HashMap;

use govuk_core::{ParamType, ParameterSpec};

/// Regroup dotted parameter names into nested object parameters.
pub fn normalize(params: &[ParameterSpec]) -> Vec<ParameterSpec> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&ParameterSpec>)> = Vec::new();

    for param in params {
        let key = group_key(&param.name);
        match index.get(key) {
            Some(&i) => groups[i].1.push(param),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![param]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, members)| normalize_group(key, &members))
        .collect()
}

/// The segment before the first dot, or the whole name when that segment
/// is empty or there is no dot.
fn group_key(name: &str) -> &str {
    match name.split_once('.') {
        Some((prefix, _)) if !prefix.is_empty() => prefix,
        _ => name,
    }
}

fn normalize_group(key: &str, members: &[&ParameterSpec]) -> ParameterSpec {
    if let [single] = members {
        if single.name == key {
            return normalize_entry(single);
        }
    }

    let stripped: Vec<ParameterSpec> = members
        .iter()
        .filter_map(|member| {
            let rest = member.name.strip_prefix(key)?.strip_prefix('.')?;
            if rest.is_empty() || rest == key {
                return None;
            }
            Some(ParameterSpec {
                name: rest.to_string(),
                ..(*member).clone()
            })
        })
        .collect();

    tracing::debug!(
        group = key,
        members = members.len(),
        kept = stripped.len(),
        "synthesized object parameter from dotted names"
    );

    ParameterSpec {
        name: key.to_string(),
        param_type: ParamType::Object,
        required: true,
        description: None,
        params: Some(normalize(&stripped)),
    }
}

fn normalize_entry(param: &ParameterSpec) -> ParameterSpec {
    ParameterSpec {
        params: param.params.as_deref().map(normalize),
        ..param.clone()
    }
}
