//! # Spec Source Resolution
//!
//! Every subcommand starts from the same question: which component, and
//! where is its spec? Either `--spec` names the file directly, or the spec
//! is found through the [`RepositoryLayout`] from a frontend version.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use govuk_core::{ComponentName, ComponentSpec, FrontendVersion};

use crate::config::RepositoryLayout;

/// Arguments shared by every subcommand that loads a component spec.
#[derive(Args, Debug, Clone)]
pub struct SpecArgs {
    /// Component name, e.g. `table` or `character-count`.
    #[arg(long, short = 'c')]
    pub component: String,

    /// Frontend version directory under the root, e.g. `v4.7.0`.
    #[arg(
        long = "frontend-version",
        value_name = "VERSION",
        required_unless_present = "spec"
    )]
    pub frontend_version: Option<String>,

    /// Read the spec from this file instead of resolving it from the layout.
    #[arg(long, value_name = "PATH")]
    pub spec: Option<PathBuf>,

    /// Directory holding frontend checkouts. Overrides GOVUK_FRONTEND_ROOT.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// A component spec read from disk.
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    /// Validated component name.
    pub component: ComponentName,
    /// File the spec was read from.
    pub path: PathBuf,
    /// Decoded spec.
    pub spec: ComponentSpec,
}

impl SpecArgs {
    /// Resolve the spec path using the environment layout.
    pub fn load(&self) -> Result<LoadedSpec> {
        let layout =
            RepositoryLayout::from_env().context("invalid repository layout configuration")?;
        self.load_with(layout)
    }

    /// Resolve the spec path against an explicit layout.
    pub fn load_with(&self, layout: RepositoryLayout) -> Result<LoadedSpec> {
        let (component, path) = self.resolve(layout)?;
        tracing::debug!(%component, path = %path.display(), "loading component spec");
        let spec = read_spec(&path)?;
        Ok(LoadedSpec {
            component,
            path,
            spec,
        })
    }

    fn resolve(&self, layout: RepositoryLayout) -> Result<(ComponentName, PathBuf)> {
        let component = ComponentName::new(self.component.as_str())?;

        if let Some(ref path) = self.spec {
            return Ok((component, path.clone()));
        }

        let version = self
            .frontend_version
            .as_deref()
            .context("either --frontend-version or --spec is required")?;
        let version = FrontendVersion::new(version)?;

        let layout = match self.root {
            Some(ref root) => layout.with_root(root),
            None => layout,
        };
        let path = layout.spec_path(&version, &component);
        Ok((component, path))
    }
}

/// Read and decode a component spec file.
///
/// Files ending in `.json` are decoded as JSON, everything else as YAML.
pub fn read_spec(path: &Path) -> Result<ComponentSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read component spec {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let spec = if is_json {
        ComponentSpec::from_json_str(&text)
    } else {
        ComponentSpec::from_yaml_str(&text)
    };
    spec.with_context(|| format!("invalid component spec {}", path.display()))
}
