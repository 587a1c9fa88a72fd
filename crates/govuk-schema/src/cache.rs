//! # Compiled Validator Cache
//!
//! A component's spec only changes with the frontend version, so a
//! validator compiled once for `(component, version)` can serve every
//! later request for that pair.
//!
//! The cache never holds its lock while the caller's loader runs: two
//! threads missing on the same key may both load and compile, and the
//! first insert wins. Validators are immutable, so either copy is correct.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use govuk_core::{ComponentName, ComponentSpec, FrontendVersion};
use parking_lot::RwLock;

use crate::compile::{CompiledValidator, SchemaCompiler};
use crate::error::SchemaError;

type CacheKey = (ComponentName, FrontendVersion);

/// Thread-safe cache of compiled validators keyed by component and version.
#[derive(Debug, Default)]
pub struct ValidatorCache {
    compiler: SchemaCompiler,
    entries: RwLock<HashMap<CacheKey, Arc<CompiledValidator>>>,
}

impl ValidatorCache {
    /// An empty cache compiling with the default override table.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache compiling with a custom compiler.
    pub fn with_compiler(compiler: SchemaCompiler) -> Self {
        Self {
            compiler,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a cached validator without compiling.
    pub fn get(
        &self,
        component: &ComponentName,
        version: &FrontendVersion,
    ) -> Option<Arc<CompiledValidator>> {
        self.entries
            .read()
            .get(&(component.clone(), version.clone()))
            .cloned()
    }

    /// Return the cached validator, or load the spec, compile and cache it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SpecLoad` if `load` fails. Nothing is cached
    /// in that case.
    pub fn get_or_compile<F, E>(
        &self,
        component: &ComponentName,
        version: &FrontendVersion,
        load: F,
    ) -> Result<Arc<CompiledValidator>, SchemaError>
    where
        F: FnOnce() -> Result<ComponentSpec, E>,
        E: Display,
    {
        if let Some(hit) = self.get(component, version) {
            tracing::trace!(%component, %version, "validator cache hit");
            return Ok(hit);
        }

        let spec = load().map_err(|e| SchemaError::SpecLoad {
            component: component.clone(),
            version: version.clone(),
            reason: e.to_string(),
        })?;
        let compiled = Arc::new(self.compiler.compile(component.as_str(), &spec));
        tracing::debug!(
            %component,
            %version,
            fields = compiled.params().fields.len(),
            "compiled component validator"
        );

        let mut entries = self.entries.write();
        let entry = entries
            .entry((component.clone(), version.clone()))
            .or_insert(compiled);
        Ok(Arc::clone(entry))
    }

    /// Number of cached validators.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached validator.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
