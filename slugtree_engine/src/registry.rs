//! Typed read-only lookup of field configurations.

use anyhow::{Context, Result, bail};
use log::info;
use std::path::Path;

use slugtree_data::{FieldConfiguration, RegistryDef, validate_registry};

/// Validated registry of slug field configurations, keyed by
/// (table, field). Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct FieldConfigRegistry {
    def: RegistryDef,
}

impl FieldConfigRegistry {
    /// Wrap an already-validated definition.
    pub fn new(def: RegistryDef) -> Self {
        Self { def }
    }

    /// Load and validate a registry from a TOML file.
    ///
    /// # Errors
    /// Errors bubble up from file IO, deserialization, or validation.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("while reading registry file {}", path.display()))?;
        let def: RegistryDef =
            toml::from_str(&text).context("while parsing registry TOML")?;
        let errors = validate_registry(&def);
        if !errors.is_empty() {
            let details = errors
                .into_iter()
                .map(|err| format!("- {err}"))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("registry validation failed:\n{details}");
        }
        let fields: usize = def.tables.values().map(|t| t.fields.len()).sum();
        info!("field configuration registry loaded with {fields} slug fields");
        Ok(Self { def })
    }

    /// Configuration for one (table, field) pair, if registered.
    pub fn lookup(&self, table: &str, field: &str) -> Option<&FieldConfiguration> {
        self.def.field(table, field)
    }
}
