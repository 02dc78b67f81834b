use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One slug source: an ordered fallback list of record field names.
///
/// The first field in the list holding a non-empty value supplies the text
/// for this source; later entries are only consulted when earlier ones are
/// empty or absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldSource(pub Vec<String>);

impl FieldSource {
    /// Source with a single field name and no fallbacks.
    pub fn single(field: impl Into<String>) -> Self {
        Self(vec![field.into()])
    }
}

/// Uniqueness scope a slug field may demand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum SlugConstraint {
    /// No two records anywhere in the site may share the slug.
    UniqueInSite,
    /// No two sibling records under the same container may share the slug.
    UniqueInParent,
}

/// Immutable generation rules for one (table, field) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldConfiguration {
    /// Record fields feeding the generated slug segment, in order.
    #[serde(default)]
    pub generator_fields: Vec<FieldSource>,
    /// Segment used when every source field is empty.
    #[serde(default = "default_fallback")]
    pub fallback_value: String,
    /// Uniqueness constraints enforced during proposal.
    #[serde(default)]
    pub constraints: BTreeSet<SlugConstraint>,
}

impl FieldConfiguration {
    pub fn requires(&self, constraint: SlugConstraint) -> bool {
        self.constraints.contains(&constraint)
    }
}

impl Default for FieldConfiguration {
    fn default() -> Self {
        Self {
            generator_fields: Vec::new(),
            fallback_value: default_fallback(),
            constraints: BTreeSet::new(),
        }
    }
}

fn default_fallback() -> String {
    "default".to_string()
}

/// All slug fields configured for one table.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TableDef {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfiguration>,
}

/// Top-level registry definition, keyed by table name.
///
/// Deserialized from TOML, e.g.:
///
/// ```toml
/// [tables.pages.fields.slug]
/// generator_fields = [["nav_title", "title"]]
/// constraints = ["unique-in-site"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistryDef {
    #[serde(default)]
    pub tables: BTreeMap<String, TableDef>,
}

impl RegistryDef {
    /// Look up the configuration for one (table, field) pair.
    pub fn field(&self, table: &str, field: &str) -> Option<&FieldConfiguration> {
        self.tables.get(table).and_then(|t| t.fields.get(field))
    }
}
