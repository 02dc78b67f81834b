use std::fmt;

use crate::*;

/// Validation error for a malformed registry definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankTableName,
    BlankFieldName { table: String },
    EmptySourceList { table: String, field: String },
    BlankSourceField { table: String, field: String },
    InvalidFallback { table: String, field: String, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BlankTableName => {
                write!(f, "registry contains a table with a blank name")
            },
            ValidationError::BlankFieldName { table } => {
                write!(f, "table '{table}' contains a field with a blank name")
            },
            ValidationError::EmptySourceList { table, field } => {
                write!(f, "'{table}.{field}' has a generator source with no field names")
            },
            ValidationError::BlankSourceField { table, field } => {
                write!(f, "'{table}.{field}' has a generator source naming a blank field")
            },
            ValidationError::InvalidFallback { table, field, value } => {
                write!(f, "'{table}.{field}' fallback '{value}' is empty or contains a separator")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate basic invariants of a registry definition.
///
/// Field configurations with no generator sources are legal (the fallback
/// value still produces a segment); blank names and separator-bearing
/// fallbacks are not.
pub fn validate_registry(registry: &RegistryDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (table, table_def) in &registry.tables {
        if table.trim().is_empty() {
            errors.push(ValidationError::BlankTableName);
        }
        for (field, config) in &table_def.fields {
            if field.trim().is_empty() {
                errors.push(ValidationError::BlankFieldName { table: table.clone() });
            }
            for source in &config.generator_fields {
                if source.0.is_empty() {
                    errors.push(ValidationError::EmptySourceList {
                        table: table.clone(),
                        field: field.clone(),
                    });
                }
                if source.0.iter().any(|name| name.trim().is_empty()) {
                    errors.push(ValidationError::BlankSourceField {
                        table: table.clone(),
                        field: field.clone(),
                    });
                }
            }
            if config.fallback_value.trim().is_empty() || config.fallback_value.contains('/') {
                errors.push(ValidationError::InvalidFallback {
                    table: table.clone(),
                    field: field.clone(),
                    value: config.fallback_value.clone(),
                });
            }
        }
    }

    errors
}
