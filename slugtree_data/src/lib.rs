//! Shared data model for slug field configuration.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_registry};
