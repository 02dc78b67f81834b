//! Fatal proposal errors.
//!
//! Everything else the engine encounters (no collision, no restriction,
//! empty manual input) is normal control flow, not an error.

use thiserror::Error;

/// Non-recoverable failures of one proposal call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProposalError {
    /// No field configuration registered for the requested pair. Indicates
    /// a caller/schema mismatch, not transient state.
    #[error("no valid field configuration for table '{table}' field '{field}' found")]
    ConfigurationMissing { table: String, field: String },

    /// The request carried a mode string outside the known set.
    #[error("mode must be either \"auto\", \"recreate\" or \"manual\", got '{0}'")]
    InvalidMode(String),
}
