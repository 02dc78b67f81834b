#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const SLUGTREE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod boundary;
pub mod candidate;
pub mod dispatch;
pub mod error;
pub mod generate;
pub mod loader;
pub mod record;
pub mod registry;
pub mod store;
pub mod unique;

// Re-exports for convenience
pub use boundary::{CallerAccess, PermissionBoundary};
pub use candidate::SlugCandidate;
pub use dispatch::{EngineConfig, ProposalDispatcher, ProposalRequest, ProposalResult, Suggestion};
pub use error::ProposalError;
pub use record::{LanguageId, PageId, RecordId, RecordSnapshot, RecordState};
pub use registry::FieldConfigRegistry;
pub use store::{MemoryStore, PageRow, PageStore};
