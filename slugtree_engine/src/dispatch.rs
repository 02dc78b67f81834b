//! Proposal dispatch: bypass check, mode dispatch, uniqueness pass,
//! boundary reporting, and result assembly.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use slugtree_data::SlugConstraint;

use crate::boundary::{CallerAccess, describe_boundary, restrict_to_last_segment};
use crate::candidate::SlugCandidate;
use crate::error::ProposalError;
use crate::generate::{generate, sanitize};
use crate::record::{LanguageId, PageId, RecordId, RecordSnapshot, RecordState};
use crate::registry::FieldConfigRegistry;
use crate::store::PageStore;
use crate::unique::UniquenessResolver;

/// How the caller asked for a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalMode {
    /// New record under its immediate container.
    Auto,
    /// Regenerate under the resolved ancestor scope.
    Recreate,
    /// User-edited slug text.
    Manual,
}

/// Parse the raw mode string.
///
/// An empty/absent mode is a silent automatic check: it generates like
/// `auto` but is the only case where a conflict is reported back
/// (a conflict is only surprising when nobody explicitly asked).
fn parse_mode(raw: &str) -> Result<(ProposalMode, bool), ProposalError> {
    match raw {
        "" => Ok((ProposalMode::Auto, false)),
        "auto" => Ok((ProposalMode::Auto, true)),
        "recreate" => Ok((ProposalMode::Recreate, true)),
        "manual" => Ok((ProposalMode::Manual, true)),
        other => Err(ProposalError::InvalidMode(other.to_string())),
    }
}

/// One slug suggestion request, field names matching the wire protocol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    pub table_name: String,
    pub field_name: String,
    #[serde(default)]
    pub mode: String,
    /// Current field values; `values.manual` carries raw user-edited text
    /// when mode is `manual`.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    pub page_id: PageId,
    #[serde(default)]
    pub parent_page_id: PageId,
    #[serde(default)]
    pub record_id: u64,
    #[serde(default)]
    pub language: LanguageId,
}

/// Result payload of one proposal, serialized flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResult {
    pub has_conflicts: bool,
    /// Echo of the raw manual input, empty when none was supplied.
    pub manual: String,
    pub proposal: SlugCandidate,
    pub inaccessible_segments: Option<SlugCandidate>,
    pub last_segment_only: bool,
}

/// Outcome of the dispatch: either this engine produced a proposal, or the
/// bypass check decided the caller's default generation path should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Legacy,
    Proposal(ProposalResult),
}

/// Process-wide engine configuration, passed explicitly per dispatcher.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Restrict manual edits to the final path segment.
    pub last_segment_only: bool,
    /// The permission-sensitive table this engine guards.
    pub permission_table: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            last_segment_only: false,
            permission_table: "pages".to_string(),
        }
    }
}

/// Orchestrates one proposal per call; holds no per-request state.
pub struct ProposalDispatcher<'a> {
    store: &'a dyn PageStore,
    registry: &'a FieldConfigRegistry,
    config: EngineConfig,
}

impl<'a> ProposalDispatcher<'a> {
    pub fn new(
        store: &'a dyn PageStore,
        registry: &'a FieldConfigRegistry,
        config: EngineConfig,
    ) -> Self {
        Self { store, registry, config }
    }

    /// Produce a slug suggestion for one request.
    ///
    /// # Errors
    /// [`ProposalError::ConfigurationMissing`] when no field configuration
    /// is registered for the request's (table, field);
    /// [`ProposalError::InvalidMode`] for an unknown mode string.
    pub fn suggest(
        &self,
        request: &ProposalRequest,
        access: CallerAccess,
    ) -> Result<Suggestion, ProposalError> {
        // Bypass first: only the permission-sensitive table with a caller
        // lacking full permission goes through this engine.
        if request.table_name != self.config.permission_table || access.full_permission {
            debug!(
                "bypassing engine for table '{}' (full permission: {})",
                request.table_name, access.full_permission
            );
            return Ok(Suggestion::Legacy);
        }

        let field_config = self
            .registry
            .lookup(&request.table_name, &request.field_name)
            .ok_or_else(|| ProposalError::ConfigurationMissing {
                table: request.table_name.clone(),
                field: request.field_name.clone(),
            })?;

        let (mode, explicit) = parse_mode(&request.mode)?;
        let snapshot =
            RecordSnapshot::new(request.values.clone(), request.page_id, request.language);
        let manual_input = snapshot.manual().to_string();

        let mut proposal = match mode {
            ProposalMode::Auto => generate(self.store, field_config, &snapshot, request.page_id),
            ProposalMode::Recreate => {
                generate(self.store, field_config, &snapshot, request.parent_page_id)
            },
            ProposalMode::Manual => {
                let manual = sanitize(&manual_input);
                if self.config.last_segment_only {
                    let generated =
                        generate(self.store, field_config, &snapshot, request.parent_page_id);
                    restrict_to_last_segment(&manual, &generated)
                } else {
                    manual
                }
            },
        };

        let state = RecordState::for_record(
            &request.table_name,
            &snapshot,
            RecordId::from_raw(request.record_id),
        );
        let resolver = UniquenessResolver::new(self.store);
        let mut has_conflict = false;
        if field_config.requires(SlugConstraint::UniqueInSite)
            && !resolver.is_unique_in_site(&proposal, &state)
        {
            has_conflict = true;
            proposal = resolver.resolve_site_conflict(&proposal, &state);
        }
        if field_config.requires(SlugConstraint::UniqueInParent)
            && !resolver.is_unique_in_parent(&proposal, &state)
        {
            has_conflict = true;
            proposal = resolver.resolve_parent_conflict(&proposal, &state);
        }

        let inaccessible = describe_boundary(self.store, access.boundary, request.language);

        Ok(Suggestion::Proposal(ProposalResult {
            has_conflicts: !explicit && has_conflict,
            manual: manual_input,
            proposal,
            inaccessible_segments: inaccessible,
            last_segment_only: self.config.last_segment_only,
        }))
    }
}
