//! Permission-boundary reporting and manual-edit truncation.

use crate::candidate::SlugCandidate;
use crate::record::{LanguageId, PageId, ROOT};
use crate::store::PageStore;

/// How much of the page tree the caller may see.
///
/// Computed by the permission collaborator and passed in; this module
/// never derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionBoundary {
    /// Caller sees the whole tree.
    Unrestricted,
    /// Caller sees nothing above `ancestor`.
    RestrictedTo { ancestor: PageId },
}

impl PermissionBoundary {
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

/// Permission facts about the caller, supplied per request by the
/// permission collaborator.
///
/// The two fields are independent: an editor may lack full permission yet
/// have no restricting ancestor (nothing above them is hidden).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerAccess {
    /// Caller holds full permission on the permission-sensitive table.
    pub full_permission: bool,
    /// Topmost visible ancestor, when the caller's view is clipped.
    pub boundary: PermissionBoundary,
}

impl CallerAccess {
    pub fn full() -> Self {
        Self {
            full_permission: true,
            boundary: PermissionBoundary::Unrestricted,
        }
    }

    pub fn restricted_to(ancestor: PageId) -> Self {
        Self {
            full_permission: false,
            boundary: PermissionBoundary::RestrictedTo { ancestor },
        }
    }
}

/// Report the leading path the caller cannot see.
///
/// Unrestricted callers get `None`. Restricted callers get the stored slug
/// of their topmost visible ancestor's container; for an ancestor at the
/// top of the tree that is the bare root `/`.
pub fn describe_boundary(
    store: &dyn PageStore,
    boundary: PermissionBoundary,
    language: LanguageId,
) -> Option<SlugCandidate> {
    match boundary {
        PermissionBoundary::Unrestricted => None,
        PermissionBoundary::RestrictedTo { ancestor } => {
            let container = store.parent_of(ancestor).unwrap_or(ROOT);
            Some(
                store
                    .page_slug(container, language)
                    .unwrap_or_else(SlugCandidate::root),
            )
        },
    }
}

/// Rewrite a manual proposal under the last-segment-only policy.
///
/// Keeps the prefix an unrestricted generation would produce and replaces
/// only the final segment with the caller's sanitized input, flattening
/// any separators inside it so no extra path levels can be injected.
pub fn restrict_to_last_segment(
    manual: &SlugCandidate,
    generated: &SlugCandidate,
) -> SlugCandidate {
    generated.parent().join(&manual.flattened())
}
