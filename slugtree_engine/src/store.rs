//! Page store abstraction and the in-memory implementation.
//!
//! The engine only ever asks four questions of the surrounding record
//! store: a page's stored slug, a page's container, and whether a slug is
//! already taken site-wide or among siblings. Persistence, locking, and
//! transactional guarantees stay on the store's side of this trait.

use crate::candidate::SlugCandidate;
use crate::record::{LanguageId, PageId, ROOT, RecordState};

/// Read-only queries against the external record store.
pub trait PageStore {
    /// Stored slug of a page in the given language, if the page exists.
    fn page_slug(&self, page: PageId, language: LanguageId) -> Option<SlugCandidate>;

    /// Container of a page, if the page exists. Top-level pages report
    /// [`ROOT`].
    fn parent_of(&self, page: PageId) -> Option<PageId>;

    /// True when any record other than `state`'s own holds `candidate`
    /// anywhere in the site (same language).
    fn slug_taken_in_site(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool;

    /// True when a sibling under `state.container` holds `candidate`.
    fn slug_taken_in_parent(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool;
}

/// One stored page row.
#[derive(Debug, Clone)]
pub struct PageRow {
    pub id: PageId,
    pub parent: PageId,
    pub slug: SlugCandidate,
    pub language: LanguageId,
}

/// Simple scan-based store used by the demo binary and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<PageRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<PageRow>) -> Self {
        Self { rows }
    }

    pub fn insert(&mut self, row: PageRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PageStore for MemoryStore {
    fn page_slug(&self, page: PageId, language: LanguageId) -> Option<SlugCandidate> {
        if page == ROOT {
            return Some(SlugCandidate::root());
        }
        self.rows
            .iter()
            .find(|row| row.id == page && row.language == language)
            .map(|row| row.slug.clone())
    }

    fn parent_of(&self, page: PageId) -> Option<PageId> {
        self.rows.iter().find(|row| row.id == page).map(|row| row.parent)
    }

    fn slug_taken_in_site(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool {
        self.rows.iter().any(|row| {
            row.slug == *candidate && row.language == state.language && !state.is_self(row.id)
        })
    }

    fn slug_taken_in_parent(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool {
        self.rows.iter().any(|row| {
            row.parent == state.container
                && row.slug == *candidate
                && row.language == state.language
                && !state.is_self(row.id)
        })
    }
}
