//! Uniqueness checks and conflict resolution.
//!
//! Site-scope checks always run before parent-scope checks (the dispatcher
//! enforces that ordering); each resolver disambiguates by counting up a
//! numeric suffix on the final segment until the store reports the slug
//! free. The loop terminates because the store holds finitely many slugs
//! at any instant.

use log::debug;

use crate::candidate::SlugCandidate;
use crate::record::RecordState;
use crate::store::PageStore;

/// Membership queries and disambiguation against one page store.
pub struct UniquenessResolver<'a> {
    store: &'a dyn PageStore,
}

impl<'a> UniquenessResolver<'a> {
    pub fn new(store: &'a dyn PageStore) -> Self {
        Self { store }
    }

    /// True when no other record in the site holds `candidate`.
    pub fn is_unique_in_site(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool {
        !self.store.slug_taken_in_site(candidate, state)
    }

    /// True when no sibling under the record's container holds `candidate`.
    pub fn is_unique_in_parent(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool {
        !self.store.slug_taken_in_parent(candidate, state)
    }

    /// Disambiguate a site-wide collision.
    pub fn resolve_site_conflict(
        &self,
        candidate: &SlugCandidate,
        state: &RecordState<'_>,
    ) -> SlugCandidate {
        self.resolve(candidate, |slug| self.is_unique_in_site(slug, state))
    }

    /// Disambiguate a sibling collision.
    pub fn resolve_parent_conflict(
        &self,
        candidate: &SlugCandidate,
        state: &RecordState<'_>,
    ) -> SlugCandidate {
        self.resolve(candidate, |slug| self.is_unique_in_parent(slug, state))
    }

    fn resolve<F>(&self, candidate: &SlugCandidate, is_free: F) -> SlugCandidate
    where
        F: Fn(&SlugCandidate) -> bool,
    {
        let mut suffix = 1u32;
        loop {
            let next = candidate.with_numbered_suffix(suffix);
            if is_free(&next) {
                debug!("resolved conflict on '{candidate}' as '{next}'");
                return next;
            }
            suffix += 1;
        }
    }
}
