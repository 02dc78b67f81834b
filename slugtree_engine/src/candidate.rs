//! Slug candidate type and path-shape invariants.
//!
//! A `SlugCandidate` always starts with exactly one `/`, never contains a
//! doubled `/`, and never carries empty segments. The root candidate `/`
//! (zero segments) exists only to describe a container prefix; generation
//! never proposes it because every generation path appends a segment.

use serde::Serialize;
use std::fmt;

/// Path separator between slug segments.
pub const SEPARATOR: char = '/';

/// A normalized URL-path slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SlugCandidate(String);

impl SlugCandidate {
    /// The bare root path `/`, used as the prefix of top-level containers.
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Normalize arbitrary path-shaped text into a candidate.
    ///
    /// Collapses repeated separators, drops empty segments, and forces a
    /// single leading separator. Performs no character substitution; see
    /// [`crate::generate::sanitize`] for that.
    pub fn normalize(raw: &str) -> Self {
        Self::from_segments(raw.split(SEPARATOR).filter(|s| !s.is_empty()).map(str::to_string))
    }

    /// Build a candidate from already-clean segments.
    ///
    /// Any separator inside a segment is flattened to `-` so segments can
    /// never introduce extra path levels.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = String::new();
        for segment in segments {
            let clean = segment.replace(SEPARATOR, "-");
            if clean.is_empty() {
                continue;
            }
            path.push(SEPARATOR);
            path.push_str(&clean);
        }
        if path.is_empty() {
            return Self::root();
        }
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Iterate over the non-empty segments, leading separator excluded.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments().next_back()
    }

    /// Candidate with the final segment removed; root stays root.
    pub fn parent(&self) -> Self {
        match self.0.rfind(SEPARATOR) {
            Some(0) | None => Self::root(),
            Some(idx) => Self(self.0[..idx].to_string()),
        }
    }

    /// Candidate extended by one segment (separators inside flattened to `-`).
    pub fn join(&self, segment: &str) -> Self {
        let clean = segment.replace(SEPARATOR, "-");
        if clean.is_empty() {
            return self.clone();
        }
        if self.is_root() {
            return Self(format!("{SEPARATOR}{clean}"));
        }
        Self(format!("{}{SEPARATOR}{clean}", self.0))
    }

    /// All segments collapsed into one, joined by `-`.
    pub fn flattened(&self) -> String {
        self.segments().collect::<Vec<_>>().join("-")
    }

    /// Candidate with `-{n}` appended to the final segment.
    pub fn with_numbered_suffix(&self, n: u32) -> Self {
        match self.last_segment() {
            Some(last) => {
                let numbered = format!("{last}-{n}");
                self.parent().join(&numbered)
            },
            None => self.join(&n.to_string()),
        }
    }
}

impl fmt::Display for SlugCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
