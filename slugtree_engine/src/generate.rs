//! Slug candidate generation and text sanitization.
//!
//! `generate` derives a candidate from the record fields named in the
//! field configuration, rooted under the container's stored slug.
//! `sanitize` normalizes arbitrary user text into a valid candidate and is
//! idempotent: sanitizing an already-sanitized string changes nothing.

use log::debug;
use slugtree_data::FieldConfiguration;

use crate::candidate::{SEPARATOR, SlugCandidate};
use crate::record::{PageId, RecordSnapshot};
use crate::store::PageStore;

/// Derive a slug candidate for `snapshot`, scoped under `scope`.
///
/// The container's stored slug forms the path prefix; the trailing segment
/// comes from the configured generator fields, falling back to the
/// configuration's fallback value when every source is empty. Deterministic
/// for a fixed store state.
pub fn generate(
    store: &dyn PageStore,
    config: &FieldConfiguration,
    snapshot: &RecordSnapshot,
    scope: PageId,
) -> SlugCandidate {
    let prefix = store
        .page_slug(scope, snapshot.language)
        .unwrap_or_else(SlugCandidate::root);

    let mut parts = Vec::new();
    for source in &config.generator_fields {
        let text = source
            .0
            .iter()
            .filter_map(|field| snapshot.value(field))
            .find(|value| !value.trim().is_empty());
        if let Some(text) = text {
            let segment = sanitize_segment(text);
            if !segment.is_empty() {
                parts.push(segment);
            }
        }
    }

    let segment = if parts.is_empty() {
        sanitize_segment(&config.fallback_value)
    } else {
        parts.join("-")
    };
    let candidate = prefix.join(&segment);
    debug!("generated candidate '{candidate}' under scope {scope}");
    candidate
}

/// Normalize arbitrary text into a path-shaped slug candidate.
///
/// Case folds, transliterates common accented characters, substitutes `-`
/// for anything else unsafe, and preserves `/` as the segment separator.
/// Text reduced to nothing falls back to the single segment `default`.
pub fn sanitize(raw: &str) -> SlugCandidate {
    let segments: Vec<String> = raw
        .split(SEPARATOR)
        .map(sanitize_segment)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return SlugCandidate::from_segments(["default".to_string()]);
    }
    SlugCandidate::from_segments(segments)
}

/// Sanitize one path segment: lowercase alphanumerics, dashes between
/// words, no leading or trailing dashes. May return an empty string.
fn sanitize_segment(raw: &str) -> String {
    let mut segment = String::new();
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if let Some(mapped) = transliterate(ch) {
            if pending_dash && !segment.is_empty() {
                segment.push('-');
            }
            segment.push_str(mapped);
            pending_dash = false;
        } else if ch.is_ascii_alphanumeric() {
            if pending_dash && !segment.is_empty() {
                segment.push('-');
            }
            segment.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    segment
}

/// ASCII replacement for a small table of common non-ASCII letters.
fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch.to_lowercase().next().unwrap_or(ch) {
        'ä' => "ae",
        'ö' => "oe",
        'ü' => "ue",
        'ß' => "ss",
        'à' | 'á' | 'â' | 'ã' | 'å' => "a",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' | 'õ' => "o",
        'ù' | 'ú' | 'û' => "u",
        'ç' => "c",
        'ñ' => "n",
        'ý' | 'ÿ' => "y",
        _ => return None,
    };
    Some(mapped)
}
