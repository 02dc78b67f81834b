//! Per-request record views fed to generation and uniqueness checks.

use std::collections::BTreeMap;

/// Identifier of a page / container node in the tree. `0` means "no
/// container" (site root).
pub type PageId = u64;

/// Language identifier of a record.
pub type LanguageId = u32;

/// Root container sentinel.
pub const ROOT: PageId = 0;

/// In-flight values of the record being edited or created.
///
/// Constructed per request from caller-supplied field values merged with
/// the container and language, then discarded.
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    values: BTreeMap<String, String>,
    pub container: PageId,
    pub language: LanguageId,
}

impl RecordSnapshot {
    pub fn new(values: BTreeMap<String, String>, container: PageId, language: LanguageId) -> Self {
        Self { values, container, language }
    }

    /// Current value of a named field, if present.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Raw user-edited slug text carried in the reserved `manual` value.
    pub fn manual(&self) -> &str {
        self.value("manual").unwrap_or("")
    }
}

/// Persistent identity of the record under edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordId {
    New,
    Existing(u64),
}

impl RecordId {
    /// The wire protocol sends `0` for records that do not exist yet.
    pub fn from_raw(raw: u64) -> Self {
        if raw == 0 { Self::New } else { Self::Existing(raw) }
    }
}

/// Read-only identity token passed to uniqueness queries.
///
/// A store query must never count the record identified here as a
/// collision with itself.
#[derive(Debug, Clone)]
pub struct RecordState<'a> {
    pub table: &'a str,
    pub id: RecordId,
    pub container: PageId,
    pub language: LanguageId,
}

impl<'a> RecordState<'a> {
    pub fn for_record(table: &'a str, snapshot: &RecordSnapshot, id: RecordId) -> Self {
        Self {
            table,
            id,
            container: snapshot.container,
            language: snapshot.language,
        }
    }

    /// True when `page` is the record this state identifies.
    pub fn is_self(&self, page: PageId) -> bool {
        matches!(self.id, RecordId::Existing(id) if id == page)
    }
}
