//! Stable note identity, independent of a note's row position.

use std::fmt;
use ulid::Ulid;

/// Opaque identifier assigned once when a note record is created or wrapped.
///
/// Identity survives reordering, filtering, renames and deletion of other
/// notes. It is not persisted to disk: a fresh id is assigned each time a
/// storage directory is opened.
///
/// # Examples
///
/// ```
/// use folio::domain::NoteId;
///
/// let a = NoteId::new();
/// let b = NoteId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(Ulid);

impl NoteId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}
