//! The authoritative collection of note records for one storage directory.

use crate::domain::{NoteId, NoteRecord, Settings};
use crate::infra::{FsError, TextDecoder, scan_notes_directory, unique_note_path};
use log::{debug, info};
use std::cmp::Ordering;

/// Notes of one storage directory, most recently modified first.
///
/// Creation takes `&mut self`, so choosing a unique name and claiming it
/// happen as one step. Share a `Storage` between threads only behind a lock.
#[derive(Debug)]
pub struct Storage {
    settings: Settings,
    notes: Vec<NoteRecord>,
}

/// Result of looking a note up by a user-supplied name.
#[derive(Debug)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a NoteRecord),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a NoteRecord>),
    /// No notes matched.
    NotFound,
}

impl Storage {
    /// Empty storage; nothing is read from disk.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            notes: Vec::new(),
        }
    }

    /// Wraps every note file in the storage directory and loads it.
    ///
    /// Files that fail to load are kept with empty content and an unknown
    /// date; the failure is logged.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` or `FsError::NotADirectory` if the storage
    /// directory is unusable.
    pub fn open<D: TextDecoder + ?Sized>(settings: Settings, decoder: &D) -> Result<Self, FsError> {
        let paths = scan_notes_directory(&settings.storage_dir, &settings.note_extensions())?;
        let mut notes: Vec<NoteRecord> = paths.into_iter().map(NoteRecord::wrap).collect();
        for note in &mut notes {
            note.load(decoder);
        }
        notes.sort_by(newest_first);
        debug!(
            "opened {} notes from {}",
            notes.len(),
            settings.storage_dir.display()
        );
        Ok(Self { settings, notes })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All records in display order, including ones flagged deleted but not
    /// yet purged.
    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates a record with a unique location for `candidate_name`.
    ///
    /// The location is free on disk and not claimed by any live record. The
    /// file itself is written by the first [`NoteRecord::save`].
    pub fn create(&mut self, candidate_name: &str) -> &mut NoteRecord {
        let location = unique_note_path(
            &self.settings.storage_dir,
            candidate_name,
            &self.settings.default_extension,
            |path| {
                self.notes
                    .iter()
                    .any(|n| !n.is_deleted() && n.location() == path)
            },
        );
        let id = NoteId::new();
        info!("new note {} at {}", id, location.display());

        self.notes.insert(0, NoteRecord::new_at(id, location));
        &mut self.notes[0]
    }

    pub fn get(&self, id: NoteId) -> Option<&NoteRecord> {
        self.notes.iter().find(|n| n.id() == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut NoteRecord> {
        self.notes.iter_mut().find(|n| n.id() == id)
    }

    /// Resolves a name to a live note.
    ///
    /// Resolution order:
    /// 1. Exact file name (`Draft.md`)
    /// 2. Base name without extension (`Draft`), which may match several
    ///    files with different extensions
    ///
    /// Matching is case-sensitive, like the file names themselves.
    pub fn resolve(&self, name: &str) -> ResolveResult<'_> {
        let name = name.trim();
        let live = || self.notes.iter().filter(|n| !n.is_deleted());

        if let Some(note) = live().find(|n| n.display_name() == name) {
            return ResolveResult::Unique(note);
        }

        let mut matches: Vec<&NoteRecord> = live()
            .filter(|n| {
                n.location()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|stem| stem == name)
            })
            .collect();

        match matches.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Unique(matches.remove(0)),
            _ => ResolveResult::Ambiguous(matches),
        }
    }

    /// Forgets a record without touching its file, releasing its name.
    pub fn discard(&mut self, id: NoteId) -> Option<NoteRecord> {
        let index = self.notes.iter().position(|n| n.id() == id)?;
        Some(self.notes.remove(index))
    }

    /// Drops records flagged deleted. Returns how many were dropped.
    pub fn purge_removed(&mut self) -> usize {
        let before = self.notes.len();
        self.notes.retain(|n| !n.is_deleted());
        before - self.notes.len()
    }
}

fn newest_first(a: &NoteRecord, b: &NoteRecord) -> Ordering {
    match (a.modified_at(), b.modified_at()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.display_name().cmp(b.display_name()))
}
