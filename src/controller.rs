//! List controller: row order, selection, and the delete/rename commands.
//!
//! Presentation is left to collaborators: a [`Confirm`] dialog, an
//! [`EditorPane`] showing the selected note and a [`ListView`] showing the
//! rows. The controller only decides what they are told.

use crate::domain::{NoteError, NoteId, NoteRecord, base_name_len};
use crate::infra::{FileDecoder, SystemTrash, TextDecoder, Trash};
use crate::storage::Storage;
use log::debug;
use std::ops::Range;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &DeletePrompt) -> bool;
}

/// The detail pane showing one note's content.
pub trait EditorPane {
    fn show(&mut self, note: &NoteRecord);
    fn clear(&mut self);
}

/// The visual list of notes.
pub trait ListView {
    fn reload(&mut self, rows: &[&NoteRecord]);
    fn select(&mut self, row: Option<usize>);
}

/// Which row, if any, is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Row(usize),
}

/// Text of the confirmation shown before a note is trashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub message: String,
    pub detail: &'static str,
    pub accept: &'static str,
    pub cancel: &'static str,
}

impl DeletePrompt {
    fn for_note(name: &str) -> Self {
        let message = if name.is_empty() {
            "Are you sure you want to move the selected note to the trash?".to_string()
        } else {
            format!("Are you sure you want to move \"{name}\" to the trash?")
        };
        Self {
            message,
            detail: "This action cannot be undone.",
            accept: "Remove note",
            cancel: "Cancel",
        }
    }
}

/// What a delete command did.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The index did not name a row.
    NoSelection,
    /// The user declined.
    Cancelled,
    Removed { name: String },
    /// The trash move failed. The note is gone from the list only if the
    /// remove policy flagged it anyway.
    Failed { name: String, error: NoteError },
}

/// Editable name field state for an in-place rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEdit {
    pub text: String,
    /// Pre-selected character range: the base name, without the extension.
    pub selection: Range<usize>,
}

/// Ordered, filterable list of notes with a single selection.
pub struct NoteList<D = FileDecoder, T = SystemTrash> {
    storage: Storage,
    decoder: D,
    trash: T,
    rows: Vec<NoteId>,
    filter: String,
    selection: Selection,
}

impl<D: TextDecoder, T: Trash> NoteList<D, T> {
    pub fn new(storage: Storage, decoder: D, trash: T) -> Self {
        let mut list = Self {
            storage,
            decoder,
            trash,
            rows: Vec::new(),
            filter: String::new(),
            selection: Selection::None,
        };
        list.refresh("");
        list
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records in row order.
    pub fn rows(&self) -> Vec<&NoteRecord> {
        self.rows
            .iter()
            .filter_map(|id| self.storage.get(*id))
            .collect()
    }

    pub fn note_at(&self, index: usize) -> Option<&NoteRecord> {
        self.rows.get(index).and_then(|id| self.storage.get(*id))
    }

    pub fn index_of(&self, id: NoteId) -> Option<usize> {
        self.rows.iter().position(|row| *row == id)
    }

    /// Resolves an id to the authoritative record.
    pub fn lookup_by_id(&self, id: NoteId) -> Option<&NoteRecord> {
        self.storage.get(id)
    }

    pub fn selected_note(&self) -> Option<&NoteRecord> {
        match self.selection {
            Selection::Row(index) => self.note_at(index),
            Selection::None => None,
        }
    }

    /// Rebuilds the rows from live records matching `filter`.
    ///
    /// The filter matches the file name or content, ignoring case; an empty
    /// filter shows every note. A selection past the end is cleared.
    pub fn refresh(&mut self, filter: &str) {
        let needle = filter.trim().to_lowercase();
        self.filter = filter.trim().to_string();
        self.rows = self
            .storage
            .notes()
            .iter()
            .filter(|n| !n.is_deleted())
            .filter(|n| {
                needle.is_empty()
                    || n.display_name().to_lowercase().contains(&needle)
                    || n.content().to_lowercase().contains(&needle)
            })
            .map(NoteRecord::id)
            .collect();

        if let Selection::Row(index) = self.selection
            && index >= self.rows.len()
        {
            self.selection = Selection::None;
        }
        debug!("list refreshed with filter '{}': {} rows", self.filter, self.rows.len());
    }

    /// Selects `index`, loads that note and shows it in the editor.
    ///
    /// An index outside the rows clears the selection.
    pub fn selection_changed<E: EditorPane + ?Sized>(&mut self, index: usize, editor: &mut E) {
        let Some(id) = self.rows.get(index).copied() else {
            self.selection = Selection::None;
            return;
        };
        self.selection = Selection::Row(index);

        if let Some(note) = self.storage.get_mut(id) {
            note.load(&self.decoder);
            editor.show(note);
        }
    }

    /// Re-reads the note at `index` from disk. Returns false if the index is
    /// out of range or the load failed.
    pub fn reload(&mut self, index: usize) -> bool {
        let Some(id) = self.rows.get(index).copied() else {
            return false;
        };
        self.storage
            .get_mut(id)
            .is_some_and(|note| note.load(&self.decoder))
    }

    /// Creates a note, writes `content` to it and selects its row when
    /// visible under the current filter.
    pub fn create_note(&mut self, name: &str, content: &str) -> Result<NoteId, NoteError> {
        let note = self.storage.create(name);
        let id = note.id();
        if let Err(e) = note.save(content) {
            self.storage.discard(id);
            return Err(e);
        }

        let filter = self.filter.clone();
        self.refresh(&filter);
        if let Some(index) = self.index_of(id) {
            self.selection = Selection::Row(index);
        }
        Ok(id)
    }

    /// Confirms and trashes the note at `index`.
    ///
    /// After a removal the editor is cleared, the list is refreshed with an
    /// empty filter (dropping any active search) and the same index is
    /// selected again if a row still exists there.
    pub fn handle_delete<C, E, V>(
        &mut self,
        index: usize,
        confirm: &mut C,
        editor: &mut E,
        view: &mut V,
    ) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
        E: EditorPane + ?Sized,
        V: ListView + ?Sized,
    {
        let Some(id) = self.rows.get(index).copied() else {
            return DeleteOutcome::NoSelection;
        };
        let Some(note) = self.storage.get(id) else {
            return DeleteOutcome::NoSelection;
        };
        let name = note.display_name().to_string();

        if !confirm.confirm(&DeletePrompt::for_note(&name)) {
            return DeleteOutcome::Cancelled;
        }

        let policy = self.storage.settings().remove_policy;
        let result = match self.storage.get_mut(id) {
            Some(note) => note.remove(&self.trash, policy),
            None => return DeleteOutcome::NoSelection,
        };
        let flagged = self.storage.get(id).is_some_and(NoteRecord::is_deleted);

        if flagged {
            editor.clear();
            self.storage.purge_removed();
            self.refresh("");
            view.reload(&self.rows());

            if index < self.rows.len() {
                self.selection_changed(index, editor);
                view.select(Some(index));
            } else {
                self.selection = Selection::None;
                view.select(None);
            }
        }

        match result {
            Ok(()) => DeleteOutcome::Removed { name },
            Err(error) => DeleteOutcome::Failed { name, error },
        }
    }

    /// Puts the row's name into edit mode with the base name pre-selected.
    pub fn handle_rename(&self, index: usize) -> Option<RenameEdit> {
        let note = self.note_at(index)?;
        let text = note.display_name().to_string();
        let selection = 0..base_name_len(&text);
        Some(RenameEdit { text, selection })
    }

    /// Applies an edited name to the row's note. `new_name` is the full
    /// file name, extension included.
    pub fn commit_rename(&mut self, index: usize, new_name: &str) -> bool {
        self.with_note_at(index, |note| note.rename(new_name))
    }

    /// Renames the row's note, keeping its extension.
    pub fn commit_rename_base(&mut self, index: usize, base: &str) -> bool {
        self.with_note_at(index, |note| note.rename_base(base))
    }

    /// Changes the row's note extension, keeping its base name.
    pub fn commit_change_extension(&mut self, index: usize, extension: &str) -> bool {
        self.with_note_at(index, |note| note.change_extension(extension))
    }

    fn with_note_at(&mut self, index: usize, f: impl FnOnce(&mut NoteRecord) -> bool) -> bool {
        let Some(id) = self.rows.get(index).copied() else {
            return false;
        };
        self.storage.get_mut(id).is_some_and(f)
    }
}
