//! Command handlers for the CLI.

mod list;
mod new;
mod remove;
mod rename;
mod show_edit;

use anyhow::{Context, Result, bail};

use crate::controller::NoteList;
use crate::domain::{NoteRecord, Settings};
use crate::infra::{FileDecoder, SystemTrash, TextDecoder, Trash};
use crate::storage::{ResolveResult, Storage};

// Re-export public items
pub use list::handle_list;
pub use new::handle_new;
pub use remove::handle_remove;
pub use rename::handle_rename;
pub use show_edit::{handle_edit, handle_show};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the storage directory and wraps it in a list controller.
pub(crate) fn open_list(settings: Settings) -> Result<NoteList> {
    open_list_with(settings, FileDecoder, SystemTrash)
}

pub(crate) fn open_list_with<D: TextDecoder, T: Trash>(
    settings: Settings,
    decoder: D,
    trash: T,
) -> Result<NoteList<D, T>> {
    let dir = settings.storage_dir.clone();
    let storage = Storage::open(settings, &decoder)
        .with_context(|| format!("failed to open notes directory {}", dir.display()))?;
    Ok(NoteList::new(storage, decoder, trash))
}

/// Finds the row of the note named by `identifier`.
pub(crate) fn resolve_row<D: TextDecoder, T: Trash>(
    list: &NoteList<D, T>,
    identifier: &str,
) -> Result<usize> {
    match list.storage().resolve(identifier) {
        ResolveResult::Unique(note) => list
            .index_of(note.id())
            .with_context(|| format!("note is not listed: '{}'", identifier)),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note name");
        }
        ResolveResult::NotFound => {
            bail!("note not found: '{}'", identifier);
        }
    }
}

/// Prints the candidates of an ambiguous name to help pick one.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&NoteRecord]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {}", note.display_name());
    }
    eprintln!();
    eprintln!("Use the full file name to specify which note you mean.");
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
