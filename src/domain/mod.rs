//! Core types: NoteRecord, NoteId, TextFormat, Settings, preview helpers

mod format;
mod note;
mod note_id;
mod preview;
mod settings;

pub use format::{NOTE_EXTENSIONS, TextFormat, rtf};
pub use note::{NoteError, NoteRecord};
pub use note_id::NoteId;
pub use preview::{
    DEFAULT_DATE_FORMAT, PREVIEW_MAX_CHARS, PREVIEW_SEPARATOR, base_name_len, date_label,
    preview_text,
};
pub use settings::{DEFAULT_EXTENSION, RemovePolicy, Settings};
