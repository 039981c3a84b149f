//! File I/O, text decoding, trash

mod decode;
mod fs;
mod trash;

pub use decode::{DecodeError, FileDecoder, TextDecoder, decode_bytes};
pub use fs::{
    FALLBACK_NOTE_NAME, FsError, is_occupied, modified_time, move_no_clobber, normalize_note_name,
    note_path, scan_notes_directory, unique_note_path, validate_file_name, write_atomic,
};
pub use trash::{DirectoryTrash, SystemTrash, Trash, TrashError};
