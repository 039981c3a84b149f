//! Filesystem primitives for note files: unique naming, atomic writes,
//! no-clobber moves and directory scanning.

use chrono::{DateTime, Local};
use log::debug;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Base name used when a note is created without a usable name.
pub const FALLBACK_NOTE_NAME: &str = "Untitled Note";

/// Errors during file system operations on notes.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid file name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Returns true if anything (file, directory, dangling symlink) occupies `path`.
pub fn is_occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Finds a free note path in `dir` for the candidate name.
///
/// The candidate is trimmed and falls back to [`FALLBACK_NOTE_NAME`] when
/// empty. While the path is occupied on disk or `is_claimed` reports it as
/// taken, the base name gets a numeric suffix: `Draft`, `Draft 1`,
/// `Draft 2`, ... The counter starts at 1 on every call.
///
/// # Examples
///
/// ```
/// use folio::infra::unique_note_path;
/// use std::path::Path;
///
/// let dir = Path::new("/nonexistent/notes");
/// let path = unique_note_path(dir, "  ", "md", |_| false);
/// assert_eq!(path, dir.join("Untitled Note.md"));
/// ```
pub fn unique_note_path<F>(dir: &Path, candidate: &str, extension: &str, is_claimed: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let base = normalize_note_name(candidate);
    let mut path = note_path(dir, &base, extension);
    let mut suffix: u32 = 0;

    while is_occupied(&path) || is_claimed(&path) {
        suffix += 1;
        debug!("{} is taken, trying suffix {}", path.display(), suffix);
        path = note_path(dir, &format!("{base} {suffix}"), extension);
    }

    path
}

/// Trims the candidate, substitutes the fallback name for empty input and
/// replaces path separators so the note stays inside its directory.
pub fn normalize_note_name(candidate: &str) -> String {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return FALLBACK_NOTE_NAME.to_string();
    }
    trimmed.replace(['/', '\\'], "-")
}

/// Joins `dir`, `name` and `extension` into a note path.
pub fn note_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        dir.join(name)
    } else {
        dir.join(format!("{name}.{extension}"))
    }
}

/// Checks that `name` can be used as the final component of a sibling path.
pub fn validate_file_name(name: &str) -> Result<(), FsError> {
    let invalid = |reason| FsError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name cannot contain path separators"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with a dot"));
    }
    Ok(())
}

/// Reads the modification time of a file.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
pub fn modified_time(path: &Path) -> Result<DateTime<Local>, FsError> {
    let metadata = std::fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
    let modified = metadata.modified().map_err(|e| FsError::from_io(path, e))?;
    Ok(DateTime::<Local>::from(modified))
}

/// Moves `from` to `to` unless something already exists at `to`.
///
/// # Errors
///
/// Returns `FsError::AlreadyExists` if the target is occupied.
/// Returns `FsError::NotFound` if the source doesn't exist.
pub fn move_no_clobber(from: &Path, to: &Path) -> Result<(), FsError> {
    if is_occupied(to) {
        return Err(FsError::AlreadyExists { path: to.into() });
    }
    std::fs::rename(from, to).map_err(|e| FsError::from_io(from, e))
}

/// Writes bytes to a file path atomically.
///
/// Uses a temporary file and atomic rename to prevent partial writes.
/// The parent directory must exist.
///
/// # Errors
///
/// Returns `FsError::ParentNotFound` if the parent directory doesn't exist.
/// Returns `FsError::AtomicWrite` if the atomic rename fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), FsError> {
    let parent = path
        .parent()
        .ok_or_else(|| FsError::ParentNotFound { path: path.into() })?;

    if !parent.exists() {
        return Err(FsError::ParentNotFound {
            path: parent.into(),
        });
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(bytes).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Lists note files directly inside `dir` whose extension is one of
/// `extensions` (compared case-insensitively).
///
/// Hidden files are skipped. Subdirectories are not descended into.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn scan_notes_directory(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| !is_hidden(e))
        .filter(|e| has_extension(e, extensions))
        .map(DirEntry::into_path)
        .collect();

    paths.sort();
    debug!("found {} note files in {}", paths.len(), dir.display());
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_extension(entry: &DirEntry, extensions: &[String]) -> bool {
    entry
        .path()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}
