//! Moving note files to a recoverable trash location.

use crate::infra::fs::{FsError, is_occupied, move_no_clobber};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while moving a file to the trash.
#[derive(Debug, Error)]
pub enum TrashError {
    #[error("failed to move {path} to the system trash: {source}")]
    System {
        path: PathBuf,
        #[source]
        source: trash::Error,
    },

    #[error(transparent)]
    Fs(#[from] FsError),
}

/// Destination for deleted notes.
pub trait Trash {
    fn trash(&self, path: &Path) -> Result<(), TrashError>;
}

/// The platform trash (Trash on macOS, Recycle Bin on Windows, the
/// freedesktop trash elsewhere).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn trash(&self, path: &Path) -> Result<(), TrashError> {
        trash::delete(path).map_err(|source| TrashError::System {
            path: path.into(),
            source,
        })
    }
}

/// A plain directory used as a trash can.
///
/// Files keep their name; a numeric suffix is added when a file of the same
/// name is already in the trash.
#[derive(Debug, Clone)]
pub struct DirectoryTrash {
    dir: PathBuf,
}

impl DirectoryTrash {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn destination(&self, path: &Path) -> Result<PathBuf, FsError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FsError::InvalidName {
                name: path.display().to_string(),
                reason: "path has no file name",
            })?;

        let candidate = self.dir.join(file_name);
        if !is_occupied(&candidate) {
            return Ok(candidate);
        }

        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (file_name, None),
        };
        let mut n: u32 = 1;
        loop {
            let name = match extension {
                Some(ext) => format!("{stem} {n}.{ext}"),
                None => format!("{stem} {n}"),
            };
            let candidate = self.dir.join(name);
            if !is_occupied(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

impl Trash for DirectoryTrash {
    fn trash(&self, path: &Path) -> Result<(), TrashError> {
        if !is_occupied(path) {
            return Err(FsError::NotFound { path: path.into() }.into());
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| FsError::from_io(&self.dir, e))?;
        let destination = self.destination(path)?;
        move_no_clobber(path, &destination)?;
        Ok(())
    }
}
