//! Resolved settings passed explicitly to storage and the list controller.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Extension given to newly created notes when none is configured.
pub const DEFAULT_EXTENSION: &str = "md";

/// Ordering of the deleted flag and the trash move in `NoteRecord::remove`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovePolicy {
    /// Flag the note only once the file is in the trash.
    #[default]
    Confirmed,
    /// Flag the note first and attempt the trash move afterwards; the flag
    /// stays set when the move fails.
    Optimistic,
}

/// Settings shared by storage, records and the list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_dir: PathBuf,
    pub default_extension: String,
    pub hide_preview: bool,
    pub horizontal_orientation: bool,
    pub remove_policy: RemovePolicy,
}

impl Settings {
    /// Settings for `storage_dir` with every other value at its default.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            hide_preview: false,
            horizontal_orientation: false,
            remove_policy: RemovePolicy::default(),
        }
    }

    /// Extensions picked up when scanning the storage directory: the known
    /// note formats plus the default extension.
    pub fn note_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = super::NOTE_EXTENSIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let default = self.default_extension.trim_start_matches('.');
        if !default.is_empty() && !extensions.iter().any(|e| e.eq_ignore_ascii_case(default)) {
            extensions.push(default.to_string());
        }
        extensions
    }
}
