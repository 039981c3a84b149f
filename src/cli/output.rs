//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{NoteRecord, Settings};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub name: String,
    pub path: String,
    /// `MM/dd/yy`, absent when the date is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    pub preview: String,
    pub rich_text: bool,
}

impl NoteListing {
    pub fn from_record(note: &NoteRecord, settings: &Settings) -> Self {
        Self {
            name: note.display_name().to_string(),
            path: note.location().to_string_lossy().to_string(),
            modified: note.date_label(),
            preview: note.preview_text(settings),
            rich_text: note.is_rich_text(),
        }
    }
}

/// Result of a rename for JSON output.
#[derive(Debug, Serialize)]
pub struct RenameResult {
    pub old_path: String,
    pub new_path: String,
}
