//! List-row presentation helpers: preview snippets, date labels and the
//! editable part of a file name.

use crate::domain::Settings;
use chrono::{DateTime, Local};
use std::path::Path;

/// Content length above which the preview is truncated.
pub const PREVIEW_MAX_CHARS: usize = 250;

/// Prefix put in front of previews in horizontal orientation.
pub const PREVIEW_SEPARATOR: &str = " – ";

/// `MM/dd/yy`.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%y";

/// Builds the preview snippet shown under a note's name.
///
/// Content longer than `max_chars` is cut to its first `max_chars + 1`
/// characters (the inclusive range `0..=max_chars`). Newlines become spaces.
/// In horizontal orientation the snippet is prefixed with
/// [`PREVIEW_SEPARATOR`] unless it already starts with it.
///
/// # Examples
///
/// ```
/// use folio::domain::{Settings, preview_text};
///
/// let settings = Settings::new("/notes");
/// assert_eq!(preview_text("one\ntwo", &settings, 250), "one two");
/// ```
pub fn preview_text(content: &str, settings: &Settings, max_chars: usize) -> String {
    if settings.hide_preview {
        return String::new();
    }

    let preview: String = if content.chars().count() > max_chars {
        content.chars().take(max_chars + 1).collect()
    } else {
        content.to_string()
    };

    let mut preview = preview.replace('\n', " ");
    if settings.horizontal_orientation && !preview.starts_with(PREVIEW_SEPARATOR) {
        preview.insert_str(0, PREVIEW_SEPARATOR);
    }
    preview
}

/// Formats a modification date, or `None` when the date is unknown.
pub fn date_label(modified_at: Option<DateTime<Local>>, format: &str) -> Option<String> {
    modified_at.map(|date| date.format(format).to_string())
}

/// Number of characters of `file_name` before the extension separator.
///
/// A name without an extension is editable in full.
pub fn base_name_len(file_name: &str) -> usize {
    let total = file_name.chars().count();
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => total - ext.chars().count() - 1,
        None => total,
    }
}
