//! In-memory handle to one note file.

use crate::domain::{
    DEFAULT_DATE_FORMAT, NoteId, PREVIEW_MAX_CHARS, RemovePolicy, Settings, TextFormat, date_label,
    preview_text,
};
use crate::infra::{
    DecodeError, FsError, TextDecoder, Trash, TrashError, modified_time, move_no_clobber,
    validate_file_name, write_atomic,
};
use chrono::{DateTime, Local};
use log::{info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from operations on a single note.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Trash(#[from] TrashError),
}

/// One note file and the state cached from it.
///
/// `content` and `modified_at` reflect the file as of the last successful
/// [`load`](Self::load) or [`save`](Self::save); the record never refreshes
/// on its own. A `modified_at` of `None` means the date is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRecord {
    id: NoteId,
    display_name: String,
    content: String,
    modified_at: Option<DateTime<Local>>,
    location: PathBuf,
    is_deleted: bool,
}

impl NoteRecord {
    /// Record for a freshly named note that has not been written yet.
    ///
    /// `location` should come from [`unique_note_path`](crate::infra::unique_note_path);
    /// `Storage::create` is the usual entry point.
    pub fn new_at(id: NoteId, location: PathBuf) -> Self {
        let display_name = file_name_of(&location);
        Self {
            id,
            display_name,
            content: String::new(),
            modified_at: Some(Local::now()),
            location,
            is_deleted: false,
        }
    }

    /// Wraps an existing file. Content and date stay unloaded until `load`.
    pub fn wrap(location: PathBuf) -> Self {
        let display_name = file_name_of(&location);
        Self {
            id: NoteId::new(),
            display_name,
            content: String::new(),
            modified_at: None,
            location,
            is_deleted: false,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn modified_at(&self) -> Option<DateTime<Local>> {
        self.modified_at
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn format(&self) -> TextFormat {
        TextFormat::from_path(&self.location)
    }

    pub fn is_rich_text(&self) -> bool {
        self.format().is_rich_text()
    }

    /// The file extension, without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.location.extension().and_then(|e| e.to_str())
    }

    /// Reads content and modification date from disk.
    ///
    /// On failure the content is emptied, the date becomes unknown and the
    /// error is returned.
    pub fn try_load<D: TextDecoder + ?Sized>(&mut self, decoder: &D) -> Result<(), NoteError> {
        let loaded = decoder
            .decode(&self.location, self.format())
            .map_err(NoteError::from)
            .and_then(|content| Ok((content, modified_time(&self.location)?)));

        match loaded {
            Ok((content, modified_at)) => {
                self.content = content;
                self.modified_at = Some(modified_at);
                Ok(())
            }
            Err(e) => {
                self.content.clear();
                self.modified_at = None;
                Err(e)
            }
        }
    }

    /// Like [`try_load`](Self::try_load) but logs the failure instead of
    /// returning it. Returns whether the load succeeded.
    pub fn load<D: TextDecoder + ?Sized>(&mut self, decoder: &D) -> bool {
        match self.try_load(decoder) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to load {}: {}", self.location.display(), e);
                false
            }
        }
    }

    /// Writes `content` to the note file in the note's format, creating the
    /// file if needed.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::Fs` if the write fails; cached state is untouched.
    pub fn save(&mut self, content: &str) -> Result<(), NoteError> {
        let bytes = self.format().encode(content);
        write_atomic(&self.location, &bytes)?;
        self.content = content.to_string();
        self.modified_at = Some(modified_time(&self.location).unwrap_or_else(|_| Local::now()));
        Ok(())
    }

    /// Renames the file within its directory; `new_name` is the complete
    /// final component, extension included.
    ///
    /// Returns false and leaves `location` untouched if the name is invalid,
    /// the target exists or the move fails. The display name is reset to the
    /// on-disk name in that case.
    pub fn rename(&mut self, new_name: &str) -> bool {
        match self.try_rename(new_name) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "failed to rename {} to '{}': {}",
                    self.location.display(),
                    new_name,
                    e
                );
                self.display_name = file_name_of(&self.location);
                false
            }
        }
    }

    fn try_rename(&mut self, new_name: &str) -> Result<(), FsError> {
        validate_file_name(new_name)?;
        let target = self
            .location
            .parent()
            .map(|dir| dir.join(new_name))
            .ok_or_else(|| FsError::ParentNotFound {
                path: self.location.clone(),
            })?;
        if target == self.location {
            self.display_name = new_name.to_string();
            return Ok(());
        }

        move_no_clobber(&self.location, &target)?;
        info!("renamed {} to {}", self.location.display(), target.display());
        self.location = target;
        self.display_name = new_name.to_string();
        Ok(())
    }

    /// Renames the base name and keeps the current extension.
    pub fn rename_base(&mut self, base: &str) -> bool {
        let base = base.trim();
        if base.is_empty() {
            warn!("refusing to rename {} to an empty name", self.location.display());
            self.display_name = file_name_of(&self.location);
            return false;
        }
        match self.extension().map(str::to_string) {
            Some(ext) => self.rename(&format!("{base}.{ext}")),
            None => self.rename(base),
        }
    }

    /// Changes the extension and keeps the base name. An empty extension
    /// removes it.
    pub fn change_extension(&mut self, extension: &str) -> bool {
        let extension = extension.trim().trim_start_matches('.');
        let stem = self
            .location
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        if extension.is_empty() {
            self.rename(&stem)
        } else {
            self.rename(&format!("{stem}.{extension}"))
        }
    }

    /// Moves the note file to the trash and marks the record deleted.
    ///
    /// With [`RemovePolicy::Optimistic`] the record is marked before the move
    /// and stays marked when it fails. With [`RemovePolicy::Confirmed`] it is
    /// marked only after the move succeeds. Failures are logged and returned.
    pub fn remove<T: Trash + ?Sized>(
        &mut self,
        trash: &T,
        policy: RemovePolicy,
    ) -> Result<(), NoteError> {
        if policy == RemovePolicy::Optimistic {
            self.is_deleted = true;
        }

        match trash.trash(&self.location) {
            Ok(()) => {
                self.is_deleted = true;
                info!("moved {} to the trash", self.location.display());
                Ok(())
            }
            Err(e) => {
                warn!("failed to remove {}: {}", self.location.display(), e);
                Err(e.into())
            }
        }
    }

    /// Preview snippet with the standard length limit.
    pub fn preview_text(&self, settings: &Settings) -> String {
        preview_text(&self.content, settings, PREVIEW_MAX_CHARS)
    }

    /// Modification date as `MM/dd/yy`, or `None` when unknown.
    pub fn date_label(&self) -> Option<String> {
        date_label(self.modified_at, DEFAULT_DATE_FORMAT)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{DirectoryTrash, FileDecoder};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct FailingTrash;

    impl Trash for FailingTrash {
        fn trash(&self, path: &Path) -> Result<(), TrashError> {
            Err(FsError::PermissionDenied { path: path.into() }.into())
        }
    }

    fn existing(dir: &TempDir, name: &str, content: &str) -> NoteRecord {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        NoteRecord::wrap(path)
    }

    // ===========================================
    // Construction
    // ===========================================

    #[test]
    fn new_at_stamps_now_and_uses_file_name() {
        let before = Local::now();
        let note = NoteRecord::new_at(NoteId::new(), PathBuf::from("/notes/Draft.md"));

        assert_eq!(note.display_name(), "Draft.md");
        assert!(note.modified_at().unwrap() >= before);
        assert_eq!(note.content(), "");
        assert!(!note.is_deleted());
    }

    #[test]
    fn wrap_leaves_content_and_date_unloaded() {
        let note = NoteRecord::wrap(PathBuf::from("/notes/Old.txt"));
        assert_eq!(note.display_name(), "Old.txt");
        assert_eq!(note.modified_at(), None);
        assert_eq!(note.date_label(), None);
    }

    #[test]
    fn is_rich_text_follows_extension() {
        assert!(NoteRecord::wrap(PathBuf::from("/n/a.rtf")).is_rich_text());
        assert!(!NoteRecord::wrap(PathBuf::from("/n/a.md")).is_rich_text());
        assert!(!NoteRecord::wrap(PathBuf::from("/n/README")).is_rich_text());
    }

    // ===========================================
    // Load and save
    // ===========================================

    #[test]
    fn load_reads_content_and_date() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "hello\nworld");

        assert!(note.load(&FileDecoder));

        assert_eq!(note.content(), "hello\nworld");
        assert!(note.modified_at().is_some());
        assert!(note.date_label().is_some());
    }

    #[test]
    fn load_failure_degrades_to_empty_and_unknown_date() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.txt", "old");
        note.load(&FileDecoder);
        fs::remove_file(note.location()).unwrap();

        assert!(!note.load(&FileDecoder));

        assert_eq!(note.content(), "");
        assert_eq!(note.modified_at(), None);
    }

    #[test]
    fn try_load_reports_decode_error() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.rtf", "not rich text");

        let result = note.try_load(&FileDecoder);

        assert!(matches!(result, Err(NoteError::Decode(DecodeError::Rtf { .. }))));
        assert_eq!(note.modified_at(), None);
    }

    #[test]
    fn load_does_not_self_refresh() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "first");
        note.load(&FileDecoder);

        fs::write(note.location(), "second").unwrap();
        assert_eq!(note.content(), "first");

        note.load(&FileDecoder);
        assert_eq!(note.content(), "second");
    }

    #[test]
    fn save_then_load_round_trips_plain_text() {
        let dir = TempDir::new().unwrap();
        let mut note = NoteRecord::new_at(NoteId::new(), dir.path().join("n.md"));

        note.save("# Title\nbody").unwrap();
        let mut reloaded = NoteRecord::wrap(note.location().to_path_buf());
        reloaded.load(&FileDecoder);

        assert_eq!(reloaded.content(), "# Title\nbody");
    }

    #[test]
    fn save_then_load_round_trips_rich_text() {
        let dir = TempDir::new().unwrap();
        let mut note = NoteRecord::new_at(NoteId::new(), dir.path().join("n.rtf"));

        note.save("Groceries\n{eggs} \\ café").unwrap();
        let raw = fs::read_to_string(note.location()).unwrap();
        assert!(raw.starts_with("{\\rtf1"));

        let mut reloaded = NoteRecord::wrap(note.location().to_path_buf());
        reloaded.load(&FileDecoder);
        assert_eq!(reloaded.content(), "Groceries\n{eggs} \\ café");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let mut note = NoteRecord::new_at(NoteId::new(), PathBuf::from("/nonexistent/dir/n.md"));
        let result = note.save("text");
        assert!(matches!(result, Err(NoteError::Fs(FsError::ParentNotFound { .. }))));
        assert_eq!(note.content(), "");
    }

    // ===========================================
    // Rename
    // ===========================================

    #[test]
    fn rename_moves_file_and_updates_location() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "x");

        assert!(note.rename("b.md"));

        assert_eq!(note.location(), dir.path().join("b.md"));
        assert_eq!(note.display_name(), "b.md");
        assert!(dir.path().join("b.md").exists());
        assert!(!dir.path().join("a.md").exists());
    }

    #[test]
    fn rename_onto_existing_file_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "mine");
        fs::write(dir.path().join("b.md"), "theirs").unwrap();
        let before = note.location().to_path_buf();

        assert!(!note.rename("b.md"));

        assert_eq!(note.location(), before);
        assert_eq!(note.display_name(), "a.md");
        assert_eq!(fs::read_to_string(dir.path().join("b.md")).unwrap(), "theirs");
    }

    #[test]
    fn rename_rejects_path_separators() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "x");

        assert!(!note.rename("../escape.md"));
        assert_eq!(note.location(), dir.path().join("a.md"));
    }

    #[test]
    fn rename_of_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let mut note = NoteRecord::wrap(dir.path().join("ghost.md"));
        assert!(!note.rename("other.md"));
        assert_eq!(note.location(), dir.path().join("ghost.md"));
    }

    #[test]
    fn rename_to_current_name_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "Draft.md", "x");

        assert!(note.rename("Draft.md"));

        assert_eq!(note.location(), dir.path().join("Draft.md"));
        assert_eq!(fs::read_to_string(dir.path().join("Draft.md")).unwrap(), "x");
    }

    #[test]
    fn rename_base_rejects_blank_base() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "Draft.md", "x");

        assert!(!note.rename_base("   "));

        assert_eq!(note.location(), dir.path().join("Draft.md"));
        assert!(!dir.path().join(".md").exists());
    }

    #[test]
    fn rename_rejects_hidden_name() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "Draft.md", "x");

        assert!(!note.rename(".md"));
        assert!(dir.path().join("Draft.md").exists());
    }

    #[test]
    fn rename_base_keeps_extension() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "Draft.rtf", "x");

        assert!(note.rename_base("  Final "));

        assert_eq!(note.display_name(), "Final.rtf");
        assert!(note.is_rich_text());
    }

    #[test]
    fn change_extension_keeps_base_name() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "Draft.md", "x");

        assert!(note.change_extension(".txt"));

        assert_eq!(note.location(), dir.path().join("Draft.txt"));
    }

    // ===========================================
    // Remove
    // ===========================================

    #[test]
    fn remove_moves_file_to_trash() {
        let dir = TempDir::new().unwrap();
        let trash = DirectoryTrash::new(dir.path().join(".trash"));
        let mut note = existing(&dir, "a.md", "x");

        note.remove(&trash, RemovePolicy::Confirmed).unwrap();

        assert!(note.is_deleted());
        assert!(!dir.path().join("a.md").exists());
        assert!(dir.path().join(".trash").join("a.md").exists());
    }

    #[test]
    fn optimistic_remove_marks_deleted_even_when_trash_fails() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "x");

        let result = note.remove(&FailingTrash, RemovePolicy::Optimistic);

        assert!(result.is_err());
        assert!(note.is_deleted());
        assert!(dir.path().join("a.md").exists());
    }

    #[test]
    fn confirmed_remove_keeps_note_when_trash_fails() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "x");

        let result = note.remove(&FailingTrash, RemovePolicy::Confirmed);

        assert!(matches!(result, Err(NoteError::Trash(_))));
        assert!(!note.is_deleted());
    }

    // ===========================================
    // Presentation
    // ===========================================

    #[test]
    fn preview_uses_loaded_content() {
        let dir = TempDir::new().unwrap();
        let mut note = existing(&dir, "a.md", "line\nnext");
        note.load(&FileDecoder);

        let settings = Settings::new(dir.path());
        assert_eq!(note.preview_text(&settings), "line next");
    }
}
