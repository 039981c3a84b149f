//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::FolioCommand;
use std::fs::{File, FileTimes};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Isolated test environment.
///
/// Layout under one temp directory: `notes/` (the notes directory),
/// `trash/` (used by `rm` instead of the system trash) and `config.toml`.
pub struct TestEnv {
    _temp_dir: TempDir,
    notes_dir: PathBuf,
    trash_dir: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Creates an environment whose config file holds `extra` after the
    /// trash setting.
    pub fn with_config(extra: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        let trash_dir = temp_dir.path().join("trash");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::create_dir(&notes_dir).expect("Failed to create notes directory");

        let config = format!(
            "trash_dir = {:?}\n{}",
            trash_dir.to_string_lossy(),
            extra
        );
        std::fs::write(&config_path, config).expect("Failed to write config");

        Self {
            _temp_dir: temp_dir,
            notes_dir,
            trash_dir,
            config_path,
        }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }

    /// Writes a note file and returns its path.
    pub fn write_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write note");
        path
    }

    /// Writes a note whose modification time is `age_secs` in the past.
    pub fn write_note_aged(&self, name: &str, content: &str, age_secs: u64) -> PathBuf {
        let path = self.write_note(name, content);
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        File::options()
            .write(true)
            .open(&path)
            .and_then(|f| f.set_times(FileTimes::new().set_modified(mtime)))
            .expect("Failed to set modification time");
        path
    }

    pub fn read_note(&self, name: &str) -> String {
        std::fs::read_to_string(self.notes_dir.join(name)).expect("Failed to read note")
    }

    pub fn has_note(&self, name: &str) -> bool {
        self.notes_dir.join(name).exists()
    }

    /// Creates a FolioCommand configured for this test environment.
    pub fn cmd(&self) -> FolioCommand {
        FolioCommand::new()
            .config(&self.config_path)
            .dir(&self.notes_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
