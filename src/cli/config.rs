//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{DEFAULT_EXTENSION, RemovePolicy, Settings};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Extension for new notes (default "md")
    pub extension: Option<String>,

    /// Editor command for editing notes
    pub editor: Option<String>,

    /// Hide content previews in listings
    pub hide_preview: bool,

    /// Prefix previews with a separator, for side-by-side layouts
    pub horizontal_orientation: bool,

    /// When a deleted note is flagged relative to the trash move
    pub remove_policy: RemovePolicy,

    /// Directory used instead of the system trash
    pub trash_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; missing files yield defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$FOLIO_CONFIG` if set, otherwise `~/.config/folio/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Resolve the notes directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Builds the settings handed to storage and the list controller.
    pub fn settings(&self, notes_dir: PathBuf) -> Settings {
        let extension = self
            .extension
            .as_deref()
            .map(|e| e.trim().trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EXTENSION);

        Settings {
            storage_dir: notes_dir,
            default_extension: extension.to_string(),
            hide_preview: self.hide_preview,
            horizontal_orientation: self.horizontal_orientation,
            remove_policy: self.remove_policy,
        }
    }
}
