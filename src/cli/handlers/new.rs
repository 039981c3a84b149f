//! New note command handler.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

use super::open_list;
use crate::cli::NewArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Settings;

/// Opens a file in the user's configured editor.
pub(crate) fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

pub fn handle_new(args: &NewArgs, settings: Settings, config: &Config) -> Result<()> {
    if !settings.storage_dir.exists() {
        bail!(
            "notes directory does not exist: {}",
            settings.storage_dir.display()
        );
    }

    let mut list = open_list(settings)?;
    let content = args.content.as_deref().unwrap_or("");
    let id = list
        .create_note(&args.name, content)
        .with_context(|| "failed to create note")?;

    let path = list
        .lookup_by_id(id)
        .map(|n| n.location().to_path_buf())
        .with_context(|| "created note disappeared")?;

    if args.edit {
        open_in_editor(&path, config)?;
        if let Some(row) = list.index_of(id) {
            list.reload(row);
        }
    }

    let note = list
        .lookup_by_id(id)
        .with_context(|| "created note disappeared")?;

    match args.format {
        OutputFormat::Human => {
            println!("Created: {}", note.display_name());
            println!("  {}", path.display());
        }
        OutputFormat::Json => {
            let out = Output::new(NoteListing::from_record(note, list.storage().settings()));
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Paths => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
