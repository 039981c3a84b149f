//! Show and Edit command handlers.

use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use super::new::open_in_editor;
use super::{open_list, resolve_row};
use crate::cli::config::Config;
use crate::cli::terminal::PrintPane;
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::Settings;

pub fn handle_show(args: &ShowArgs, settings: Settings) -> Result<()> {
    let mut list = open_list(settings)?;
    let row = resolve_row(&list, &args.note)?;

    let stdout = io::stdout();
    let mut pane = PrintPane::new(stdout.lock());
    list.selection_changed(row, &mut pane);
    Ok(())
}

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Internal implementation that accepts a generic editor launcher.
pub(crate) fn handle_edit_impl<E: EditorLauncher>(
    args: &EditArgs,
    settings: Settings,
    editor: &E,
) -> Result<()> {
    let mut list = open_list(settings)?;
    let row = resolve_row(&list, &args.note)?;
    let path = list
        .note_at(row)
        .map(|n| n.location().to_path_buf())
        .with_context(|| format!("note not found: '{}'", args.note))?;

    editor.open(&path)?;
    list.reload(row);

    let name = list.note_at(row).map(|n| n.display_name()).unwrap_or_default();
    println!("Edited: {}", name);
    Ok(())
}

pub fn handle_edit(args: &EditArgs, settings: Settings, config: &Config) -> Result<()> {
    struct RealEditor<'a>(&'a Config);
    impl EditorLauncher for RealEditor<'_> {
        fn open(&self, path: &Path) -> Result<()> {
            open_in_editor(path, self.0)
        }
    }
    handle_edit_impl(args, settings, &RealEditor(config))
}
