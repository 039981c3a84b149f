//! Remove command handler.

use anyhow::{Result, bail};
use std::io;

use super::{open_list_with, resolve_row};
use crate::cli::RemoveArgs;
use crate::cli::config::Config;
use crate::cli::terminal::{AssumeYes, PromptConfirm, TraceView};
use crate::controller::{Confirm, DeleteOutcome, EditorPane, NoteList};
use crate::domain::{NoteRecord, Settings};
use crate::infra::{DirectoryTrash, FileDecoder, SystemTrash, TextDecoder, Trash};

/// The command line has no detail pane to keep in sync.
struct NoPane;

impl EditorPane for NoPane {
    fn show(&mut self, _note: &NoteRecord) {}
    fn clear(&mut self) {}
}

pub fn handle_remove(args: &RemoveArgs, settings: Settings, config: &Config) -> Result<()> {
    let outcome = match &config.trash_dir {
        Some(dir) => {
            let mut list = open_list_with(settings, FileDecoder, DirectoryTrash::new(dir))?;
            remove_in(&mut list, args)?
        }
        None => {
            let mut list = open_list_with(settings, FileDecoder, SystemTrash)?;
            remove_in(&mut list, args)?
        }
    };

    match outcome {
        DeleteOutcome::Removed { name } => println!("Moved '{}' to the trash", name),
        DeleteOutcome::Cancelled => println!("Cancelled"),
        DeleteOutcome::Failed { name, error } => {
            bail!("failed to move '{}' to the trash: {}", name, error)
        }
        DeleteOutcome::NoSelection => bail!("note not found: '{}'", args.note),
    }
    Ok(())
}

fn remove_in<D: TextDecoder, T: Trash>(
    list: &mut NoteList<D, T>,
    args: &RemoveArgs,
) -> Result<DeleteOutcome> {
    let row = resolve_row(list, &args.note)?;

    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::new(io::stdin().lock(), io::stderr()))
    };
    Ok(remove_row(list, row, confirm.as_mut()))
}

fn remove_row<D: TextDecoder, T: Trash>(
    list: &mut NoteList<D, T>,
    row: usize,
    confirm: &mut dyn Confirm,
) -> DeleteOutcome {
    list.handle_delete(row, confirm, &mut NoPane, &mut TraceView)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn list(dir: &TempDir) -> NoteList<FileDecoder, DirectoryTrash> {
        open_list_with(
            Settings::new(dir.path()),
            FileDecoder,
            DirectoryTrash::new(dir.path().join(".trash")),
        )
        .unwrap()
    }

    #[test]
    fn assumed_yes_moves_note_to_trash() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Gone.md"), "bye").unwrap();
        let mut list = list(&dir);
        let args = RemoveArgs {
            note: "Gone".to_string(),
            yes: true,
        };

        let outcome = remove_in(&mut list, &args).unwrap();

        assert!(matches!(outcome, DeleteOutcome::Removed { ref name } if name == "Gone.md"));
        assert!(!dir.path().join("Gone.md").exists());
        assert!(dir.path().join(".trash/Gone.md").exists());
        assert!(list.is_empty());
    }

    #[test]
    fn declined_prompt_keeps_note() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Keep.md"), "stay").unwrap();
        let mut list = list(&dir);
        let mut out = Vec::new();
        let mut confirm = PromptConfirm::new(Cursor::new("n\n"), &mut out);

        let outcome = remove_row(&mut list, 0, &mut confirm);

        assert!(matches!(outcome, DeleteOutcome::Cancelled));
        assert!(dir.path().join("Keep.md").exists());
    }

    #[test]
    fn unknown_note_is_an_error() {
        let dir = TempDir::new().unwrap();
        let args = RemoveArgs {
            note: "Nothing".to_string(),
            yes: true,
        };

        assert!(remove_in(&mut list(&dir), &args).is_err());
    }
}
