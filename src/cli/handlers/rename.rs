//! Rename command handler.

use anyhow::{Context, Result, bail};

use super::{open_list, resolve_row};
use crate::cli::RenameArgs;
use crate::cli::output::{Output, OutputFormat, RenameResult};
use crate::controller::NoteList;
use crate::domain::Settings;
use crate::infra::{TextDecoder, Trash};

pub fn handle_rename(args: &RenameArgs, settings: Settings) -> Result<()> {
    let mut list = open_list(settings)?;
    let result = rename_in(&mut list, args)?;

    match args.format {
        OutputFormat::Human => {
            println!("Renamed '{}' to '{}'", result.old_path, result.new_path);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(result))?);
        }
        OutputFormat::Paths => {
            println!("{}", result.new_path);
        }
    }
    Ok(())
}

fn rename_in<D: TextDecoder, T: Trash>(
    list: &mut NoteList<D, T>,
    args: &RenameArgs,
) -> Result<RenameResult> {
    let row = resolve_row(list, &args.note)?;
    let old_path = list
        .note_at(row)
        .map(|n| n.location().to_string_lossy().to_string())
        .with_context(|| format!("note not found: '{}'", args.note))?;

    let base = args.name.trim();
    let renamed = match args.ext.as_deref().map(|e| e.trim().trim_start_matches('.')) {
        Some("") => list.commit_rename(row, base),
        Some(ext) => list.commit_rename(row, &format!("{base}.{ext}")),
        None => list.commit_rename_base(row, base),
    };
    if !renamed {
        bail!("failed to rename '{}' to '{}'", args.note, base);
    }

    let new_path = list
        .note_at(row)
        .map(|n| n.location().to_string_lossy().to_string())
        .with_context(|| "renamed note disappeared")?;
    Ok(RenameResult { old_path, new_path })
}
