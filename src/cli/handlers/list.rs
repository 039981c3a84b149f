//! List command handler.

use anyhow::Result;

use super::{open_list, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Settings;

pub fn handle_list(args: &ListArgs, settings: Settings) -> Result<()> {
    let mut list = open_list(settings)?;
    if let Some(filter) = &args.filter {
        list.refresh(filter);
    }

    let settings = list.storage().settings();
    let rows = list.rows();

    match args.format {
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("No notes found.");
            } else {
                println!("{:<8}  {:<40}  {}", "Modified", "Name", "Preview");
                println!(
                    "{:<8}  {:<40}  {}",
                    "--------",
                    "----------------------------------------",
                    "--------------------"
                );

                for note in &rows {
                    let modified = note.date_label().unwrap_or_else(|| "-".to_string());
                    let name = truncate_str(note.display_name(), 40);
                    let preview = truncate_str(&note.preview_text(settings), 60);
                    println!("{:<8}  {:<40}  {}", modified, name, preview);
                }

                println!();
                println!("{} note(s)", rows.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = rows
                .iter()
                .map(|n| NoteListing::from_record(n, settings))
                .collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for note in &rows {
                println!("{}", note.location().display());
            }
        }
    }

    Ok(())
}
