//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;
pub mod terminal;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// folio - plain-file notes
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes, optionally filtered by name or content
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// Edit a note in your editor
    Edit(EditArgs),

    /// Rename a note, keeping its extension unless --ext is given
    Rename(RenameArgs),

    /// Move a note to the trash
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note name (defaults to "Untitled Note")
    #[arg(default_value = "")]
    pub name: String,

    /// Initial content
    #[arg(short, long)]
    pub content: Option<String>,

    /// Open in editor after creation
    #[arg(short, long)]
    pub edit: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list notes whose name or content contains this text
    pub filter: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note file name or base name
    pub note: String,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note file name or base name
    pub note: String,
}

/// Arguments for the `rename` command
#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Note file name or base name
    pub note: String,

    /// New base name, without extension
    pub name: String,

    /// New extension (keeps the current one if omitted)
    #[arg(long)]
    pub ext: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Note file name or base name
    pub note: String,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
