//! folio - plain-file notes with a selectable, filterable note list

pub mod cli;
pub mod controller;
pub mod domain;
pub mod infra;
pub mod storage;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_edit, handle_list, handle_new, handle_remove, handle_rename, handle_show},
};

/// Default log filter for a `-v` count; `RUST_LOG` takes precedence.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = env_logger::Env::default().default_filter_or(log_filter(cli.verbose));
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "folio", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let settings = config.settings(config.notes_dir(cli.dir.as_ref()));

    match &cli.command {
        Command::New(args) => handle_new(args, settings, &config),
        Command::List(args) => handle_list(args, settings),
        Command::Show(args) => handle_show(args, settings),
        Command::Edit(args) => handle_edit(args, settings, &config),
        Command::Rename(args) => handle_rename(args, settings),
        Command::Remove(args) => handle_remove(args, settings, &config),
        Command::Completions(_) => Ok(()),
    }
}
