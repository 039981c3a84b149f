//! Terminal implementations of the list controller's collaborators.

use std::io::{BufRead, Write};

use log::debug;

use crate::controller::{Confirm, DeletePrompt, EditorPane, ListView};
use crate::domain::NoteRecord;

/// Asks on a terminal and accepts `y` or `yes` (any case).
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &DeletePrompt) -> bool {
        let asked = writeln!(self.output, "{}", prompt.message)
            .and_then(|_| writeln!(self.output, "{}", prompt.detail))
            .and_then(|_| write!(self.output, "{}? [y/N] ", prompt.accept))
            .and_then(|_| self.output.flush());
        if asked.is_err() {
            return false;
        }

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirms without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, prompt: &DeletePrompt) -> bool {
        debug!("confirmed without asking: {}", prompt.message);
        true
    }
}

/// Editor pane that prints the note to a writer.
pub struct PrintPane<W> {
    output: W,
}

impl<W: Write> PrintPane<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> EditorPane for PrintPane<W> {
    fn show(&mut self, note: &NoteRecord) {
        let content = note.content();
        let written = if content.ends_with('\n') || content.is_empty() {
            write!(self.output, "{content}")
        } else {
            writeln!(self.output, "{content}")
        };
        if let Err(e) = written {
            debug!("failed to print {}: {}", note.display_name(), e);
        }
    }

    fn clear(&mut self) {}
}

/// List view that has nothing on screen; it only traces what it is told.
pub struct TraceView;

impl ListView for TraceView {
    fn reload(&mut self, rows: &[&NoteRecord]) {
        debug!("list now has {} rows", rows.len());
    }

    fn select(&mut self, row: Option<usize>) {
        debug!("selected row {:?}", row);
    }
}
