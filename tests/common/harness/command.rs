//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `folio` binary.
pub struct FolioCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
    stdin: Option<String>,
}

impl FolioCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
            stdin: None,
        }
    }

    /// Sets the `--dir` option to specify the notes directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `FOLIO_CONFIG` at `path`.
    pub fn config(mut self, path: &Path) -> Self {
        self.config = Some(path.to_path_buf());
        self
    }

    /// Feeds `input` on stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("folio").expect("Failed to find folio binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        if let Some(config) = &self.config {
            cmd.env("FOLIO_CONFIG", config);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    pub fn new_note(self, name: &str) -> Self {
        self.args(["new", name])
    }

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    pub fn rename(self, note: &str, name: &str) -> Self {
        self.args(["rename", note, name])
    }

    pub fn rm(self, note: &str) -> Self {
        self.args(["rm", note])
    }

    // ===========================================
    // Format Options
    // ===========================================

    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for FolioCommand {
    fn default() -> Self {
        Self::new()
    }
}
