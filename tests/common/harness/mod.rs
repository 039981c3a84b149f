//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments with their own config file and
//! trash directory, and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;

#[allow(unused_imports)]
pub use command::FolioCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
