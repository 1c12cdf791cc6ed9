//! CLI module for OpenMusic
//!
//! Provides command-line interface for:
//! - init: Create the database and songs table
//! - start: Serve the songs API over HTTP

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start};
pub use errors::{CliError, CliErrorCode, CliResult};
