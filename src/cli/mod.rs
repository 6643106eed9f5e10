//! CLI module for customerdb
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP API
//! - init: Create the data directory for the file backend
//! - dump: Print every stored customer as JSON

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{dump, init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_response};
