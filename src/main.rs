//! customerdb CLI entry point
//!
//! All logic is delegated to the CLI module; errors are printed to stderr
//! and the process exits non-zero.

use customerdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
