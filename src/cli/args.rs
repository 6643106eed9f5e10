//! CLI argument definitions using clap
//!
//! Commands:
//! - customerdb serve [--config <path>] [--host <host>] [--port <port>]
//! - customerdb init --config <path>
//! - customerdb dump [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// customerdb - customer records over a JSON API
#[derive(Parser, Debug)]
#[command(name = "customerdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create the data directory for the file backend
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./customerdb.json")]
        config: PathBuf,
    },

    /// Print all stored customers as a JSON array
    Dump {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["customerdb", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, host, port } => {
                assert!(config.is_none());
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_default_config_path() {
        let cli = Cli::try_parse_from(["customerdb", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => assert_eq!(config, PathBuf::from("./customerdb.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["customerdb", "serve", "--port", "99999"]).is_err());
    }
}
