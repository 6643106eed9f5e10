//! CLI command implementations
//!
//! Each command loads its configuration, installs logging, then does one
//! thing. `serve` is the only long-running command.

use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::config::{Config, StorageConfig};
use crate::http_server::HttpServer;
use crate::logging::init_logging;
use crate::store::{self, FileStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_json, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => {
            let mut config = Config::load_or_default(config.as_deref())?;
            if let Some(host) = host {
                config.http.host = host;
            }
            if let Some(port) = port {
                config.http.port = port;
            }
            serve(config)
        }
        Command::Init { config } => init(&config),
        Command::Dump { config } => dump(Config::load_or_default(config.as_deref())?),
    }
}

/// Open the configured store and serve the HTTP API until Ctrl-C
pub fn serve(config: Config) -> CliResult<()> {
    config.validate()?;
    init_logging(&config.log_filter);

    let store = store::open(&config.storage)?;
    let server = HttpServer::new(config.http.clone(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Create the data directory and an empty customer log
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.log_filter);

    let StorageConfig::File { data_dir } = &config.storage else {
        return Err(CliError::config_error(
            "init requires storage.backend = \"file\"",
        ));
    };

    let store = FileStore::open(data_dir)?;
    info!(path = %store.path().display(), "initialized customer log");

    write_response(json!({
        "initialized": true,
        "path": store.path().display().to_string(),
        "customers": store.len()?,
    }))
}

/// Print every stored customer, sorted by name then id
pub fn dump(config: Config) -> CliResult<()> {
    init_logging(&config.log_filter);

    let store = store::open(&config.storage)?;
    let mut customers = store.find_all()?;
    customers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    write_json(&customers)
}
