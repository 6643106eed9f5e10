//! # Configuration
//!
//! customerdb is configured from a single JSON file. Every field has a
//! default, so an empty object `{}` is a valid configuration. Spelled out,
//! the defaults are:
//!
//! ```json
//! {
//!   "http": {
//!     "host": "0.0.0.0",
//!     "port": 3000,
//!     "cors_origins": ["http://localhost:3000", "http://127.0.0.1:3000"]
//!   },
//!   "storage": { "backend": "file", "data_dir": "./data" },
//!   "log_filter": "customerdb=info,tower_http=info"
//! }
//! ```
//!
//! Setting `cors_origins` to `[]` allows requests from any origin.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::http_server::HttpServerConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Where customers are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Volatile, lost on exit
    Memory,
    /// Append-only record log under `data_dir`
    File {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            data_dir: default_data_dir(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Default `tracing` filter. `RUST_LOG` overrides it.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "customerdb=info,tower_http=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            storage: StorageConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Invalid("http.host must not be empty".to_string()));
        }

        if let StorageConfig::File { data_dir } = &self.storage {
            if data_dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "storage.data_dir must not be empty".to_string(),
                ));
            }
        }

        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            ConfigError::Invalid(format!("log_filter '{}': {}", self.log_filter, e))
        })?;

        Ok(())
    }
}
