//! Logging setup
//!
//! Installs a `tracing-subscriber` formatter filtered by the configured
//! directive string. `RUST_LOG` takes precedence when set.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}
