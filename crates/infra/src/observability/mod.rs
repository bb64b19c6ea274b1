//! Logging setup
//!
//! Installs a global `tracing` subscriber. `RUST_LOG`, when set, overrides the
//! configured level so a single run can be made more verbose without editing
//! config.

use academy_domain::{AcademyError, LoggingConfig, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, preferring `RUST_LOG` when present.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            AcademyError::Config(format!("invalid log level '{}': {e}", config.level))
        }),
    }
}

/// Install the global subscriber.
///
/// Fails if the level does not parse or a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };

    installed.map_err(|e| AcademyError::Internal(format!("failed to install tracing subscriber: {e}")))
}
