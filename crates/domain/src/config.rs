//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_LOOKUP_BATCH_SIZE};
use crate::{AcademyError, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Reconciliation batch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Number of per-student lookups allowed in flight at once.
    pub lookup_batch_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Reject values the services cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(AcademyError::Config("database path must not be empty".into()));
        }
        if self.database.pool_size == 0 {
            return Err(AcademyError::Config("database pool size must be at least 1".into()));
        }
        if self.reconciliation.lookup_batch_size == 0 {
            return Err(AcademyError::Config("lookup batch size must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "academy.db".to_string(),
                pool_size: DEFAULT_DB_POOL_SIZE,
            },
            reconciliation: ReconciliationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self { lookup_batch_size: DEFAULT_LOOKUP_BATCH_SIZE }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
