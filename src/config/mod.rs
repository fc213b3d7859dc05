//! Layered configuration for primesum
//!
//! Values are resolved lowest to highest: built-in defaults, a TOML file,
//! `PRIMESUM_*` environment variables, then command-line flags.

use crate::coordinator::{RunOptions, DEFAULT_MAX_THREADS};
use crate::error::{ErrorCode, PrimesumError, Result};
use crate::partition::PartitionStrategy;
use crate::report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;

pub use loader::{ConfigLoader, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimesumConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    #[serde(default)]
    pub log_level: Option<String>,

    /// Upper bound on the number of workers a run may request
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,

    #[serde(default)]
    pub partition: PartitionStrategy,

    #[serde(default)]
    pub format: OutputFormat,

    /// Suppress per-worker lines in text output
    #[serde(default)]
    pub quiet: bool,

    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_max_threads() -> usize {
    DEFAULT_MAX_THREADS
}

impl Default for PrimesumConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            max_threads: default_max_threads(),
            partition: PartitionStrategy::default(),
            format: OutputFormat::default(),
            quiet: false,
            source: None,
        }
    }
}

impl PrimesumConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay `PRIMESUM_*` variables supplied by `lookup`
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRIMESUM_LOG_LEVEL") {
            self.log_level = Some(level);
        }

        if let Some(max_threads) = lookup("PRIMESUM_MAX_THREADS") {
            self.max_threads = max_threads.trim().parse::<usize>().map_err(|e| {
                invalid_value(format!(
                    "PRIMESUM_MAX_THREADS must be a positive integer, got '{}'",
                    max_threads
                ))
                .with_source(e)
            })?;
        }

        if let Some(partition) = lookup("PRIMESUM_PARTITION") {
            self.partition = partition.parse()?;
        }

        if let Some(format) = lookup("PRIMESUM_FORMAT") {
            self.format = match format.trim().to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                other => {
                    return Err(invalid_value(format!(
                        "PRIMESUM_FORMAT must be text or json, got '{}'",
                        other
                    )))
                }
            };
        }

        if let Some(quiet) = lookup("PRIMESUM_QUIET") {
            self.quiet = quiet.trim().parse::<bool>().map_err(|e| {
                invalid_value(format!("PRIMESUM_QUIET must be true or false, got '{}'", quiet))
                    .with_source(e)
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_threads == 0 {
            return Err(invalid_value("max_threads must be at least 1"));
        }
        if let Some(level) = &self.log_level {
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(invalid_value(format!(
                    "log_level '{}' is not one of {}",
                    level,
                    VALID_LOG_LEVELS.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            strategy: self.partition,
            max_threads: self.max_threads,
        }
    }
}

fn invalid_value(message: impl Into<String>) -> PrimesumError {
    PrimesumError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, message, None)
}
