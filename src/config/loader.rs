use super::PrimesumConfig;
use crate::error::{ErrorCode, PrimesumError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "PRIMESUM_CONFIG";

/// File picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "primesum.toml";

/// Resolves and loads the configuration file, then applies the environment
pub struct ConfigLoader {
    base_dir: PathBuf,
    explicit_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            explicit_path: None,
        }
    }

    /// Use this file instead of searching; it must exist
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    /// Load using the real process environment
    pub fn load(&self) -> Result<PrimesumConfig> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for every environment variable
    pub fn load_with<F>(&self, lookup: F) -> Result<PrimesumConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.resolve_path(&lookup)? {
            Some(path) => {
                let mut config = read_config_file(&path)?;
                config.source = Some(path);
                config
            }
            None => PrimesumConfig::default(),
        };

        config.merge_env_with(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn resolve_path<F>(&self, lookup: &F) -> Result<Option<PathBuf>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let requested = self
            .explicit_path
            .clone()
            .or_else(|| lookup(CONFIG_ENV_VAR).map(PathBuf::from));

        if let Some(path) = requested {
            let path = if path.is_relative() {
                self.base_dir.join(path)
            } else {
                path
            };
            if !path.exists() {
                return Err(PrimesumError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    "Configuration file not found",
                    Some(path),
                ));
            }
            return Ok(Some(path));
        }

        let default_path = self.base_dir.join(DEFAULT_CONFIG_FILE);
        Ok(default_path.exists().then_some(default_path))
    }
}

fn read_config_file(path: &Path) -> Result<PrimesumConfig> {
    let content = fs::read_to_string(path).map_err(|e| PrimesumError::from(e).with_path(path))?;
    PrimesumConfig::from_toml_str(&content).map_err(|e| e.with_path(path))
}
