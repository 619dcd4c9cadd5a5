//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe storage location, logging, and placeholder naming in one value.
//! - Load that value from JSON with every field defaulted.
//!
//! # Invariants
//! - Placeholder prefixes are never blank.
//! - `log_dir`, when set, is absolute.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_UNTITLED_DOCUMENT_PREFIX: &str = "untitled";
const DEFAULT_UNNAMED_FOLDER_PREFIX: &str = "unnamed";

/// Errors from config loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Settings shared by the storage boundary and the logging bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Rolling log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub untitled_document_prefix: String,
    pub unnamed_folder_prefix: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            untitled_document_prefix: DEFAULT_UNTITLED_DOCUMENT_PREFIX.to_string(),
            unnamed_folder_prefix: DEFAULT_UNNAMED_FOLDER_PREFIX.to_string(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON document. Missing keys take defaults.
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(value).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.untitled_document_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "untitled_document_prefix must not be blank".to_string(),
            ));
        }
        if self.unnamed_folder_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "unnamed_folder_prefix must not be blank".to_string(),
            ));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    log_dir.display()
                )));
            }
        }
        Ok(())
    }
}
