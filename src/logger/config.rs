//! Logger configuration
//!
//! Every field has a default, so a TOML fragment only needs the keys it
//! wants to change:
//!
//! ```toml
//! log_to_file = true
//! log_file_path = "logs/app.log"
//! console_level = "info"
//! file_level = "debug"
//! ```
use super::error::{LogResult, LoggerError};
use super::levels::Level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logs/app.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_to_console: bool,
    pub log_to_file: bool,
    /// Relative or absolute; parent directories are created on demand
    pub log_file_path: PathBuf,
    pub console_level: Level,
    pub file_level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_to_console: true,
            log_to_file: false,
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
            console_level: Level::Info,
            file_level: Level::Info,
        }
    }
}

impl LoggerConfig {
    pub fn from_toml_str(text: &str) -> LogResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.log_to_console = enabled;
        self
    }

    /// Turn file logging on, writing to `path`
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_to_file = true;
        self.log_file_path = path.into();
        self
    }

    pub fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    pub fn with_file_level(mut self, level: Level) -> Self {
        self.file_level = level;
        self
    }

    pub fn validate(&self) -> LogResult<()> {
        if self.log_to_file && self.log_file_path.as_os_str().is_empty() {
            return Err(LoggerError::InvalidConfig(
                "log_to_file is set but log_file_path is empty".to_string(),
            ));
        }
        Ok(())
    }
}
