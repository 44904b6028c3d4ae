use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the logger and its sinks.
///
/// Nothing in this crate panics or exits on I/O trouble; every failure comes
/// back to the caller as one of these.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("failed to create directory for log file {path}: {source}")] CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {path}: {source}")] OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to close existing log file {path}: {source}")] CloseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{sink} sink write failed: {source}")] Write {
        sink: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{sink} sink flush failed: {source}")] Flush {
        sink: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode log record: {0}")] Encode(#[from] serde_json::Error),

    #[error("invalid logger configuration: {0}")] InvalidConfig(String),

    #[error("failed to parse logger configuration: {0}")] Config(#[from] toml::de::Error),

    #[error("unknown log level: {0:?}")] ParseLevel(String),

    #[error("failed to install log bridge: {0}")] InstallBridge(#[from] log::SetLoggerError),

    #[error("sink is closed")]
    SinkClosed,

    #[error("logger is closed")]
    Closed,
}

pub type LogResult<T> = std::result::Result<T, LoggerError>;
