//! Dual-sink structured logger: colored console lines and JSON-lines files,
//! each behind its own runtime-adjustable level.

pub mod logger;

pub use logger::{Attr, Level, LogResult, Logger, LoggerConfig, LoggerError};
