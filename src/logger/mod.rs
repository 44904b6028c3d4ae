//! Dual-sink structured logging
//!
//! Every log call is routed independently to:
//! - a colorized console sink (`[INF] message values...`)
//! - a JSON-lines file sink (`{"time":...,"level":"INFO","msg":...}`)
//!
//! Each sink has its own severity threshold that can be changed at runtime,
//! and each can be switched on and off without losing that threshold. The
//! file sink can be pointed at a new path while the program runs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use duallog::logger::{Attr, Level, Logger, LoggerConfig};
//!
//! let logger = Logger::new(
//!     LoggerConfig::default()
//!         .with_file("logs/app.log")
//!         .with_file_level(Level::Debug),
//! )?;
//!
//! logger.debug("cache primed", &[])?; // file only
//! logger.info("listening", &[Attr::new("port", 8080)])?; // console and file
//!
//! logger.set_file_level(Level::Warn);
//! logger.enable_console(false);
//! logger.change_file_path("logs/app.log.1")?;
//! logger.close()?;
//! # Ok::<(), duallog::logger::LoggerError>(())
//! ```

mod bridge;
mod config;
mod console;
mod core;
mod error;
mod file;
mod format;
mod levels;
mod record;
mod sink;


// Re-export public types
pub use bridge::LogBridge;
pub use config::{LoggerConfig, DEFAULT_LOG_FILE};
pub use console::ConsoleSink;
pub use core::Logger;
pub use error::{LogResult, LoggerError};
pub use file::FileSink;
pub use format::{console_line, json_line};
pub use levels::{Level, LevelGate};
pub use record::{Attr, Record, Value};
pub use sink::Sink;
