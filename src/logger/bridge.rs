//! Routes the `log` crate macros into a `Logger`
//!
//! ```rust,ignore
//! let logger = Arc::new(Logger::new(LoggerConfig::default())?);
//! LogBridge::install(Arc::clone(&logger), log::LevelFilter::Debug)?;
//! log::info!(target: "api", "listening on {}", port);
//! ```

use super::core::Logger;
use super::error::LogResult;
use super::levels::Level;
use super::record::Attr;
use std::sync::Arc;

pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Register as the process-wide `log` backend. Only the first call in a
    /// process succeeds.
    pub fn install(logger: Arc<Logger>, max_level: log::LevelFilter) -> LogResult<()> {
        log::set_boxed_logger(Box::new(Self::new(logger)))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Trace has no counterpart and is folded into Debug
    pub fn map_level(level: log::Level) -> Level {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logger.enabled(Self::map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = Self::map_level(record.level());
        let message = record.args().to_string();
        // `log` has no error channel; sink failures stop here
        let _ = self
            .logger
            .log(level, &message, &[Attr::new("target", record.target())]);
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::LoggerConfig;
    use crate::logger::console::tests::SharedBuf;
    use log::Log;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogBridge::map_level(log::Level::Trace), Level::Debug);
        assert_eq!(LogBridge::map_level(log::Level::Debug), Level::Debug);
        assert_eq!(LogBridge::map_level(log::Level::Info), Level::Info);
        assert_eq!(LogBridge::map_level(log::Level::Warn), Level::Warn);
        assert_eq!(LogBridge::map_level(log::Level::Error), Level::Error);
    }

    #[test]
    fn test_log_records_reach_console_with_target() {
        let buf = SharedBuf::default();
        let logger = Arc::new(
            Logger::with_console_output(LoggerConfig::default(), buf.clone()).unwrap(),
        );
        let bridge = LogBridge::new(Arc::clone(&logger));

        bridge.log(
            &log::Record::builder()
                .args(format_args!("cache warmed in {}ms", 40))
                .level(log::Level::Info)
                .target("cache")
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .args(format_args!("hidden"))
                .level(log::Level::Trace)
                .target("cache")
                .build(),
        );

        assert_eq!(buf.lines(), ["[\x1b[34mINF\x1b[0m] cache warmed in 40ms cache"]);
    }

    #[test]
    fn test_enabled_follows_console_gate() {
        let logger = Arc::new(
            Logger::with_console_output(LoggerConfig::default(), SharedBuf::default()).unwrap(),
        );
        let bridge = LogBridge::new(Arc::clone(&logger));
        let debug = log::Metadata::builder().level(log::Level::Debug).build();

        assert!(!bridge.enabled(&debug));
        logger.set_console_level(Level::Debug);
        assert!(bridge.enabled(&debug));
    }
}
