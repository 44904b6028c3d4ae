//! Dual-sink logger facade
//!
//! Every log call builds one `Record` and hands it to whichever sinks are
//! enabled. Each sink checks its own gate, so the console and file
//! thresholds move independently.
//!
//! Locking:
//! - Log calls take the slot read locks; sinks serialize their own writes.
//! - Enable/disable, path changes and close take the slot write lock, so a
//!   file handle is never swapped while an `emit` is using it.
use super::config::LoggerConfig;
use super::console::ConsoleSink;
use super::error::{LogResult, LoggerError};
use super::file::FileSink;
use super::levels::{Level, LevelGate};
use super::record::{Attr, Record};
use super::sink::Sink;
use parking_lot::RwLock;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct ConsoleSlot {
    enabled: bool,
    sink: Option<Box<dyn Sink>>,
}

struct FileSlot {
    enabled: bool,
    /// Set by `Logger::close`; the file sink cannot be reactivated afterwards
    closed: bool,
    path: PathBuf,
    sink: Option<Box<dyn Sink>>,
}

impl FileSlot {
    /// Take the sink out and close it. The slot is inactive afterwards even
    /// if the close reports an error, since the handle has been released.
    fn shut(&mut self) -> LogResult<()> {
        self.enabled = false;
        match self.sink.take() {
            Some(sink) => sink.close(),
            None => Ok(()),
        }
    }
}

pub struct Logger {
    console_gate: Arc<LevelGate>,
    file_gate: Arc<LevelGate>,
    console: RwLock<ConsoleSlot>,
    file: RwLock<FileSlot>,
}

impl Logger {
    /// Build a logger writing console output to stdout.
    ///
    /// Fails if the configuration is invalid or the log file cannot be
    /// opened; no logger is returned in that case.
    pub fn new(config: LoggerConfig) -> LogResult<Self> {
        let console_gate = Arc::new(LevelGate::new(config.console_level));
        let console = config
            .log_to_console
            .then(|| Box::new(ConsoleSink::stdout(Arc::clone(&console_gate))) as Box<dyn Sink>);
        Self::build(config, console_gate, console)
    }

    /// Build a logger whose console sink writes to `out`.
    ///
    /// The console sink always exists here; with `log_to_console` off it
    /// starts disabled and `enable_console(true)` resumes writing to `out`.
    pub fn with_console_output(
        config: LoggerConfig,
        out: impl Write + Send + 'static,
    ) -> LogResult<Self> {
        let console_gate = Arc::new(LevelGate::new(config.console_level));
        let console: Box<dyn Sink> = Box::new(ConsoleSink::new(
            Arc::clone(&console_gate),
            Box::new(out),
        ));
        Self::build(config, console_gate, Some(console))
    }

    fn build(
        config: LoggerConfig,
        console_gate: Arc<LevelGate>,
        console: Option<Box<dyn Sink>>,
    ) -> LogResult<Self> {
        config.validate()?;

        let file_gate = Arc::new(LevelGate::new(config.file_level));
        let file_sink: Option<Box<dyn Sink>> = if config.log_to_file {
            Some(Box::new(FileSink::open(
                &config.log_file_path,
                Arc::clone(&file_gate),
            )?))
        } else {
            None
        };

        Ok(Self {
            console_gate,
            file_gate,
            console: RwLock::new(ConsoleSlot {
                enabled: config.log_to_console,
                sink: console,
            }),
            file: RwLock::new(FileSlot {
                enabled: config.log_to_file,
                closed: false,
                path: config.log_file_path,
                sink: file_sink,
            }),
        })
    }

    // =========================================================================
    // LOGGING
    // =========================================================================

    pub fn debug(&self, msg: &str, attrs: &[Attr]) -> LogResult<()> {
        self.log(Level::Debug, msg, attrs)
    }

    pub fn info(&self, msg: &str, attrs: &[Attr]) -> LogResult<()> {
        self.log(Level::Info, msg, attrs)
    }

    pub fn warn(&self, msg: &str, attrs: &[Attr]) -> LogResult<()> {
        self.log(Level::Warn, msg, attrs)
    }

    pub fn error(&self, msg: &str, attrs: &[Attr]) -> LogResult<()> {
        self.log(Level::Error, msg, attrs)
    }

    /// Dispatch one record to the console sink, then the file sink.
    ///
    /// Both sinks are always attempted. If both fail, the file error is the
    /// one returned.
    pub fn log(&self, level: Level, msg: &str, attrs: &[Attr]) -> LogResult<()> {
        let record = Record::new(level, msg, attrs);

        let console_result = {
            let slot = self.console.read();
            match slot.sink.as_ref() {
                Some(sink) if slot.enabled => sink.emit(&record),
                _ => Ok(()),
            }
        };

        let file_result = {
            let slot = self.file.read();
            match slot.sink.as_ref() {
                Some(sink) if slot.enabled => sink.emit(&record),
                _ => Ok(()),
            }
        };

        file_result.and(console_result)
    }

    /// True if a record at `level` would reach at least one sink
    pub fn enabled(&self, level: Level) -> bool {
        let console = self.console.read();
        let file = self.file.read();
        let console_on = console.enabled && console.sink.as_ref().is_some_and(|s| s.enabled(level));
        let file_on = file.enabled && file.sink.as_ref().is_some_and(|s| s.enabled(level));
        console_on || file_on
    }

    // =========================================================================
    // LEVELS
    // =========================================================================

    pub fn set_console_level(&self, level: Level) {
        self.console_gate.set(level);
    }

    pub fn set_file_level(&self, level: Level) {
        self.file_gate.set(level);
    }

    pub fn console_level(&self) -> Level {
        self.console_gate.get()
    }

    pub fn file_level(&self) -> Level {
        self.file_gate.get()
    }

    // =========================================================================
    // SINK LIFECYCLE
    // =========================================================================

    /// Turn console output on or off. Enabling a logger built without a
    /// console sink creates one on stdout around the existing gate.
    pub fn enable_console(&self, enable: bool) {
        let mut slot = self.console.write();
        if enable && slot.sink.is_none() {
            slot.sink = Some(Box::new(ConsoleSink::stdout(Arc::clone(&self.console_gate))));
        }
        slot.enabled = enable;
    }

    pub fn is_console_enabled(&self) -> bool {
        let slot = self.console.read();
        slot.enabled && slot.sink.is_some()
    }

    /// Turn file output on or off.
    ///
    /// Disabling closes the handle but keeps the configured path. Enabling
    /// re-opens that path in append mode; the file threshold is kept.
    pub fn enable_file(&self, enable: bool) -> LogResult<()> {
        let mut slot = self.file.write();
        if slot.closed {
            return if enable { Err(LoggerError::Closed) } else { Ok(()) };
        }

        if !enable {
            return slot.shut();
        }
        if slot.enabled && slot.sink.is_some() {
            return Ok(());
        }

        let sink = FileSink::open(&slot.path, Arc::clone(&self.file_gate))?;
        slot.sink = Some(Box::new(sink));
        slot.enabled = true;
        Ok(())
    }

    pub fn is_file_enabled(&self) -> bool {
        let slot = self.file.read();
        slot.enabled && slot.sink.is_some()
    }

    /// Path file output goes to (or would go to, once enabled)
    pub fn file_path(&self) -> PathBuf {
        self.file.read().path.clone()
    }

    /// Point file output at a new path.
    ///
    /// While file logging is inactive only the stored path changes. While it
    /// is active the old handle is closed before the new one is opened; if
    /// any step fails, file logging is left disabled and the previous file
    /// is not reopened.
    pub fn change_file_path(&self, new_path: impl AsRef<Path>) -> LogResult<()> {
        let new_path = new_path.as_ref();
        let mut slot = self.file.write();
        if slot.closed {
            return Err(LoggerError::Closed);
        }
        if slot.path == new_path {
            return Ok(());
        }
        if !slot.enabled || slot.sink.is_none() {
            slot.path = new_path.to_path_buf();
            return Ok(());
        }

        slot.shut()?;

        let sink = FileSink::open(new_path, Arc::clone(&self.file_gate))?;
        slot.path = new_path.to_path_buf();
        slot.sink = Some(Box::new(sink));
        slot.enabled = true;
        Ok(())
    }

    /// Flush both sinks. The file sink is synced to disk.
    pub fn flush(&self) -> LogResult<()> {
        let console_result = match self.console.read().sink.as_ref() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        };
        let file_result = match self.file.read().sink.as_ref() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        };
        file_result.and(console_result)
    }

    /// Release the log file. Safe to call more than once; only the first
    /// call closes anything. Console output keeps working.
    pub fn close(&self) -> LogResult<()> {
        let mut slot = self.file.write();
        if slot.closed {
            return Ok(());
        }
        slot.closed = true;
        slot.shut()
    }

    pub fn is_closed(&self) -> bool {
        self.file.read().closed
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.file.get_mut().shut();
    }
}
