//! JSON-lines file sink and log file handling
//!
//! The sink owns the open handle. `close` takes it out of the lock, so the
//! handle is released exactly once and later writes fail with `SinkClosed`.

use super::error::{LogResult, LoggerError};
use super::format::json_line;
use super::levels::{Level, LevelGate};
use super::record::Record;
use super::sink::Sink;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Appends one JSON object per record to a log file.
pub struct FileSink {
    gate: Arc<LevelGate>,
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    /// Create missing parent directories, then open `path` for appending.
    pub fn open(path: impl AsRef<Path>, gate: Arc<LevelGate>) -> LogResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_log_file(&path)?;
        Ok(Self {
            gate,
            path,
            file: Mutex::new(Some(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.lock().is_none()
    }
}

impl Sink for FileSink {
    fn enabled(&self, level: Level) -> bool {
        self.gate.enabled(level)
    }

    fn emit(&self, record: &Record) -> LogResult<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let line = json_line(record)?;
        let mut guard = self.file.lock();
        let file = guard.as_mut().ok_or(LoggerError::SinkClosed)?;
        file.write_all(line.as_bytes())
            .map_err(|source| LoggerError::Write { sink: "file", source })
    }

    fn flush(&self) -> LogResult<()> {
        match self.file.lock().as_ref() {
            Some(file) => file
                .sync_data()
                .map_err(|source| LoggerError::Flush { sink: "file", source }),
            None => Ok(()),
        }
    }

    fn close(&self) -> LogResult<()> {
        // Taken under the lock; the handle drops at the end of this call
        let Some(file) = self.file.lock().take() else {
            return Ok(());
        };
        file.sync_all().map_err(|source| LoggerError::CloseFile {
            path: self.path.clone(),
            source,
        })
    }
}

/// Create the parent directory chain (0755) and open the file in append mode (0666).
pub fn open_log_file(path: &Path) -> LogResult<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_log_dir(dir).map_err(|source| LoggerError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }

    options.open(path).map_err(|source| LoggerError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}

fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}
