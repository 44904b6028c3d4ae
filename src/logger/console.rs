//! Colored console sink

use super::error::{LogResult, LoggerError};
use super::format::console_line;
use super::levels::{Level, LevelGate};
use super::record::Record;
use super::sink::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes one colored line per record to a shared stream.
///
/// Each line goes out in a single `write_all` under the sink's lock, so
/// concurrent callers never interleave partial lines.
pub struct ConsoleSink {
    gate: Arc<LevelGate>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new(gate: Arc<LevelGate>, out: Box<dyn Write + Send>) -> Self {
        Self {
            gate,
            out: Mutex::new(out),
        }
    }

    pub fn stdout(gate: Arc<LevelGate>) -> Self {
        Self::new(gate, Box::new(io::stdout()))
    }
}

impl Sink for ConsoleSink {
    fn enabled(&self, level: Level) -> bool {
        self.gate.enabled(level)
    }

    fn emit(&self, record: &Record) -> LogResult<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let line = console_line(record);
        let mut out = self.out.lock();
        out.write_all(line.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| LoggerError::Write {
                sink: "console",
                source,
            })
    }

    fn flush(&self) -> LogResult<()> {
        self.out.lock().flush().map_err(|source| LoggerError::Flush {
            sink: "console",
            source,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logger::record::Attr;
    use std::thread;

    /// In-memory stream that tests can read back after handing a clone to a sink.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(pub(crate) Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.contents().lines().map(str::to_string).collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Stream whose every write fails like a closed pipe.
    pub(crate) struct BrokenStream;

    impl Write for BrokenStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_respects_gate_at_emit_time() {
        let buf = SharedBuf::default();
        let gate = Arc::new(LevelGate::new(Level::Warn));
        let sink = ConsoleSink::new(Arc::clone(&gate), Box::new(buf.clone()));

        let record = Record::new(Level::Info, "queued", &[]);
        sink.emit(&record).unwrap();
        assert!(buf.contents().is_empty());

        // Same record, threshold lowered after it was built
        gate.set(Level::Info);
        sink.emit(&record).unwrap();
        assert_eq!(buf.contents(), "[\x1b[34mINF\x1b[0m] queued\n");
    }

    #[test]
    fn test_write_failure_is_returned() {
        let sink = ConsoleSink::new(Arc::new(LevelGate::default()), Box::new(BrokenStream));
        let err = sink.emit(&Record::new(Level::Error, "boom", &[])).unwrap_err();
        assert!(matches!(err, LoggerError::Write { sink: "console", .. }));
    }

    #[test]
    fn test_concurrent_emits_produce_whole_lines() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 200;

        let buf = SharedBuf::default();
        let sink = Arc::new(ConsoleSink::new(
            Arc::new(LevelGate::new(Level::Debug)),
            Box::new(buf.clone()),
        ));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        let attrs = [Attr::new("thread", t), Attr::new("seq", i)];
                        sink.emit(&Record::new(Level::Info, "tick", &attrs)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = buf.lines();
        assert_eq!(lines.len(), THREADS * PER_THREAD);
        for line in &lines {
            assert!(line.starts_with("[\x1b[34mINF\x1b[0m] tick "), "torn line: {line:?}");
            assert_eq!(line.split(' ').count(), 4, "torn line: {line:?}");
        }
    }
}
