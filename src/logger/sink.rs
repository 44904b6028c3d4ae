use super::error::LogResult;
use super::levels::Level;
use super::record::Record;

/// A destination for formatted log output.
///
/// The logger only ever holds sinks behind this trait. Each sink consults its
/// own gate in `emit`, so a record is checked against the threshold in effect
/// at dispatch time.
pub trait Sink: Send + Sync {
    /// True if a record at `level` would be written
    fn enabled(&self, level: Level) -> bool;

    /// Format and write one record; a no-op when the level is gated out
    fn emit(&self, record: &Record) -> LogResult<()>;

    fn flush(&self) -> LogResult<()> {
        Ok(())
    }

    /// Release the underlying resource. Closing twice is a no-op.
    fn close(&self) -> LogResult<()> {
        Ok(())
    }
}
