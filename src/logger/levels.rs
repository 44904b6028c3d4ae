//! Log level definitions and the per-sink severity gate
//!
//! Levels are ordered by severity (Debug < Info < Warn < Error).
//! A sink emits a record when `record.level >= gate.get()`.
use super::error::LoggerError;
use colored::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    Debug = 0, // Detailed diagnostics
    #[default]
    Info = 1, // Standard operational messages
    Warn = 2,  // Issues that need attention
    Error = 3, // Failures
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

    /// Full name, as written to structured output
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Three letter label used by the console sink
    pub fn abbrev(&self) -> &'static str {
        match self {
            Level::Debug => "DBG",
            Level::Info => "INF",
            Level::Warn => "WRN",
            Level::Error => "ERR",
        }
    }

    /// Console color for this level
    pub fn color(&self) -> Color {
        match self {
            Level::Debug => Color::Magenta,
            Level::Info => Color::Blue,
            Level::Warn => Color::Yellow,
            Level::Error => Color::Red,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            _ => Level::Error,
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" | "TRACE" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            _ => Err(LoggerError::ParseLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str().to_lowercase())
    }
}

/// Accepts every spelling `FromStr` does, so config files may write
/// `"WARN"`, `"warning"` or `"Debug"`.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Mutable minimum-severity threshold shared between a `Logger` and one sink.
///
/// Reads and writes are lock-free. A `set` is visible to the next `get` on any
/// thread; gates are independent of each other.
#[derive(Debug)]
pub struct LevelGate {
    level: AtomicU8,
}

impl LevelGate {
    pub fn new(level: Level) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
        }
    }

    pub fn get(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Acquire))
    }

    pub fn set(&self, level: Level) {
        self.level.store(level as u8, Ordering::Release);
    }

    /// True if a record at `level` passes this gate right now
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.get()
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_gate_passes_iff_at_or_above_threshold() {
        let gate = LevelGate::default();
        for threshold in Level::ALL {
            gate.set(threshold);
            for level in Level::ALL {
                assert_eq!(gate.enabled(level), level >= threshold, "{level} vs {threshold}");
            }
        }
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("TRACE".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" error ".parse::<Level>().unwrap(), Level::Error);
        assert!(matches!("loud".parse::<Level>(), Err(LoggerError::ParseLevel(s)) if s == "loud"));
    }

    #[test]
    fn test_labels_and_colors() {
        let labels: Vec<_> = Level::ALL.iter().map(|l| l.abbrev()).collect();
        assert_eq!(labels, ["DBG", "INF", "WRN", "ERR"]);
        assert_eq!(Level::Debug.color().to_fg_str(), "35");
        assert_eq!(Level::Info.color().to_fg_str(), "34");
        assert_eq!(Level::Warn.color().to_fg_str(), "33");
        assert_eq!(Level::Error.color().to_fg_str(), "31");
    }

    #[test]
    fn test_gate_updates_visible_across_threads() {
        let gate = Arc::new(LevelGate::new(Level::Debug));
        let writer = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                for _ in 0..1000 {
                    for level in Level::ALL {
                        gate.set(level);
                    }
                }
                gate.set(Level::Warn);
            })
        };
        for _ in 0..1000 {
            // Every observed value is one of the four levels
            assert!(Level::ALL.contains(&gate.get()));
        }
        writer.join().unwrap();
        assert_eq!(gate.get(), Level::Warn);
    }
}
