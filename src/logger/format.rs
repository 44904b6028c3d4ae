//! Line encoders for the two sinks
//!
//! Handles:
//! - Colorized console lines (`[LVL] message values...`)
//! - JSON lines for the file sink, preserving attribute order and group nesting

use super::error::LogResult;
use super::record::{has_leaves, Attr, Record, Value};
use chrono::SecondsFormat;
use serde::ser::{Serialize, SerializeMap, Serializer};

const ANSI_RESET: &str = "\x1b[0m";

/// Format a record as one console line, newline included.
///
/// Group structure is not kept: every leaf value is appended in order,
/// separated by single spaces, without its key.
pub fn console_line(record: &Record) -> String {
    let level = record.level;
    let mut line = format!(
        "[\x1b[{}m{}{}] {}",
        level.color().to_fg_str(),
        level.abbrev(),
        ANSI_RESET,
        record.message
    );

    let values = record.joined_values();
    if !values.is_empty() {
        line.push(' ');
        line.push_str(&values);
    }

    line.push('\n');
    line
}

/// Encode a record as one JSON object followed by a newline.
///
/// Keys come out as `time`, `level`, `msg`, then attributes in call order.
pub fn json_line(record: &Record) -> LogResult<String> {
    let mut line = serde_json::to_string(&JsonRecord(record))?;
    line.push('\n');
    Ok(line)
}

struct JsonRecord<'a>(&'a Record);

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(
            "time",
            &record.time.to_rfc3339_opts(SecondsFormat::Millis, false),
        )?;
        map.serialize_entry("level", record.level.as_str())?;
        map.serialize_entry("msg", &record.message)?;
        write_attrs::<S>(&mut map, &record.attrs)?;
        map.end()
    }
}

/// Writes attributes into an open map. Groups with no leaf values at any
/// depth are skipped and groups with an empty name are inlined into the
/// enclosing object.
fn write_attrs<S: Serializer>(map: &mut S::SerializeMap, attrs: &[Attr]) -> Result<(), S::Error> {
    for attr in attrs {
        match &attr.value {
            Value::Group(children) if !has_leaves(children) => {}
            Value::Group(children) if attr.key.is_empty() => write_attrs::<S>(map, children)?,
            value => map.serialize_entry(&attr.key, &JsonValue(value))?,
        }
    }
    Ok(())
}

struct JsonValue<'a>(&'a Value);

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Nanos, false))
            }
            Value::Group(children) => {
                let mut map = serializer.serialize_map(None)?;
                write_attrs::<S>(&mut map, children)?;
                map.end()
            }
        }
    }
}
