//! Log records and their structured attributes
//!
//! A `Record` is built fresh for each log call and lives only for the
//! duration of one dispatch.

use super::levels::Level;
use chrono::{DateTime, Local, SecondsFormat, Utc};

/// An attribute value. `Group` nests further attributes under the owning key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Local>),
    Group(Vec<Attr>),
}

/// One key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A named group of attributes. An empty name inlines the attributes
    /// into the parent in structured output.
    pub fn group(name: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: name.into(),
            value: Value::Group(attrs),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::Millis, false)),
            Value::Group(attrs) => write!(f, "{}", join_leaves(attrs)),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

macro_rules! value_from {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

value_from!(Int, i64, i8, i16, i32, i64, isize);
value_from!(Uint, u64, u8, u16, u32, u64, usize);
value_from!(Float, f64, f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(v: DateTime<Local>) -> Self {
        Value::Time(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v.with_timezone(&Local))
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Value::Group(v)
    }
}

/// One structured log event.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>, attrs: &[Attr]) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            attrs: attrs.to_vec(),
        }
    }

    /// Leaf values in attribute order, descending into groups.
    /// Keys and group names are dropped.
    pub fn flattened_values(&self) -> Vec<&Value> {
        let mut leaves = Vec::new();
        collect_leaves(&self.attrs, &mut leaves);
        leaves
    }

    /// Leaf values rendered and joined by single spaces; empty without attributes
    pub fn joined_values(&self) -> String {
        join_leaves(&self.attrs)
    }
}

/// True if any attribute, at any depth, carries a non-group value
pub(crate) fn has_leaves(attrs: &[Attr]) -> bool {
    attrs.iter().any(|attr| match &attr.value {
        Value::Group(children) => has_leaves(children),
        _ => true,
    })
}

fn join_leaves(attrs: &[Attr]) -> String {
    let mut leaves = Vec::new();
    collect_leaves(attrs, &mut leaves);
    let rendered: Vec<String> = leaves.iter().map(|v| v.to_string()).collect();
    rendered.join(" ")
}

fn collect_leaves<'a>(attrs: &'a [Attr], out: &mut Vec<&'a Value>) {
    for attr in attrs {
        match &attr.value {
            Value::Group(children) => collect_leaves(children, out),
            leaf => out.push(leaf),
        }
    }
}
