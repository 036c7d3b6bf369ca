//! Structured record assembly and encoding
//!
//! A [`LogRecord`] is built fresh for every emission, encoded to one line of
//! JSON and dropped. The reserved keys always win over caller fields.

use super::error::Result;
use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::Local;
use serde_json::{Map, Value};

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const MESSAGE_KEY: &str = "message";
pub const CALLERS_KEY: &str = "callers";

/// Keys every record carries regardless of the handle's fields
pub const RESERVED_KEYS: [&str; 4] = [LEVEL_KEY, TIME_KEY, MESSAGE_KEY, CALLERS_KEY];

/// One structured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    entries: Map<String, Value>,
}

impl LogRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Add fields whose keys are not yet present
    pub fn fill_missing(&mut self, fields: &Fields) {
        for (key, value) in fields {
            if !self.entries.contains_key(key) {
                self.entries.insert(key.clone(), value.to_json_value());
            }
        }
    }

    /// Encode as a single line of JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn into_json_value(self) -> Value {
        Value::Object(self.entries)
    }
}

/// Current local instant as integer nanoseconds since the Unix epoch
fn now_nanos() -> i64 {
    Local::now().timestamp_nanos_opt().unwrap_or_default()
}

/// Build the record for one emission
///
/// # Example
///
/// ```
/// use rust_context_logger::core::record::assemble_record;
/// use rust_context_logger::{Fields, LogLevel};
///
/// let fields = Fields::from([("message", "shadowed"), ("user", "alice")]);
/// let record = assemble_record(LogLevel::Info, "hello", Some(&fields), &[]);
///
/// assert_eq!(record.len(), 5);
/// assert_eq!(record.get("message").unwrap(), "hello");
/// ```
pub fn assemble_record(
    level: LogLevel,
    message: &str,
    fields: Option<&Fields>,
    callers: &[String],
) -> LogRecord {
    let capacity = fields.map_or(0, Fields::len) + RESERVED_KEYS.len();
    let mut entries = Map::with_capacity(capacity);

    entries.insert(LEVEL_KEY.to_string(), Value::from(level.to_str()));
    entries.insert(TIME_KEY.to_string(), Value::from(now_nanos()));
    entries.insert(MESSAGE_KEY.to_string(), Value::from(message));
    entries.insert(
        CALLERS_KEY.to_string(),
        Value::Array(callers.iter().cloned().map(Value::String).collect()),
    );

    let mut record = LogRecord { entries };
    if let Some(fields) = fields {
        record.fill_missing(fields);
    }
    record
}
