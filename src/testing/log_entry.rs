use crate::core::customizer::MESSAGE_FIELD;
use crate::domain::model::{Cause, Level, StructuredEntry};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    level: Level,
    message: BTreeMap<String, Value>,
    cause: Option<Cause>,
}

impl LogEntry {
    /// An entry holding just a text message.
    pub fn new(level: Level, message: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(MESSAGE_FIELD.to_string(), Value::String(message.to_string()));
        Self {
            level,
            message: map,
            cause: None,
        }
    }

    /// An entry from an already structured message.
    pub fn from_map(level: Level, message: StructuredEntry, cause: Option<Cause>) -> Self {
        Self {
            level,
            message: message.into_iter().collect(),
            cause,
        }
    }

    /// Add a key-value pair to the expected message.
    ///
    /// # Panics
    ///
    /// If `value` cannot be represented as JSON.
    pub fn with<K: fmt::Display, V: Serialize>(mut self, key: K, value: V) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| panic!("value for '{}' is not serializable: {}", key, e));
        self.message.insert(key.to_string(), value);
        self
    }

    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn with_error<E>(self, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_cause(Cause::new(error))
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The structured message, keys sorted.
    pub fn message(&self) -> &BTreeMap<String, Value> {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.level)?;
        write_map(f, self.message.iter())?;
        if let Some(cause) = &self.cause {
            write!(f, " {}", cause)?;
        }
        Ok(())
    }
}

fn write_map<'a>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}=", key)?;
        write_value(f, value)?;
    }
    f.write_str("}")
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => write_map(f, map.iter()),
        other => write!(f, "{}", other),
    }
}
