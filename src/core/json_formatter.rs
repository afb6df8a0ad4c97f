use crate::config::LoggingConfig;
use crate::domain::model::StructuredEntry;
use crate::domain::ports::LogEntryFormatter;
use crate::utils::error::{ObservabilityError, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DEFAULT_MAX_DEPTH: usize = 8;

static CONFIGURED_MAX_DEPTH: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_DEPTH);

/// Set the max depth used by [`JsonLogEntryFormatter::default`], and so by
/// every logger created afterwards. Called by
/// [`init_logging`](crate::init_logging) with the validated configuration.
pub fn set_default_max_depth(max_depth: usize) {
    CONFIGURED_MAX_DEPTH.store(max_depth, Ordering::Relaxed);
}

/// The max depth currently used by [`JsonLogEntryFormatter::default`].
pub fn default_max_depth() -> usize {
    CONFIGURED_MAX_DEPTH.load(Ordering::Relaxed)
}

/// Formats entries as compact, single line JSON.
///
/// The entry itself sits at depth 0 and each nested array element or object
/// value is one level deeper. Formatting fails if any value sits deeper than
/// the configured maximum.
#[derive(Debug, Clone)]
pub struct JsonLogEntryFormatter {
    max_depth: usize,
}

impl Default for JsonLogEntryFormatter {
    fn default() -> Self {
        Self::new(default_max_depth())
    }
}

impl JsonLogEntryFormatter {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(config.max_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Format any JSON value, not just a whole entry.
    pub fn format_value(&self, value: &Value) -> Result<String> {
        let mut out = String::new();
        self.write_value(&mut out, value, 0)?;
        Ok(out)
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ObservabilityError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }

        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::String(s) => write_string(out, s),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item, depth + 1)?;
                }
                out.push(']');
            }
            Value::Object(map) => self.write_object(out, map, depth)?,
        }
        Ok(())
    }

    fn write_object(&self, out: &mut String, map: &StructuredEntry, depth: usize) -> Result<()> {
        out.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_string(out, key);
            out.push(':');
            self.write_value(out, value, depth + 1)?;
        }
        out.push('}');
        Ok(())
    }
}

impl LogEntryFormatter for JsonLogEntryFormatter {
    fn cause_in_message(&self) -> bool {
        true
    }

    fn format(&self, entry: &StructuredEntry) -> Result<String> {
        let mut out = String::new();
        self.write_object(&mut out, entry, 0)?;
        Ok(out)
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
