use crate::domain::model::{Cause, Level, StructuredEntry};
use crate::utils::error::{ObservabilityError, Result};
use serde::Serialize;
use serde_json::Value;
use std::error::Error as StdError;

/// Log entry customization.
///
/// Handed to the closure passed to a [`StructuredLogger`], and only invoked
/// when the level is enabled. Every method returns a customizer so calls can
/// be chained:
///
/// ```
/// use creek_observability::{StructuredLoggerExt, TestStructuredLogger};
///
/// let logger = TestStructuredLogger::create();
/// logger.info_with("batch processed", |entry| {
///     entry.with("records", 120).ns("timing").with("millis", 35);
/// });
/// ```
///
/// Misuse, such as setting the same key twice, does not panic at the call
/// site. The first error is recorded and reported when the entry is built.
pub trait LogEntryCustomizer {
    /// Nest the entry within `namespace`, returning the nested customizer.
    ///
    /// Calling this again with the same name returns the same namespace.
    fn ns(&mut self, namespace: &str) -> &mut dyn LogEntryCustomizer;

    /// Attach a key-value pair. `Value::Null` values are left out of the
    /// built entry but still reserve the key.
    fn with_value(&mut self, key: &str, value: Value) -> &mut dyn LogEntryCustomizer;

    /// Attach an error. Only one cause may be set per entry.
    fn with_cause(&mut self, cause: Cause) -> &mut dyn LogEntryCustomizer;

    /// Record a misuse that happened before a value reached the customizer.
    fn record_error(&mut self, error: ObservabilityError);
}

impl<'a> dyn LogEntryCustomizer + 'a {
    /// Attach any serializable value under `key`.
    pub fn with<K, V>(&mut self, key: K, value: V) -> &mut dyn LogEntryCustomizer
    where
        K: AsRef<str>,
        V: Serialize,
    {
        let key = key.as_ref();
        match serde_json::to_value(value) {
            Ok(value) => self.with_value(key, value),
            Err(e) => {
                self.record_error(ObservabilityError::SerializationError {
                    key: key.to_string(),
                    message: e.to_string(),
                });
                self
            }
        }
    }

    /// Nest within a namespace named by anything string-like, e.g. an enum.
    pub fn namespace<K: AsRef<str>>(&mut self, namespace: K) -> &mut dyn LogEntryCustomizer {
        self.ns(namespace.as_ref())
    }

    /// Attach an error as the entry's cause.
    pub fn with_error<E>(&mut self, error: E) -> &mut dyn LogEntryCustomizer
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_cause(Cause::new(error))
    }
}

/// Turns a built entry into a single line of text.
pub trait LogEntryFormatter: Send + Sync {
    /// When `true`, a cause is written into the entry as a `cause` field
    /// instead of being handed to the logging framework separately.
    fn cause_in_message(&self) -> bool {
        false
    }

    fn format(&self, entry: &StructuredEntry) -> Result<String>;
}

/// Logger interface that encourages structured logging.
pub trait StructuredLogger: Send + Sync {
    fn enabled(&self, level: Level) -> bool;

    /// Log `message` at `level`, if enabled. `customize` is only called when
    /// the level is enabled.
    fn log(
        &self,
        level: Level,
        message: &str,
        customize: &mut dyn FnMut(&mut dyn LogEntryCustomizer),
    );

    fn trace(&self, message: &str) {
        self.log(Level::Trace, message, &mut |_| {});
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message, &mut |_| {});
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message, &mut |_| {});
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message, &mut |_| {});
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message, &mut |_| {});
    }
}

/// Closure based helpers for any [`StructuredLogger`].
pub trait StructuredLoggerExt: StructuredLogger {
    fn log_with<F>(&self, level: Level, message: &str, customize: F)
    where
        F: FnOnce(&mut dyn LogEntryCustomizer),
    {
        let mut customize = Some(customize);
        self.log(level, message, &mut |entry| {
            if let Some(f) = customize.take() {
                f(entry);
            }
        });
    }

    fn trace_with<F>(&self, message: &str, customize: F)
    where
        F: FnOnce(&mut dyn LogEntryCustomizer),
    {
        self.log_with(Level::Trace, message, customize);
    }

    fn debug_with<F>(&self, message: &str, customize: F)
    where
        F: FnOnce(&mut dyn LogEntryCustomizer),
    {
        self.log_with(Level::Debug, message, customize);
    }

    fn info_with<F>(&self, message: &str, customize: F)
    where
        F: FnOnce(&mut dyn LogEntryCustomizer),
    {
        self.log_with(Level::Info, message, customize);
    }

    fn warn_with<F>(&self, message: &str, customize: F)
    where
        F: FnOnce(&mut dyn LogEntryCustomizer),
    {
        self.log_with(Level::Warn, message, customize);
    }

    fn error_with<F>(&self, message: &str, customize: F)
    where
        F: FnOnce(&mut dyn LogEntryCustomizer),
    {
        self.log_with(Level::Error, message, customize);
    }
}

impl<L: StructuredLogger + ?Sized> StructuredLoggerExt for L {}
