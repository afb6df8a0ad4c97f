use crate::core::customizer::DefaultLogEntryCustomizer;
use crate::core::json_formatter::JsonLogEntryFormatter;
use crate::domain::model::Level;
use crate::domain::ports::{LogEntryCustomizer, LogEntryFormatter, StructuredLogger};
use std::fmt;

/// Target of every event emitted by a [`TracingStructuredLogger`].
pub const TARGET: &str = "creek_observability::structured";

/// Namespace that internal loggers nest their entries under.
pub const INTERNAL_NAMESPACE: &str = "creek";

// tracing needs the level at each callsite to be a constant.
macro_rules! dispatch_level {
    ($level:expr, enabled) => {
        match $level {
            Level::Trace => tracing::enabled!(target: TARGET, tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(target: TARGET, tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: TARGET, tracing::Level::INFO),
            Level::Warn => tracing::enabled!(target: TARGET, tracing::Level::WARN),
            Level::Error => tracing::enabled!(target: TARGET, tracing::Level::ERROR),
        }
    };
    ($level:expr, event, $($args:tt)+) => {
        match $level {
            Level::Trace => tracing::event!(target: TARGET, tracing::Level::TRACE, $($args)+),
            Level::Debug => tracing::event!(target: TARGET, tracing::Level::DEBUG, $($args)+),
            Level::Info => tracing::event!(target: TARGET, tracing::Level::INFO, $($args)+),
            Level::Warn => tracing::event!(target: TARGET, tracing::Level::WARN, $($args)+),
            Level::Error => tracing::event!(target: TARGET, tracing::Level::ERROR, $($args)+),
        }
    };
}

/// Structured logger that emits through `tracing`.
///
/// Each entry is built, formatted into a single line by the formatter, and
/// emitted as the message of a `tracing` event with a `logger` field. When
/// the formatter leaves causes out of the line, the cause is attached as a
/// separate `cause` field.
pub struct TracingStructuredLogger {
    name: String,
    root_ns: Option<String>,
    formatter: Box<dyn LogEntryFormatter>,
}

impl TracingStructuredLogger {
    pub fn new(name: impl Into<String>, root_ns: Option<String>) -> Self {
        Self {
            name: name.into(),
            root_ns,
            formatter: Box::new(JsonLogEntryFormatter::default()),
        }
    }

    /// Replace the formatter.
    pub fn with_formatter(mut self, formatter: impl LogEntryFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_ns(&self) -> Option<&str> {
        self.root_ns.as_deref()
    }
}

impl fmt::Debug for TracingStructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingStructuredLogger")
            .field("name", &self.name)
            .field("root_ns", &self.root_ns)
            .finish_non_exhaustive()
    }
}

impl StructuredLogger for TracingStructuredLogger {
    fn enabled(&self, level: Level) -> bool {
        dispatch_level!(level, enabled)
    }

    fn log(
        &self,
        level: Level,
        message: &str,
        customize: &mut dyn FnMut(&mut dyn LogEntryCustomizer),
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut customizer = DefaultLogEntryCustomizer::create(message);
        match &self.root_ns {
            Some(ns) => customize(customizer.ns(ns)),
            None => customize(&mut customizer),
        }

        let cause_in_message = self.formatter.cause_in_message();
        let line = customizer
            .build(cause_in_message)
            .and_then(|entry| self.formatter.format(&entry));

        match line {
            Ok(line) => {
                let cause = if cause_in_message {
                    None
                } else {
                    customizer.cause()
                };
                let cause = cause.as_ref().map(tracing::field::display);
                dispatch_level!(level, event, logger = %self.name, cause = cause, "{}", line);
            }
            Err(e) => {
                dispatch_level!(level, event, logger = %self.name, log_error = %e, "{}", message);
            }
        }
    }
}

/// Get a structured logger named `name`, typically the calling module's path.
pub fn logger(name: impl Into<String>) -> TracingStructuredLogger {
    TracingStructuredLogger::new(name, None)
}

/// Get a structured logger for Creek's own code. Entries are nested within
/// the `creek` namespace.
pub fn internal_logger(name: impl Into<String>) -> TracingStructuredLogger {
    TracingStructuredLogger::new(name, Some(INTERNAL_NAMESPACE.to_string()))
}

/// Get a structured logger named after the calling module.
#[macro_export]
macro_rules! structured_logger {
    () => {
        $crate::core::tracing_logger::logger(module_path!())
    };
}
