use crate::core::customizer::DefaultLogEntryCustomizer;
use crate::domain::model::Level;
use crate::domain::ports::{LogEntryCustomizer, StructuredLogger};
use crate::testing::log_entry::LogEntry;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`StructuredLogger`] that captures entries for tests to assert on.
///
/// Pass it to code expecting a structured logger, then inspect
/// [`entries`](Self::entries) or [`text_entries`](Self::text_entries).
#[derive(Debug)]
pub struct TestStructuredLogger {
    min_level: Level,
    entries: Mutex<Vec<LogEntry>>,
}

impl Default for TestStructuredLogger {
    fn default() -> Self {
        Self::create()
    }
}

impl TestStructuredLogger {
    /// Capture entries at every level.
    pub fn create() -> Self {
        Self::with_min_level(Level::Trace)
    }

    /// Capture entries at `level` and above.
    pub fn with_min_level(level: Level) -> Self {
        Self {
            min_level: level,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Captured entries as text, e.g. `INFO: {a=1, message=started}`.
    pub fn text_entries(&self) -> Vec<String> {
        self.lock().iter().map(LogEntry::to_string).collect()
    }

    /// Clear captured entries, allowing the instance to be reused.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StructuredLogger for TestStructuredLogger {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// # Panics
    ///
    /// If the entry was customized incorrectly, e.g. the same key was set
    /// twice, so the mistake fails the test.
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
        customize(&mut customizer);

        let entry = match customizer.build(false) {
            Ok(entry) => entry,
            Err(e) => panic!("invalid structured log entry '{}': {}", message, e),
        };
        self.lock()
            .push(LogEntry::from_map(level, entry, customizer.cause()));
    }
}
