//! Test fixtures for code that logs through a [`StructuredLogger`](crate::StructuredLogger).

pub mod log_entry;
pub mod test_logger;

pub use log_entry::LogEntry;
pub use test_logger::TestStructuredLogger;
