pub mod composite;
pub mod customizer;
pub mod json_formatter;
pub mod lifecycle;
pub mod tracing_logger;

pub use crate::domain::model::{Cause, Level, StructuredEntry};
pub use crate::domain::ports::{
    LogEntryCustomizer, LogEntryFormatter, StructuredLogger, StructuredLoggerExt,
};
pub use crate::utils::error::Result;
