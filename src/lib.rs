//! Machine friendly structured logging for Creek services.
//!
//! ```
//! use creek_observability::{structured_logger, StructuredLogger, StructuredLoggerExt};
//!
//! let logger = structured_logger!();
//! logger.info_with("orders loaded", |entry| {
//!     entry.with("count", 42).ns("source").with("table", "orders");
//! });
//! logger.debug("done");
//! ```

pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "test-fixtures")]
pub mod testing;
pub mod utils;

pub use config::{LogFormat, LoggingConfig, TomlConfig};
pub use core::composite::{CompositeObserver, CompositeObserverBuilder};
pub use core::customizer::DefaultLogEntryCustomizer;
pub use core::json_formatter::{default_max_depth, JsonLogEntryFormatter, DEFAULT_MAX_DEPTH};
pub use core::lifecycle::{lifecycle_log_message, BasicLifecycle, LoggableLifecycle, SERVICE_TYPE};
pub use core::tracing_logger::{internal_logger, logger, TracingStructuredLogger};
pub use domain::model::{Cause, Level, StructuredEntry};
pub use domain::ports::{LogEntryCustomizer, LogEntryFormatter, StructuredLogger, StructuredLoggerExt};
#[cfg(feature = "test-fixtures")]
pub use testing::{LogEntry, TestStructuredLogger};
pub use utils::error::{ObservabilityError, Result};
pub use utils::logger::{init_logging, init_logging_from_env};
