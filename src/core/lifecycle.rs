//! Standardized lifecycle log messages.
//!
//! These messages are the glue between what a service logs to indicate it
//! has started and the system tests, which wait for the log line
//! `creek.lifecycle.service.started` before treating a service as ready.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target type for service instance lifecycle events, as expected by the
/// system tests.
pub const SERVICE_TYPE: &str = "service";

/// A lifecycle that can be logged.
pub trait LoggableLifecycle {
    /// The standardized message for this event, where `target_type` is the
    /// kind of thing going through the lifecycle, e.g. [`SERVICE_TYPE`].
    fn log_message(&self, target_type: &str) -> String;
}

/// A basic set of lifecycle events for an instance of something, e.g. a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicLifecycle {
    /// Instance is starting up.
    Starting,
    /// Instance is running.
    Started,
    /// Instance is stopping.
    Stopping,
    /// Instance is stopped.
    Stopped,
}

impl BasicLifecycle {
    pub fn name(&self) -> &'static str {
        match self {
            BasicLifecycle::Starting => "starting",
            BasicLifecycle::Started => "started",
            BasicLifecycle::Stopping => "stopping",
            BasicLifecycle::Stopped => "stopped",
        }
    }
}

impl fmt::Display for BasicLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl LoggableLifecycle for BasicLifecycle {
    fn log_message(&self, target_type: &str) -> String {
        lifecycle_log_message(target_type, self.name())
    }
}

/// Build a lifecycle log message, for use when extending [`BasicLifecycle`].
pub fn lifecycle_log_message(target_type: &str, event: &str) -> String {
    format!(
        "creek.lifecycle.{}.{}",
        target_type.to_lowercase(),
        event.to_lowercase()
    )
}
