use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ObservabilityError {
    #[error("key must not be blank")]
    BlankKey,

    #[error("namespace must not be blank")]
    BlankNamespace,

    #[error("Metric key already set: {key}")]
    DuplicateKey { key: String },

    #[error("Metric name clashes with existing namespace name: {key}")]
    KeyClashesWithNamespace { key: String },

    #[error("Namespace name clashes with existing metric name: {namespace}")]
    NamespaceClashesWithKey { namespace: String },

    #[error("Exception already set")]
    CauseAlreadySet,

    #[error("Cause can not be written, key already set: {key}")]
    CauseClashesWithKey { key: String },

    #[error("Failed to serialize value for '{key}': {message}")]
    SerializationError { key: String, message: String },

    #[error("Max depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },

    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[source] Arc<std::io::Error>),

    #[error("Failed to initialise logging: {message}")]
    LoggerInitError { message: String },
}

impl From<std::io::Error> for ObservabilityError {
    fn from(e: std::io::Error) -> Self {
        ObservabilityError::IoError(Arc::new(e))
    }
}

pub type Result<T> = std::result::Result<T, ObservabilityError>;
