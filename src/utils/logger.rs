use crate::config::{LogFormat, LoggingConfig};
use crate::core::json_formatter::set_default_max_depth;
use crate::utils::error::{ObservabilityError, Result};
use crate::utils::validation::Validate;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber described by `config`.
///
/// `RUST_LOG`, when set, takes precedence over the configured filter. The
/// configured `max_depth` becomes the default for every structured logger.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    config.validate()?;
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_target(config.with_target)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(config.with_target)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::LoggerInitError {
        message: e.to_string(),
    })?;
    set_default_max_depth(config.max_depth);

    tracing::debug!(
        filter = %config.filter,
        format = ?config.format,
        max_depth = config.max_depth,
        "Logging initialised"
    );
    Ok(())
}

/// Install the global subscriber using [`LoggingConfig::from_env`].
pub fn init_logging_from_env() -> Result<LoggingConfig> {
    let config = LoggingConfig::from_env()?;
    init_logging(&config)?;
    Ok(config)
}
