pub mod toml_config;

use crate::core::json_formatter::DEFAULT_MAX_DEPTH;
use crate::utils::error::{ObservabilityError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

pub use toml_config::TomlConfig;

/// Largest nesting depth a formatter may be configured with.
pub const MAX_CONFIGURABLE_DEPTH: usize = 64;

/// Output format of the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(ObservabilityError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: compact, json".to_string(),
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info,my_service=debug`.
    pub filter: String,
    pub format: LogFormat,
    /// Maximum nesting depth of structured entries.
    pub max_depth: usize,
    /// Include the event target in output.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Compact,
            max_depth: DEFAULT_MAX_DEPTH,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// - `CREEK_LOG_FILTER`: filter directives (default: `info`)
    /// - `CREEK_LOG_FORMAT`: `compact` or `json` (default: `compact`)
    /// - `CREEK_LOG_MAX_DEPTH`: max structured entry depth (default: 8)
    /// - `CREEK_LOG_WITH_TARGET`: `true`/`1` to print targets (default: false)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let format = match env::var("CREEK_LOG_FORMAT") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.format,
        };

        let max_depth = match env::var("CREEK_LOG_MAX_DEPTH") {
            Ok(v) => v.trim().parse().map_err(|_| {
                ObservabilityError::InvalidConfigValueError {
                    field: "CREEK_LOG_MAX_DEPTH".to_string(),
                    value: v.clone(),
                    reason: "Value must be a positive integer".to_string(),
                }
            })?,
            Err(_) => defaults.max_depth,
        };

        Ok(Self {
            filter: env::var("CREEK_LOG_FILTER").unwrap_or(defaults.filter),
            format,
            max_depth,
            with_target: env::var("CREEK_LOG_WITH_TARGET")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.with_target),
        })
    }

    /// The configured filter, unless `RUST_LOG` is set.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => parse_filter(&self.filter),
        }
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| ObservabilityError::InvalidConfigValueError {
        field: "filter".to_string(),
        value: directives.to_string(),
        reason: e.to_string(),
    })
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("filter", &self.filter)?;
        parse_filter(&self.filter)?;
        validate_range("max_depth", self.max_depth, 1, MAX_CONFIGURABLE_DEPTH)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.max_depth, 8);
        assert!(!config.with_target);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = LoggingConfig {
            max_depth: 0,
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_err());

        config.max_depth = MAX_CONFIGURABLE_DEPTH + 1;
        assert!(config.validate().is_err());

        config.max_depth = 8;
        config.filter = "  ".to_string();
        assert!(config.validate().is_err());

        config.filter = "info,my_service=debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unparseable_filter() {
        let config = LoggingConfig {
            filter: "my_service=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ObservabilityError::InvalidConfigValueError { .. })
        ));
    }
}
