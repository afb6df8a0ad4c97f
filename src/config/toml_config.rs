use crate::config::LoggingConfig;
use crate::utils::error::{ObservabilityError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Configuration file layout. Only the `[logging]` table is read; other
/// tables belonging to the host service are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text, substituting `${VAR}` references
    /// with environment variables first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ObservabilityError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn into_logging(self) -> LoggingConfig {
        self.logging
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.logging.validate()
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap())
}

/// Replace `${VAR}` with the value of `VAR`. Unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_logging_table() {
        let toml_content = r#"
[service]
name = "orders"

[logging]
filter = "warn,orders=debug"
format = "json"
max_depth = 4
with_target = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.logging.filter, "warn,orders=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.max_depth, 4);
        assert!(config.logging.with_target);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = TomlConfig::from_toml_str("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(
            config.into_logging(),
            LoggingConfig {
                format: LogFormat::Json,
                ..LoggingConfig::default()
            }
        );

        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CREEK_TOML_TEST_FILTER", "debug");

        let config =
            TomlConfig::from_toml_str("[logging]\nfilter = \"${CREEK_TOML_TEST_FILTER}\"\n")
                .unwrap();
        assert_eq!(config.logging.filter, "debug");

        std::env::remove_var("CREEK_TOML_TEST_FILTER");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let config =
            TomlConfig::from_toml_str("[logging]\nfilter = \"${CREEK_TOML_TEST_UNSET}\"\n")
                .unwrap();
        assert_eq!(config.logging.filter, "${CREEK_TOML_TEST_UNSET}");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[logging\n").unwrap_err();
        assert!(matches!(err, ObservabilityError::ConfigValidationError { .. }));

        let err = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ObservabilityError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nfilter = \"trace\"\nmax_depth = 12\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.logging.filter, "trace");
        assert_eq!(config.logging.max_depth, 12);
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(
            &err,
            ObservabilityError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
