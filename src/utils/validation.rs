use crate::utils::error::{ObservabilityError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ObservabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ObservabilityError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("filter", "info").is_ok());
        assert!(validate_non_empty_string("filter", "").is_err());
        assert!(validate_non_empty_string("filter", " \t").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("max_depth", 8, 1, 64).is_ok());
        assert!(validate_range("max_depth", 1, 1, 64).is_ok());
        assert!(validate_range("max_depth", 64, 1, 64).is_ok());

        let err = validate_range("max_depth", 0, 1, 64).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for 'max_depth': Value must be between 1 and 64"
        );
    }
}
