//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate that a configuration name is a bare name, not a path
pub fn validate_bare_name(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    validate_required_string(value, field_name, domain)?;

    if value.contains('/') || value.contains('\\') {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!(
                "{} must be a file name without directories, got '{}'",
                field_name, value
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string() {
        assert!(validate_required_string("Products", "name", "settings").is_ok());

        let err = validate_required_string("", "name", "settings").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Domain configuration error in settings: name cannot be empty"
        );
    }

    #[test]
    fn test_bare_name() {
        assert!(validate_bare_name("Products", "name", "settings").is_ok());
        assert!(validate_bare_name("conf/Products", "name", "settings").is_err());
        assert!(validate_bare_name("..\\Products", "name", "settings").is_err());
        assert!(validate_bare_name("", "name", "settings").is_err());
    }
}
