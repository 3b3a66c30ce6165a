//! Configuration validation utilities.

use std::time::Duration;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration conflict: {0}")]
    Conflict(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidTimeout` - if timeout values are zero or exceed limits
    /// - `InvalidParameter` - if parameters are outside valid ranges
    /// - `Conflict` - if configuration settings conflict with each other
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if:
    /// - The timeout duration is zero
    /// - The timeout duration exceeds 1 hour (3600 seconds)
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout.as_secs() > 3600 {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed 1 hour"
            )));
        }

        Ok(())
    }

    /// Validate numeric range
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is outside
    /// the specified range [min, max] (inclusive).
    pub fn validate_range<T>(value: T, min: T, max: T, name: &str) -> ConfigResult<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} must be between {min} and {max}, got {value}"
            )));
        }

        Ok(())
    }

    /// Validate that a string setting is not blank
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if `value` is empty or whitespace.
    pub fn validate_non_empty(value: &str, name: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} cannot be empty"
            )));
        }
        Ok(())
    }
}
