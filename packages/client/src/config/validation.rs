//! Configuration validation
//!
//! Checks applied to a [`DaemonConfig`](super::DaemonConfig) before any
//! client is built from it.

use std::time::Duration;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid daemon endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
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

        if timeout > Duration::from_secs(3600) {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed 1 hour"
            )));
        }

        Ok(())
    }

    /// Validate that a header value will be accepted by the HTTP layer
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is empty
    /// or contains characters not allowed in an HTTP header.
    pub fn validate_header_value(value: &str, name: &str) -> ConfigResult<()> {
        if value.is_empty() {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} cannot be empty"
            )));
        }

        http::HeaderValue::from_str(value).map_err(|e| {
            ConfigurationError::InvalidParameter(format!("{name} is not a valid header value: {e}"))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_rejected() {
        let err = ConfigValidator::validate_timeout(Duration::ZERO, "read_timeout").unwrap_err();
        assert!(err.to_string().contains("read_timeout cannot be zero"));
    }

    #[test]
    fn excessive_timeout_rejected() {
        assert!(ConfigValidator::validate_timeout(Duration::from_secs(7200), "connect_timeout").is_err());
        assert!(ConfigValidator::validate_timeout(Duration::from_secs(60), "connect_timeout").is_ok());
    }

    #[test]
    fn header_value_with_newline_rejected() {
        assert!(ConfigValidator::validate_header_value("dockwire\r\nx: y", "user_agent").is_err());
        assert!(ConfigValidator::validate_header_value("", "user_agent").is_err());
        assert!(ConfigValidator::validate_header_value("dockwire/0.1.0", "user_agent").is_ok());
    }
}
