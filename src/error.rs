//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TripError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An upstream service (language model, forecast, geodata) could not be used
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable { service: String, message: String },

    /// A place name could not be resolved to coordinates
    #[error("Location not found: {place}")]
    LocationNotFound { place: String },

    /// An upstream answered with a payload we could not interpret
    #[error("Invalid payload from {service}: {message}")]
    InvalidPayload { service: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl TripError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error for the named service
    pub fn upstream<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::UpstreamUnavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(place: S) -> Self {
        Self::LocationNotFound {
            place: place.into(),
        }
    }

    /// Create a new invalid payload error for the named service
    pub fn invalid_payload<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::InvalidPayload {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the pipeline may degrade past this error instead of aborting
    #[must_use]
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            TripError::LocationNotFound { .. } | TripError::InvalidPayload { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripError::UpstreamUnavailable { service, .. } => {
                format!("The {service} service is currently unavailable. Please try again later.")
            }
            TripError::LocationNotFound { place } => format!("Could not find a place named '{place}'"),
            TripError::InvalidPayload { service, .. } => {
                format!("Received an unexpected answer from the {service} service.")
            }
            TripError::Validation { message } => format!("Invalid input: {message}"),
        }
    }
}

impl From<reqwest::Error> for TripError {
    fn from(err: reqwest::Error) -> Self {
        let service = err
            .url()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "upstream".to_string());
        TripError::upstream(service, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripError::config("missing API key");
        assert!(matches!(config_err, TripError::Config { .. }));

        let upstream_err = TripError::upstream("language model", "HTTP 500");
        assert!(matches!(upstream_err, TripError::UpstreamUnavailable { .. }));
        assert_eq!(upstream_err.to_string(), "language model unavailable: HTTP 500");

        let not_found = TripError::location_not_found("Atlantis");
        assert!(matches!(not_found, TripError::LocationNotFound { .. }));
    }

    #[test]
    fn test_soft_errors() {
        assert!(TripError::location_not_found("Atlantis").is_soft());
        assert!(TripError::invalid_payload("forecast", "missing daily").is_soft());
        assert!(!TripError::upstream("language model", "HTTP 500").is_soft());
        assert!(!TripError::config("bad").is_soft());
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let upstream_err = TripError::upstream("language model", "test");
        assert!(upstream_err.user_message().contains("language model"));

        let validation_err = TripError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }
}
