//! Error types and handling for the travel advisor

use thiserror::Error;

/// Main error type for the travel advisor
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream data provider errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Traveler identifier that the profile repository does not know
    #[error("Traveler '{traveler_id}' not found")]
    ProfileNotFound {
        traveler_id: String,
        available: Vec<String>,
    },
}

impl AdvisorError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error listing the identifiers that do exist
    pub fn profile_not_found<S: Into<String>>(traveler_id: S, available: Vec<String>) -> Self {
        Self::ProfileNotFound {
            traveler_id: traveler_id.into(),
            available,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AdvisorError::Api { .. } => {
                "Unable to reach an external data provider. Please check your internet connection."
                    .to_string()
            }
            AdvisorError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AdvisorError::ProfileNotFound {
                traveler_id,
                available,
            } => format!(
                "Traveler '{traveler_id}' not found. Try one of: {}",
                available.join(", ")
            ),
        }
    }
}
