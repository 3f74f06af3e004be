//! Application error types for zipcast.
//!
//! Each error keeps its full context for logging and offers a
//! `user_message()` suitable for printing to the person who asked.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => e.user_message().to_string(),
            AppError::Lookup(e) => e.user_message(),
            AppError::Io(_) => "Failed to read or write a stream. Please try again.".to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Lookup(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Outcomes of an address lookup that are reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// A required address field was absent or blank.
    #[error("Param is missing or the value is empty: {0}")]
    ParameterMissing(String),

    #[error("Address not found")]
    AddressNotFound,

    /// Either provider failed; carries the upstream message.
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            LookupError::ParameterMissing(field) => {
                format!("Param is missing or the value is empty: {}", field)
            }
            LookupError::AddressNotFound => {
                "The provided address could not be found. Please try again.".to_string()
            }
            LookupError::Upstream(message) => message.clone(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            LookupError::ParameterMissing(_) => 2,
            LookupError::AddressNotFound => 3,
            LookupError::Upstream(_) => 4,
        }
    }
}
