//! Error types for the AV Labor Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Scheduling conflicts are not errors: they are returned as data in a
//! [`ConflictReport`](crate::scheduling::ConflictReport).

use thiserror::Error;

/// The main error type for the AV Labor Engine.
///
/// # Example
///
/// ```
/// use av_labor_engine::error::EngineError;
///
/// let error = EngineError::validation("start_time", "expected HH:MM, got '9am'");
/// assert_eq!(
///     error.to_string(),
///     "Invalid value for 'start_time': expected HH:MM, got '9am'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An input value was malformed or out of range.
    ///
    /// Recovered by rejecting the single operation and surfacing the field
    /// to the user.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The offending input field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A rate configuration value was invalid.
    ///
    /// Raised when a configuration is loaded or overridden, never halfway
    /// through a computation.
    #[error("Invalid rate configuration '{field}': {message}")]
    Config {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`EngineError::Config`] for the given configuration key.
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the field or key the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } | Self::Config { field, .. } => Some(field),
            Self::ConfigNotFound { .. } | Self::ConfigParseError { .. } => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
