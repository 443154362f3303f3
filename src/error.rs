//! Error types for the crew planning engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while configuring the planner
//! or running a calculation.

use thiserror::Error;

/// The main error type for the crew planning engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use crew_planner::error::EngineError;
///
/// let error = EngineError::InstallerNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Installer not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// Configuration or request input violated a business rule.
    ///
    /// Raised before any stored state is touched, so the previous
    /// configuration remains in effect.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field or section that failed validation.
        field: String,
        /// A description of the violated rule.
        message: String,
    },

    /// No installer exists with the given identifier.
    #[error("Installer not found: {id}")]
    InstallerNotFound {
        /// The identifier that was looked up.
        id: u64,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
