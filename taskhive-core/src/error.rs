//! Core error types for Taskhive domain logic
//!
//! These errors represent domain-level failures, not I/O or transport errors.

use thiserror::Error;

/// Core domain errors
///
/// Malformed dates and unknown filter tokens degrade via fallbacks
/// rather than erroring, so validation is the only failure the core
/// itself raises.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

impl CoreError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
