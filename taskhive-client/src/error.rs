//! Client error types
//!
//! Backend failures surface to callers as a single human-readable
//! message; no structured error codes cross this boundary.

use taskhive_core::CoreError;
use thiserror::Error;

/// Repository client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend rejected the request and said why
    #[error("{message}")]
    Api { message: String },

    #[error("Request failed: {context}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl ClientError {
    /// Create an API error from the backend's message
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create an HTTP transport error
    pub fn http(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            context: context.into(),
            source,
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<u32>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// The single human-readable message shown to the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
