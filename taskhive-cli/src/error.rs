//! CLI-specific error types
//!
//! Wrap core and client errors and add CLI-specific variants.

use thiserror::Error;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] taskhive_core::CoreError),

    #[error(transparent)]
    Client(#[from] taskhive_client::ClientError),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl CliError {
    /// Create a configuration error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
