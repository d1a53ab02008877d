//! CLI configuration, loaded via confy

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Persistent CLI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the hosted backend. Empty means the built-in
    /// in-memory fixture backend (nothing is persisted).
    pub backend_url: String,
    /// Force colored output on or off; unset means auto-detect
    pub color: Option<bool>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            color: None,
        }
    }
}

/// Load the configuration, creating a default file on first run
pub fn load() -> Result<CliConfig> {
    confy::load("taskhive", None)
        .map_err(|e| CliError::config_with_source("could not load configuration", e))
}
