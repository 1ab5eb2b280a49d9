//! CLI configuration.

use roadwind_bridge::BridgeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::commands::{CliError, Result};

/// Configuration read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `-v` is not given.
    pub log_level: String,
    /// `pretty` or `json`.
    pub log_format: String,
    /// Identity bridge settings.
    pub bridge: BridgeConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "pretty".to_string(),
            bridge: BridgeConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads the config file, or returns defaults when no path is given.
    ///
    /// An explicitly named file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }
}
