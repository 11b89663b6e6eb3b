//! Server configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the `planner-server` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub address: String,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file holding the planner collections
    pub database_path: String,
    /// Optional semester calendar JSON; the built-in semester is used otherwise
    pub calendar_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Loads the configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8088,
            database_path: "planner.db".to_string(),
            calendar_path: None,
        }
    }
}
