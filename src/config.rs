//! Connection configuration loaded from a JSON file

use crate::error::{Result, TablediffError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tablediff.json";

/// Top-level configuration: a map of connection names to the databases
/// they resolve to.
///
/// ```json
/// {
///   "connections": {
///     "staging":    { "path": "staging.duckdb" },
///     "production": { "path": "production.duckdb" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub connections: HashMap<String, ConnectionProperties>,
}

/// Properties of one named connection.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionProperties {
    /// Path to the DuckDB database file.
    pub path: PathBuf,
}

impl Config {
    /// Load and parse the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            TablediffError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = serde_json::from_reader(file).map_err(|e| {
            TablediffError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Resolve a connection name; an unknown name is fatal before any
    /// comparison starts.
    pub fn connection(&self, name: &str) -> Result<&ConnectionProperties> {
        self.connections
            .get(name)
            .ok_or_else(|| TablediffError::unknown_connection(name))
    }
}
