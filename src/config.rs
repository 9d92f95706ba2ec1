//! Runtime configuration for the binaries.
//!
//! Read from the environment with fallbacks:
//! - `DB_PATH` : SQLite database file (`profile_matching.db`)
//! - `HOST`    : bind address (`0.0.0.0`)
//! - `PORT`    : HTTP port (`8090`)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// Engine and server configuration with defaults
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use profile_matching_engine::EngineConfig;
///
/// let mut vars = HashMap::new();
/// vars.insert("PORT".to_string(), "9000".to_string());
///
/// let config = EngineConfig::from_map(&vars).unwrap();
/// assert_eq!(config.port, 9000);
/// assert_eq!(config.db_path, "profile_matching.db");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: "profile_matching.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

impl EngineConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = ["DB_PATH", "HOST", "PORT"]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();

        Self::from_map(&vars)
    }

    /// Apply `DB_PATH` / `HOST` / `PORT` over defaults
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match vars.get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| EngineError::Config(format!("invalid PORT '{}': {}", raw, e)))?,
            None => defaults.port,
        };

        Ok(Self {
            db_path: vars.get("DB_PATH").cloned().unwrap_or(defaults.db_path),
            host: vars.get("HOST").cloned().unwrap_or(defaults.host),
            port,
        })
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
