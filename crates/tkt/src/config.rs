/// Configuration for the widget service
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::course::COURSES_KEY;
use crate::store::WIDGET_PREFERENCES;

/// Environment variable that may point at the configuration file.
pub const CONFIG_ENV_VAR: &str = "TKT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration. Every field has a default, so a config file
/// only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application id, used for the `package:` settings URI and app-op queries
    pub package_name: String,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file; an in-memory store is used when unset
    pub path: Option<PathBuf>,
    pub preferences_name: String,
    pub courses_key: String,
}

/// Which platform answers exact-alarm queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformConfig {
    /// Fixed answers, e.g. for development without a device
    Static {
        sdk_version: u32,
        #[serde(default)]
        exact_alarms_allowed: bool,
    },
    /// A device attached through `adb`
    Adb {
        #[serde(default = "default_adb_path")]
        adb_path: PathBuf,
        #[serde(default)]
        serial: Option<String>,
    },
}

fn default_adb_path() -> PathBuf {
    PathBuf::from("adb")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            package_name: "com.example.tkt".to_string(),
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            preferences_name: WIDGET_PREFERENCES.to_string(),
            courses_key: COURSES_KEY.to_string(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        PlatformConfig::Static {
            sdk_version: 34,
            exact_alarms_allowed: false,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - The loaded configuration, with defaults for missing fields
    /// * `Err` - If the file can't be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
