use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite cache database
    pub database_path: PathBuf,
    /// Active user id. A placeholder until a real session subsystem exists.
    pub user_id: String,
    /// Remote document store access
    pub remote: RemoteConfig,
}

/// Remote document store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the document API
    pub server_url: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
}

impl RemoteConfig {
    pub fn is_configured(&self) -> bool {
        self.server_url.is_some() && self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("aqp-explorer").join("explorer.db"),
            user_id: "user123".to_string(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        // Apply environment variable overrides
        if let Ok(db_path) = std::env::var("AQP_DATABASE_PATH") {
            config.database_path = PathBuf::from(db_path);
        }
        if let Ok(user_id) = std::env::var("AQP_USER_ID") {
            config.user_id = user_id;
        }
        if let Ok(server_url) = std::env::var("AQP_SERVER_URL") {
            config.remote.server_url = Some(server_url);
        }
        if let Ok(api_key) = std::env::var("AQP_API_KEY") {
            config.remote.api_key = Some(api_key);
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/aqp-explorer/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aqp-explorer")
            .join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
