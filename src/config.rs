//! Process configuration: optional `config.toml` plus environment overrides.
//!
//! The `host`/`port` pair is reported at startup for operator visibility but
//! never bound; the server speaks MCP over stdin/stdout.

use std::env;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{McpError, Result};

/// Default Notion REST endpoint. Tests point `api_url` at a local mock.
pub const DEFAULT_API_URL: &str = "https://api.notion.com";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Notion integration token. Required for any successful query.
    #[serde(default)]
    pub notion_token: Option<String>,
    /// Database queried when the caller omits `database_id`.
    #[serde(default)]
    pub default_database_id: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: default_host(),
            port: default_port(),
            notion_token: None,
            default_database_id: None,
            api_url: default_api_url(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml` (or the path in `MCP_CONFIG`),
    /// falling back to defaults, then apply environment overrides.
    pub fn load() -> Result<Config> {
        let config_path = env::var("MCP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let mut config = if Path::new(&config_path).exists() {
            Config::from_file(&config_path)?
        } else {
            warn!("Config file not found, using defaults");
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| McpError::Config(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| McpError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Environment variables take precedence over file values.
    pub fn apply_env(&mut self) {
        if let Ok(token) = env::var("NOTION_API_KEY") {
            if !token.is_empty() {
                self.notion_token = Some(token);
            }
        }
        if let Ok(db) = env::var("NOTION_DATABASE_ID") {
            if !db.is_empty() {
                self.default_database_id = Some(db);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_original_endpoint() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.notion_token.is_none());
        assert!(config.default_database_id.is_none());
    }

    #[test]
    fn parses_config_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).expect("Failed to create config");
        writeln!(
            file,
            "host = \"127.0.0.1\"\nport = 9000\nnotion_token = \"secret\"\ndefault_database_id = \"db-1\""
        )
        .expect("Failed to write config");

        let config = Config::from_file(&path).expect("Failed to parse config");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.notion_token.as_deref(), Some("secret"));
        assert_eq!(config.default_database_id.as_deref(), Some("db-1"));
        // Unset fields fall back to defaults
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn rejects_malformed_config_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number\"").expect("Failed to write config");

        let err = Config::from_file(&path).expect_err("Expected parse failure");
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
