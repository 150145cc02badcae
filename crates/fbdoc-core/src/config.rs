//! Configuration schema (fbdoc.toml)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Firebird connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server hostname or IP
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (usually 3050)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path or alias of the database file
    pub database: String,

    /// Username for authentication
    #[serde(default = "default_user")]
    pub user: String,

    /// Password for authentication
    #[serde(default = "default_password")]
    pub password: String,

    /// Connection character set
    #[serde(default = "default_charset")]
    pub charset: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3050
}

fn default_user() -> String {
    "sysdba".to_string()
}

fn default_password() -> String {
    "masterkey".to_string()
}

fn default_charset() -> String {
    "UTF8".to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: String::new(),
            user: default_user(),
            password: default_password(),
            charset: default_charset(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the rendered pages are written into
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Firebird connection settings
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Maximum number of dependency levels rendered before truncating
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            output: OutputConfig::default(),
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to a TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.connection.port, 3050);
        assert_eq!(config.connection.user, "sysdba");
        assert_eq!(config.output.directory, PathBuf::from("dist"));
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [connection]
            database = "/data/employee.fdb"
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.database, "/data/employee.fdb");
        assert_eq!(config.connection.host, "localhost");
        assert_eq!(config.connection.charset, "UTF8");
        assert_eq!(config.max_depth, 5);
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = Config::default();
        config.connection.database = "/data/employee.fdb".to_string();
        config.max_depth = 3;

        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn saved_config_reloads_identically() {
        let path = std::env::temp_dir().join(format!("fbdoc-config-{}.toml", std::process::id()));

        let mut config = Config::default();
        config.connection.database = "/data/employee.fdb".to_string();
        config.max_depth = 3;
        config.save_to_file(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config, reloaded);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::from_toml("max_depth = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
