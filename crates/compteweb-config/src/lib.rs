//! Configuration management for compteweb
//!
//! This module handles loading, validation, and management of
//! compteweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Remote GraphQL endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlConfig {
    /// Endpoint URL every operation is posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Date layout sent for `dateCreation` / `dateTransaction`
    #[serde(default)]
    pub date_format: WireDateFormat,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            date_format: WireDateFormat::default(),
        }
    }
}

impl GraphqlConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_endpoint() -> String {
    "http://localhost:8082/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Wire layout of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WireDateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `YYYY/MM/DD`
    Slash,
}

impl WireDateFormat {
    /// chrono format string for this layout
    pub fn pattern(&self) -> &'static str {
        match self {
            WireDateFormat::Iso => "%Y-%m-%d",
            WireDateFormat::Slash => "%Y/%m/%d",
        }
    }
}

impl std::str::FromStr for WireDateFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iso" => Ok(WireDateFormat::Iso),
            "slash" => Ok(WireDateFormat::Slash),
            _ => Err(format!("Invalid date format: {}", s)),
        }
    }
}

impl std::fmt::Display for WireDateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireDateFormat::Iso => write!(f, "iso"),
            WireDateFormat::Slash => write!(f, "slash"),
        }
    }
}

/// Data client settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// How reads use the local cache
    #[serde(default)]
    pub fetch_policy: FetchPolicy,
}

/// Read policy of the data client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Serve from cache when present, otherwise fetch and store
    #[default]
    CacheFirst,
    /// Always fetch, then store
    NetworkOnly,
}

impl std::str::FromStr for FetchPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cache_first" | "cache-first" => Ok(FetchPolicy::CacheFirst),
            "network_only" | "network-only" => Ok(FetchPolicy::NetworkOnly),
            _ => Err(format!("Invalid fetch policy: {}", s)),
        }
    }
}

impl std::fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchPolicy::CacheFirst => write!(f, "cache_first"),
            FetchPolicy::NetworkOnly => write!(f, "network_only"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["off", "trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// GraphQL endpoint settings
    #[serde(default)]
    pub graphql: GraphqlConfig,
    /// Data client settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "Port must be greater than 0"));
        }

        let endpoint = self.graphql.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "graphql.endpoint",
                "Endpoint must be an http:// or https:// URL",
            ));
        }

        if self.graphql.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "graphql.timeout_secs",
                "Timeout must be at least one second",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                "Level must be one of off, trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Default location looked up by the binary
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.yaml")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.graphql.endpoint, "http://localhost:8082/graphql");
        assert_eq!(config.graphql.timeout(), Duration::from_secs(10));
        assert_eq!(config.graphql.date_format, WireDateFormat::Iso);
        assert_eq!(config.client.fetch_policy, FetchPolicy::CacheFirst);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_template_is_valid() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
graphql:
  endpoint: "https://bank.example/graphql"
  date_format: slash
client:
  fetch_policy: network_only
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.graphql.endpoint, "https://bank.example/graphql");
        assert_eq!(config.graphql.date_format, WireDateFormat::Slash);
        assert_eq!(config.client.fetch_policy, FetchPolicy::NetworkOnly);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let err = Config::from_yaml("graphql:\n  endpoint: localhost:8082\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert!(err.to_string().contains("graphql.endpoint"));
    }

    #[test]
    fn test_rejects_zero_port_and_timeout() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(err.to_string().contains("server.port"));

        let err = Config::from_yaml("graphql:\n  timeout_secs: 0\n").unwrap_err();
        assert!(err.to_string().contains("graphql.timeout_secs"));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/compteweb.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("ISO".parse::<WireDateFormat>().unwrap(), WireDateFormat::Iso);
        assert_eq!("slash".parse::<WireDateFormat>().unwrap(), WireDateFormat::Slash);
        assert!("dots".parse::<WireDateFormat>().is_err());
        assert_eq!("cache-first".parse::<FetchPolicy>().unwrap(), FetchPolicy::CacheFirst);
        assert_eq!(FetchPolicy::NetworkOnly.to_string(), "network_only");
    }
}
