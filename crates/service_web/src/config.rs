//! Server configuration management
//!
//! Handles loading configuration from a TOML file, environment variables
//! and CLI arguments. Priority, highest to lowest: CLI arguments,
//! environment variables, config file, defaults.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port zero is reserved and cannot be bound deliberately.
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    /// Unrecognised log level text.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// The config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Debug detail.
    Debug,
    /// Default operational level.
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("OPTIRA_WEB_HOST") {
            config.host = host;
        }
        if let Ok(port_str) = std::env::var("OPTIRA_WEB_PORT") {
            config.port = port_str.parse().map_err(|_| ConfigError::InvalidPort(0))?;
        }
        if let Ok(log_level) = std::env::var("OPTIRA_LOG_LEVEL") {
            config.log_level = LogLevel::from_str(&log_level)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            if let Ok(level) = LogLevel::from_str(log_level) {
                self.log_level = level;
            }
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    if let Ok(env_config) = ServerConfig::from_env() {
        if std::env::var("OPTIRA_WEB_HOST").is_ok() {
            config.host = env_config.host;
        }
        if std::env::var("OPTIRA_WEB_PORT").is_ok() {
            config.port = env_config.port;
        }
        if std::env::var("OPTIRA_LOG_LEVEL").is_ok() {
            config.log_level = env_config.log_level;
        }
    }

    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
