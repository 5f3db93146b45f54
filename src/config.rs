//! Configuration module for the blog.

use serde::Deserialize;
use std::path::Path;

use crate::{BlogError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Insert the example users and boards into an empty database.
    #[serde(default)]
    pub seed_example_data: bool,
}

fn default_db_path() -> String {
    "data/blog.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_example_data: false,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in seconds.
    #[serde(default = "default_session_duration")]
    pub duration_secs: u64,
    /// Idle timeout in seconds.
    #[serde(default = "default_session_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// Interval between expired-session sweeps in seconds.
    #[serde(default = "default_session_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_session_duration() -> u64 {
    24 * 60 * 60 // 24 hours
}

fn default_session_idle_timeout() -> u64 {
    30 * 60 // 30 minutes
}

fn default_session_cleanup_interval() -> u64 {
    3600 // 1 hour
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_session_duration(),
            idle_timeout_secs: default_session_idle_timeout(),
            cleanup_interval_secs: default_session_cleanup_interval(),
        }
    }
}

/// Board listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Number of boards shown on the main page.
    #[serde(default = "default_main_page_size")]
    pub main_page_size: i64,
}

fn default_main_page_size() -> i64 {
    20
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            main_page_size: default_main_page_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/blog.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Board listing configuration.
    #[serde(default)]
    pub board: BoardConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BlogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BlogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BLOG_DATABASE_PATH`: Override the SQLite database path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("BLOG_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.board.main_page_size < 1 {
            return Err(BlogError::Config(
                "board.main_page_size must be at least 1".to_string(),
            ));
        }
        if self.session.duration_secs == 0 || self.session.idle_timeout_secs == 0 {
            return Err(BlogError::Config(
                "session durations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
