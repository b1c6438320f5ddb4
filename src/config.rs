//! Configuration management for number-guess.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ServerConfig;
use crate::cli::Args;
use crate::session::MAX_TTL;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Session lifecycle configuration.
    pub session: SessionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            graceful_shutdown: true,
        }
    }
}

/// Session configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Seconds a token stays valid after `init`.
    pub ttl_secs: u64,
    /// Seconds between background purges; 0 disables the sweeper.
    pub sweep_interval_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            sweep_interval_secs: 30,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or a filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    fn apply_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("NUMBER_GUESS_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("NUMBER_GUESS_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(ttl) = var("NUMBER_GUESS_TTL_SECS").and_then(|t| t.parse().ok()) {
            self.session.ttl_secs = ttl;
        }

        if let Some(level) = var("NUMBER_GUESS_LOG_LEVEL").or_else(|| var("RUST_LOG")) {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(ttl) = args.ttl_secs {
            self.session.ttl_secs = ttl;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Session TTL, rejecting zero and anything above [`MAX_TTL`].
    pub fn session_ttl(&self) -> Result<Duration, ConfigError> {
        let ttl = Duration::from_secs(self.session.ttl_secs);
        if ttl.is_zero() || ttl > MAX_TTL {
            return Err(ConfigError::InvalidTtl(self.session.ttl_secs));
        }
        Ok(ttl)
    }

    /// Convert to ServerConfig for the API server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        let mut server_config = ServerConfig::new(host.to_string(), self.server.port)
            .with_sweep_interval(Duration::from_secs(self.session.sweep_interval_secs));

        if !self.server.graceful_shutdown {
            server_config = server_config.without_graceful_shutdown();
        }

        Ok(server_config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid host address.
    #[error("invalid host address: {0}")]
    InvalidHost(String),
    /// Session TTL outside `1..=MAX_TTL` seconds.
    #[error("session ttl must be between 1 and {max} seconds, got {0}", max = MAX_TTL.as_secs())]
    InvalidTtl(u64),
}
