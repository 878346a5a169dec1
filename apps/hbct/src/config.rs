//! # Configuration
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config <path>` or `HBCT_CONFIG`)
//! 3. Environment variables
//!
//! ## Environment Variables
//!
//! - `HBCT_CONFIG`: Path to a TOML config file
//! - `HBCT_HOST` / `HBCT_PORT`: Server bind address
//! - `HBCT_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `HBCT_SESSION_TTL`: Idle seconds before a session expires (default: 1800, 0 to disable)
//! - `HBCT_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all
//! - `HBCT_LOG_FORMAT`: `text` (default) or `json`
//!
//! ## File Format
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! rate_limit = 50
//! cors_origins = "http://localhost:3000"
//! session_ttl_secs = 900
//!
//! [log]
//! format = "json"
//! filter = "hbct=debug"
//! ```

use crate::api::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL_SECS};
use hbct_core::HbctError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "hbct=info,tower_http=debug";

/// Largest config file we are willing to read (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Comma-separated origins or "*". `None` means localhost only.
    pub cors_origins: Option<String>,
    /// Upper bound on concurrently open sessions.
    pub max_sessions: usize,
    /// Idle seconds before a session may be reclaimed; 0 keeps sessions forever.
    pub session_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: 100,
            cors_origins: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = HbctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(HbctError::ConfigError(format!(
                "log format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Load configuration from defaults, an optional file, and the process environment.
    ///
    /// An explicit `path` takes precedence over `HBCT_CONFIG`.
    pub fn load(path: Option<&Path>) -> Result<Self, HbctError> {
        let env_path = std::env::var("HBCT_CONFIG").ok().map(PathBuf::from);
        let file = path.map(Path::to_path_buf).or(env_path);

        let mut config = match file {
            Some(file) => Self::from_file(&file)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, HbctError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            HbctError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(HbctError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            HbctError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, HbctError> {
        toml::from_str(contents).map_err(|e| HbctError::ConfigError(e.to_string()))
    }

    /// Apply `HBCT_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), HbctError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HBCT_HOST").filter(|h| !h.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("HBCT_PORT") {
            self.server.port = parse_var("HBCT_PORT", &port)?;
        }
        if let Some(rate) = lookup("HBCT_RATE_LIMIT") {
            self.server.rate_limit = parse_var("HBCT_RATE_LIMIT", &rate)?;
        }
        if let Some(ttl) = lookup("HBCT_SESSION_TTL") {
            self.server.session_ttl_secs = parse_var("HBCT_SESSION_TTL", &ttl)?;
        }
        if let Some(origins) = lookup("HBCT_CORS_ORIGINS") {
            self.server.cors_origins = Some(origins);
        }
        if let Some(format) = lookup("HBCT_LOG_FORMAT") {
            self.log.format = format.parse()?;
        }
        Ok(())
    }

    /// Socket address string for the server.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, HbctError> {
    value
        .trim()
        .parse()
        .map_err(|_| HbctError::ConfigError(format!("{} has invalid value '{}'", name, value)))
}

// =============================================================================
// TESTS
// =============================================================================
