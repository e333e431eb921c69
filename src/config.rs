//! Client configuration.
//!
//! Resolution order: defaults, then the optional TOML file, then the
//! `STRICTLY_CHESS_SERVER_URL` environment variable, then CLI flags
//! (applied by the caller through [`ClientConfig::with_server_url`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding the service origin.
pub const SERVER_URL_ENV: &str = "STRICTLY_CHESS_SERVER_URL";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_chess.toml";

/// Configuration for the chess client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Origin of the rules service, without a trailing slash.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Per-request timeout. Unset means the HTTP client's default.
    #[serde(default)]
    request_timeout_ms: Option<u64>,

    /// Background refresh interval for the TUI. Unset disables polling.
    #[serde(default)]
    poll_interval_ms: Option<u64>,

    /// Where the TUI writes its log while it owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_chess.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_ms: None,
            poll_interval_ms: None,
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validated()
    }

    /// Loads configuration from `path` if it exists (defaults otherwise) and
    /// applies the environment override.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("Config file not found, using defaults");
            Self::default()
        };

        let config = match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                debug!(url = %url, "Server URL overridden from environment");
                config.with_server_url(url)?
            }
            _ => config,
        };

        info!(server_url = %config.server_url, "Config resolved");
        Ok(config)
    }

    /// Replaces the service origin.
    #[instrument(skip_all)]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.server_url = url.into();
        self.validated()
    }

    /// Replaces the background refresh interval.
    pub fn with_poll_interval_ms(mut self, interval: Option<u64>) -> Self {
        self.poll_interval_ms = interval.filter(|ms| *ms > 0);
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.server_url.trim().trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&trimmed)
            .map_err(|e| ConfigError::new(format!("Invalid server URL '{}': {}", trimmed, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::new(format!(
                "Server URL '{}' must use http or https",
                trimmed
            )));
        }
        self.server_url = trimmed;
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
