//! Configuration module for filedrop.

use serde::Deserialize;
use std::path::Path;

use crate::{FiledropError, Result};

/// Server configuration.
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

/// GitHub identity provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// OAuth application client id (must be set).
    #[serde(default)]
    pub client_id: String,
    /// OAuth application client secret (must be set).
    #[serde(default)]
    pub client_secret: String,
    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// OAuth authorize endpoint.
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    /// OAuth token exchange endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// OAuth scope requested at login.
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Callback URL registered with the OAuth application. When empty,
    /// GitHub falls back to the application's registered callback.
    #[serde(default)]
    pub redirect_url: String,
    /// Connect timeout for provider calls in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total timeout for provider calls in seconds.
    #[serde(default = "default_total_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_authorize_url() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_scope() -> String {
    "user:email".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_total_timeout() -> u64 {
    30
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: default_api_base_url(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            scope: default_scope(),
            redirect_url: String::new(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_total_timeout(),
        }
    }
}

/// Browser session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session signing secret (must be set).
    #[serde(default)]
    pub secret: String,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}

fn default_cookie_name() -> String {
    "filedrop_session".to_string()
}

fn default_session_ttl() -> u64 {
    604800 // 7 days
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            cookie_name: default_cookie_name(),
            ttl_secs: default_session_ttl(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_storage_root")]
    pub root: String,
}

fn default_storage_root() -> String {
    "uploads".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file logging.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filedrop.log".to_string()
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
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// GitHub identity provider configuration.
    #[serde(default)]
    pub github: GithubConfig,
    /// Browser session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FiledropError::Io)?;
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
        toml::from_str(s).map_err(|e| FiledropError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILEDROP_GITHUB_CLIENT_ID`: OAuth application client id
    /// - `FILEDROP_GITHUB_CLIENT_SECRET`: OAuth application client secret
    /// - `FILEDROP_SESSION_SECRET`: session signing secret
    pub fn apply_env_overrides(&mut self) {
        for (var, target) in [
            ("FILEDROP_GITHUB_CLIENT_ID", &mut self.github.client_id),
            ("FILEDROP_GITHUB_CLIENT_SECRET", &mut self.github.client_secret),
            ("FILEDROP_SESSION_SECRET", &mut self.session.secret),
        ] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *target = value;
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Missing GitHub credentials or session secret are startup-fatal,
    /// never per-request errors.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.github.client_id.is_empty() {
            missing.push("github.client_id");
        }
        if self.github.client_secret.is_empty() {
            missing.push("github.client_secret");
        }
        if self.session.secret.is_empty() {
            missing.push("session.secret");
        }

        if !missing.is_empty() {
            return Err(FiledropError::Config(format!(
                "missing required configuration: {}. \
                 Set the values in config.toml or via FILEDROP_* environment variables.",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}
