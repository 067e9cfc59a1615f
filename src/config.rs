//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `LHM_`-prefixed environment variables (`LHM_SONICWALL__SESSION_TIMEOUT=7200`).
//! Everything is resolved once at startup and passed down explicitly.

use anyhow::{bail, Context, Result};
use ::config::{Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::SessionSettings;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Portal web server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// LHM session settings sent to the SonicWall
    #[serde(default)]
    pub sonicwall: SonicWallConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path of the authorization page the SonicWall redirects to
    #[serde(default = "default_path")]
    pub path: String,

    /// Heading and title of the authorization page
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SonicWallConfig {
    /// Session timeout in seconds
    #[serde(default = "default_session_timeout")]
    pub session_timeout: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,

    /// Validate the appliance's TLS certificate on callbacks
    #[serde(default)]
    pub verify_tls: bool,
}

impl Default for SonicWallConfig {
    fn default() -> Self {
        Self {
            session_timeout: default_session_timeout(),
            idle_timeout: default_idle_timeout(),
            verify_tls: false,
        }
    }
}

impl SonicWallConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            session_lifetime: self.session_timeout,
            idle_timeout: self.idle_timeout,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level
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

// Default value functions
fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_path() -> String {
    "/lhm".to_string()
}

fn default_title() -> String {
    "Guest Wi-Fi Access".to_string()
}

fn default_session_timeout() -> u64 {
    3600
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from `path`, or from the first config file found
    /// in the usual locations, with environment overrides applied on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::candidate_paths().into_iter().find(|p| p.exists()),
        };

        match &file {
            Some(path) => tracing::debug!("Loading config from: {}", path.display()),
            None => tracing::debug!("No config file found, using defaults"),
        }

        Self::from_sources(file.as_deref(), Self::environment())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("config.toml"),
            PathBuf::from("/etc/lhm-portal/config.toml"),
        ];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config/lhm-portal/config.toml"));
        }
        paths
    }

    fn environment() -> Environment {
        Environment::with_prefix("LHM")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let cfg: Self = builder
            .add_source(env)
            .build()
            .context("Failed to read config")?
            .try_deserialize()
            .context("Failed to parse config")?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if !self.server.path.starts_with('/') {
            bail!(
                "Invalid server.path {:?}: must start with '/'",
                self.server.path
            );
        }
        Ok(())
    }
}
