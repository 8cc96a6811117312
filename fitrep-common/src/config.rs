//! Bootstrap configuration loading
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `FITREP_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/fitrep/<module>.toml` on Linux)
//!
//! A missing file is not fatal: compiled defaults are used and the caller is
//! told so through [`ConfigOrigin`]. A file that exists but does not parse is
//! a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FITREP_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub sessions: SessionConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            logging: LoggingConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

/// Session store tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds of inactivity after which a session may be evicted
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Store size above which a stale sweep runs before a new session is added
    #[serde(default = "default_cleanup_watermark")]
    pub cleanup_watermark: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            cleanup_watermark: default_cleanup_watermark(),
        }
    }
}

impl SessionConfig {
    /// Reject settings the session store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.idle_timeout_secs == 0 {
            return Err(Error::Config(
                "sessions.idle_timeout_secs must be positive".to_string(),
            ));
        }
        if crate::time::secs_to_delta(self.idle_timeout_secs).is_none() {
            return Err(Error::Config(format!(
                "sessions.idle_timeout_secs out of range: {}",
                self.idle_timeout_secs
            )));
        }
        if self.cleanup_watermark == 0 {
            return Err(Error::Config(
                "sessions.cleanup_watermark must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_idle_timeout_secs() -> u64 {
    600
}

fn default_cleanup_watermark() -> usize {
    100
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from this file
    File(PathBuf),
    /// File not found at this path; compiled defaults in effect
    Defaults(PathBuf),
}

impl TomlConfig {
    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigOrigin)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigOrigin::Defaults(path.to_path_buf())));
        }
        let config = Self::load(path)?;
        Ok((config, ConfigOrigin::File(path.to_path_buf())))
    }
}

/// Resolve which config file to read for `module_name`
pub fn resolve_config_path(cli_arg: Option<&Path>, module_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: Platform config directory
    default_config_path(module_name)
}

/// Platform default config path for `module_name`
pub fn default_config_path(module_name: &str) -> PathBuf {
    let file_name = format!("{}.toml", module_name);
    dirs::config_dir()
        .map(|d| d.join("fitrep").join(&file_name))
        .unwrap_or_else(|| PathBuf::from(".").join(file_name))
}

/// Write a config as pretty TOML, creating parent directories as needed
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
