//! Service configuration resolution for fitrep-fa
//!
//! **Priority:** command line (and its environment fallbacks) → TOML file →
//! compiled defaults. Session settings come from TOML only.

use std::net::{IpAddr, SocketAddr};

use fitrep_common::config::{SessionConfig, TomlConfig};
use fitrep_common::{Error, Result};

/// Module name used for the config file and log identification
pub const MODULE_NAME: &str = "fitrep-fa";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub sessions: SessionConfig,
}

impl ServiceConfig {
    /// Merge CLI overrides over a loaded TOML config and validate the result
    pub fn resolve(toml: TomlConfig, overrides: CliOverrides) -> Result<Self> {
        toml.sessions.validate()?;

        let bind = overrides.bind_address.unwrap_or(toml.bind_address);
        let bind_address = bind
            .parse::<IpAddr>()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind, e)))?;

        Ok(Self {
            bind_address,
            port: overrides.port.unwrap_or(toml.port),
            log_level: toml.logging.level,
            sessions: toml.sessions,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let config =
            ServiceConfig::resolve(TomlConfig::default(), CliOverrides::default()).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5001");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.sessions, SessionConfig::default());
    }

    #[test]
    fn test_cli_overrides_toml() {
        let toml = TomlConfig {
            port: 6000,
            bind_address: "0.0.0.0".to_string(),
            ..Default::default()
        };
        let overrides = CliOverrides {
            bind_address: Some("::1".to_string()),
            port: Some(7000),
        };
        let config = ServiceConfig::resolve(toml, overrides).unwrap();
        assert_eq!(config.socket_addr().to_string(), "[::1]:7000");
    }

    #[test]
    fn test_toml_used_without_overrides() {
        let toml = TomlConfig {
            port: 6000,
            ..Default::default()
        };
        let config = ServiceConfig::resolve(toml, CliOverrides::default()).unwrap();
        assert_eq!(config.port, 6000);
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let overrides = CliOverrides {
            bind_address: Some("localhost:80".to_string()),
            port: None,
        };
        let result = ServiceConfig::resolve(TomlConfig::default(), overrides);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_session_config_rejected() {
        let mut toml = TomlConfig::default();
        toml.sessions.idle_timeout_secs = 0;
        assert!(ServiceConfig::resolve(toml, CliOverrides::default()).is_err());
    }
}
