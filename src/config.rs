//! Configuration for the SatlinkIO daemon
//!
//! Loads configuration from a TOML file. Everything here is supplied at
//! startup and never changes at runtime.

use crate::error::{Error, Result};
use crate::protocol::ProtocolMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub link: LinkConfig,
    #[serde(default)]
    pub radio: RadioConfig,
    pub logging: LoggingConfig,
}

/// Socket endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// UDP bind address for inbound telemetry
    ///
    /// Examples:
    /// - `0.0.0.0:4210` - All interfaces on port 4210
    /// - `127.0.0.1:4210` - Localhost only
    pub telemetry_bind: String,

    /// UDP destination (host:port) for outbound commands
    pub command_destination: String,
}

/// Link behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// Wire protocol for inbound datagrams: `binary`, `text` or `json`.
    /// The receiver runs exactly this codec; it never auto-detects.
    pub protocol: ProtocolMode,

    /// Liveness timeout in seconds: maximum age of the last decoded frame
    /// before the link reads as disconnected. Default deployment uses 2.0.
    pub timeout_secs: f64,

    /// Device identifier expected as the leading token of text lines
    pub device_tag: String,
}

/// Radio front-end selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RadioConfig {
    /// Whether the daemon drives a radio at all
    pub enabled: bool,
    /// Use the simulated radio instead of real hardware
    pub mock: bool,
    /// Center frequency in Hz
    pub frequency_hz: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); overridden by `RUST_LOG`
    pub level: String,
}

impl NetworkConfig {
    /// Resolve the command destination to a socket address
    pub fn command_destination_addr(&self) -> Result<SocketAddr> {
        self.command_destination
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "command_destination {:?} did not resolve",
                    self.command_destination
                ))
            })
    }
}

impl LinkConfig {
    /// Liveness timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mock: true,
            frequency_hz: 145_800_000.0,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Built-in defaults matching the reference deployment
    pub fn defaults() -> Self {
        Self {
            network: NetworkConfig {
                telemetry_bind: "0.0.0.0:4210".to_string(),
                command_destination: "127.0.0.1:4220".to_string(),
            },
            link: LinkConfig {
                protocol: ProtocolMode::Binary,
                timeout_secs: 2.0,
                device_tag: "SAT1".to_string(),
            },
            radio: RadioConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Reject values the daemon cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.link.timeout_secs <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "link.timeout_secs must be positive, got {}",
                self.link.timeout_secs
            )));
        }
        if self.link.device_tag.is_empty() {
            return Err(Error::InvalidConfig("link.device_tag is empty".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}
