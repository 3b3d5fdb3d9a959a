//! Settings for the relay process.
//!
//! All defaults are compiled in; no settings file is required. The ingress
//! listener's well-known default (`127.0.0.1:9876`) is what the producer UI
//! and any generated client configuration point at, so an override is an
//! explicit opt-in via a YAML file rather than an environment variable.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use crate::utils::error::{RelayError, RelayResult};

/// Settings for the relay process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP ingress settings
    #[serde(default)]
    pub ingress: IngressSettings,

    /// MCP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Logger settings
    #[serde(default)]
    pub logger: LoggerSettings,
}

/// Settings for the HTTP ingress listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngressSettings {
    /// Address the listener binds to
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port the listener binds to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for IngressSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the MCP server identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Name reported in the initialize handshake
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

/// Logger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    9876
}

fn default_server_name() -> String {
    "mcp-input-server".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load settings from a YAML file
pub fn load_settings<P: AsRef<Path>>(path: P) -> RelayResult<Settings> {
    let mut file = File::open(path)
        .map_err(|e| RelayError::Config(format!("Failed to open config file: {}", e)))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| RelayError::Config(format!("Failed to read config file: {}", e)))?;

    let settings: Settings = serde_yaml::from_str(&contents)
        .map_err(|e| RelayError::Config(format!("Failed to parse config file: {}", e)))?;

    Ok(settings)
}

/// Get settings, optionally from a specific file
pub fn get_settings(config_path: Option<&str>) -> RelayResult<Settings> {
    match config_path {
        Some(path) => load_settings(path),
        None => {
            // Try to find config file in common locations
            let default_paths = ["mcp_relay.config.yaml", "config/mcp_relay.config.yaml"];

            for path in default_paths {
                if Path::new(path).exists() {
                    return load_settings(path);
                }
            }

            Ok(Settings::default())
        }
    }
}
