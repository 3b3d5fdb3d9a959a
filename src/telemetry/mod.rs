//! Telemetry bootstrap for the relay process.
//!
//! Diagnostics go to **stderr**: stdout carries the MCP transport, and a
//! single stray log line there would corrupt the JSON-RPC stream.

use tracing_subscriber::EnvFilter;

use crate::utils::error::{RelayError, RelayResult};

/// Configuration for the telemetry system
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Name of the service
    pub service_name: String,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "mcp-relay".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Initializes tracing output for the process.
pub fn init_telemetry(config: TelemetryConfig) -> RelayResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| RelayError::Config(format!("Failed to initialize telemetry: {}", e)))?;

    tracing::debug!(service = %config.service_name, "telemetry initialized");
    Ok(())
}
