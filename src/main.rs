use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};

use mcp_relay::config;
use mcp_relay::ingress::{self, KILL_GRACE};
use mcp_relay::mcp::server::McpServer;
use mcp_relay::mcp::tools::RelayToolProvider;
use mcp_relay::relay::Relay;
use mcp_relay::telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::get_settings(None)?;
    init_telemetry(TelemetryConfig {
        service_name: settings.server.name.clone(),
        log_level: settings.logger.level.clone(),
    })?;

    let relay = Arc::new(Relay::new());

    // Kill requests acknowledge over HTTP first; the exit happens here,
    // after the grace period, so the response can be flushed.
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if shutdown_rx.recv().await.is_some() {
            tokio::time::sleep(KILL_GRACE).await;
            info!("kill acknowledged, exiting");
            std::process::exit(0);
        }
    });

    // A failed bind is reported but not fatal: the tool endpoint stays up,
    // and any receive() will simply never be fulfilled.
    {
        let relay = relay.clone();
        let settings = settings.ingress.clone();
        tokio::spawn(async move {
            if let Err(e) = ingress::serve(relay, shutdown_tx, &settings).await {
                error!("ingress listener failed: {}", e);
            }
        });
    }

    let provider = Arc::new(RelayToolProvider::new(relay));
    let server = Arc::new(McpServer::new(provider, settings.server));
    server.run(tokio::io::stdin(), tokio::io::stdout()).await?;

    info!("transport closed, shutting down");
    Ok(())
}
