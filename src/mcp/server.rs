//! # Stdio Protocol Server
//!
//! JSON-RPC 2.0 dispatch for the MCP tool protocol, carried over
//! newline-delimited JSON on an arbitrary byte-stream transport (stdio in
//! production).
//!
//! Each incoming request is handled on its own task: a `tools/call` that
//! suspends waiting for operator input must not stall `tools/list` or any
//! later call. Responses from all tasks funnel through a single writer task
//! that owns the write half, so frames never interleave.
//!
//! When the transport reaches EOF the agent runtime is gone and there is
//! nobody left to serve; [`McpServer::run`] returns and the caller is
//! expected to let the process wind down, abandoning any still-suspended
//! waiters.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::config::ServerSettings;
use crate::mcp::tools::{CallToolParams, ToolsCapabilities, ToolsProvider};
use crate::mcp::types::{JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
use crate::utils::error::RelayResult;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Result payload of the `initialize` handshake.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    protocol_version: String,
    capabilities: ServerCapabilities,
    server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapabilities,
}

#[derive(Debug, Serialize)]
struct ServerInfo {
    name: String,
    version: String,
}

/// JSON-RPC server exposing the tool protocol to the agent runtime.
pub struct McpServer {
    /// Provider for tools functionality
    provider: Arc<dyn ToolsProvider>,
    settings: ServerSettings,
}

impl fmt::Debug for McpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpServer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl McpServer {
    /// Creates a server dispatching tool methods to the given provider.
    pub fn new(provider: Arc<dyn ToolsProvider>, settings: ServerSettings) -> Self {
        Self { provider, settings }
    }

    /// Handles one decoded request and produces its response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, id = ?request.id, "handling request");

        if request.jsonrpc != "2.0" {
            warn!("invalid JSON-RPC version: {}", request.jsonrpc);
            return JsonRpcResponse::error(
                JsonRpcError::invalid_request("Invalid JSON-RPC version"),
                request.id,
            );
        }

        let id = request.id;
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(result, id),
            Err(error) => JsonRpcResponse::error(error, id),
        }
    }

    /// Handles one decoded notification. Unknown notifications are ignored
    /// per the JSON-RPC 2.0 specification.
    pub async fn handle_notification(&self, notification: JsonRpcNotification) {
        debug!(method = %notification.method, "notification received");
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => self.initialize(),
            "ping" => Ok(json!({})),
            "tools/list" => {
                let listing = self
                    .provider
                    .list_tools()
                    .await
                    .map_err(|e| JsonRpcError::internal_error(&e.to_string()))?;
                to_result_value(listing)
            }
            "tools/call" => {
                let params: CallToolParams =
                    serde_json::from_value(params.unwrap_or(Value::Null))
                        .map_err(|e| JsonRpcError::invalid_params(&format!("Invalid params: {}", e)))?;
                let result = self
                    .provider
                    .call_tool(&params.name, &params.arguments)
                    .await
                    .map_err(|e| JsonRpcError::internal_error(&e.to_string()))?;
                to_result_value(result)
            }
            other => {
                warn!("method not found: {}", other);
                Err(JsonRpcError::method_not_found(&format!(
                    "Method '{}' not found",
                    other
                )))
            }
        }
    }

    fn initialize(&self) -> Result<Value, JsonRpcError> {
        to_result_value(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapabilities {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: self.settings.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    /// Processes one raw transport line.
    ///
    /// A request yields `Some(response)`; a notification yields `None`; a
    /// line that is neither yields a parse-error response with a null id.
    pub async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match JsonRpcRequest::from_bytes(line.as_bytes()) {
            Ok(request) => Some(self.handle_request(request).await),
            Err(_) => match JsonRpcNotification::from_bytes(line.as_bytes()) {
                Ok(notification) => {
                    self.handle_notification(notification).await;
                    None
                }
                Err(e) => {
                    warn!("invalid JSON-RPC message: {}", e);
                    Some(JsonRpcResponse::error(
                        JsonRpcError::parse_error("Invalid JSON-RPC message"),
                        Value::Null,
                    ))
                }
            },
        }
    }

    /// Serves the protocol over the given transport until EOF.
    pub async fn run<R, W>(self: Arc<Self>, reader: R, writer: W) -> RelayResult<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(32);

        tokio::spawn(async move {
            let mut writer = writer;
            while let Some(frame) = rx.recv().await {
                if let Err(e) = write_frame(&mut writer, &frame).await {
                    error!("transport write failed: {}", e);
                    break;
                }
            }
        });

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let Some(response) = server.process_line(&line).await else {
                    return;
                };
                match response.to_bytes() {
                    Ok(bytes) => {
                        let _ = tx.send(bytes).await;
                    }
                    Err(e) => error!("failed to encode response: {}", e),
                }
            });
        }

        debug!("transport closed");
        Ok(())
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, frame: &[u8]) -> std::io::Result<()> {
    writer.write_all(frame).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

fn to_result_value<T: Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::internal_error(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::RelayToolProvider;
    use crate::relay::Relay;

    fn server() -> McpServer {
        let relay = Arc::new(Relay::new());
        McpServer::new(
            Arc::new(RelayToolProvider::new(relay)),
            ServerSettings::default(),
        )
    }

    #[tokio::test]
    async fn initialize_reports_tools_capability() {
        let request = JsonRpcRequest::new("initialize", None, json!(0));
        let response = server().handle_request(request).await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!("mcp-input-server"));
        assert_eq!(result["capabilities"]["tools"]["listChanged"], json!(false));
    }

    #[tokio::test]
    async fn unknown_method_maps_to_not_found() {
        let request = JsonRpcRequest::new("resources/list", None, json!(3));
        let response = server().handle_request(request).await;

        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32601);
        assert_eq!(response.id, json!(3));
    }

    #[tokio::test]
    async fn wrong_version_is_rejected() {
        let request = JsonRpcRequest {
            jsonrpc: "1.0".to_string(),
            method: "ping".to_string(),
            params: None,
            id: json!(9),
        };
        let response = server().handle_request(request).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn call_without_name_is_invalid_params() {
        let request = JsonRpcRequest::new("tools/call", Some(json!({})), json!(4));
        let response = server().handle_request(request).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn garbage_line_yields_parse_error_with_null_id() {
        let response = server().process_line("not json at all").await.unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn notification_produces_no_response() {
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server().process_line(line).await.is_none());
    }
}
