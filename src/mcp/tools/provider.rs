use async_trait::async_trait;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::mcp::tools::models::{ListToolsResponse, Tool, ToolResult};
use crate::relay::Relay;
use crate::utils::error::RelayResult;

/// Name of the one capability exposed to the agent runtime.
pub const AWAIT_INPUT_TOOL: &str = "get_vscode_input";

/// Description advertised for the capability.
const AWAIT_INPUT_DESCRIPTION: &str =
    "Get the message that user submitted from the web input panel. Call this to receive user input.";

/// Handler trait for tools functionality
#[async_trait]
pub trait ToolsProvider: Send + Sync {
    /// Lists available tools
    async fn list_tools(&self) -> RelayResult<ListToolsResponse>;

    /// Calls a tool
    async fn call_tool(&self, name: &str, arguments: &Value) -> RelayResult<ToolResult>;
}

/// The single-capability provider backed by the shared relay.
///
/// There is no per-caller identity: every invocation draws from the same
/// process-wide relay, so concurrent agent sessions sharing one server
/// interleave their reads.
pub struct RelayToolProvider {
    relay: Arc<Relay>,
}

impl fmt::Debug for RelayToolProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayToolProvider").finish_non_exhaustive()
    }
}

impl RelayToolProvider {
    /// Creates a provider draining the given relay.
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl ToolsProvider for RelayToolProvider {
    async fn list_tools(&self) -> RelayResult<ListToolsResponse> {
        Ok(ListToolsResponse {
            tools: vec![Tool::new(
                AWAIT_INPUT_TOOL,
                AWAIT_INPUT_DESCRIPTION,
                json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            )],
            next_cursor: None,
        })
    }

    async fn call_tool(&self, name: &str, _arguments: &Value) -> RelayResult<ToolResult> {
        if name != AWAIT_INPUT_TOOL {
            // An unrecognized capability keeps the call-success envelope;
            // the error lives in the text, not in the protocol.
            debug!("call for unknown tool '{}'", name);
            return Ok(ToolResult::text("Unknown tool"));
        }

        info!("tool call waiting for operator input");
        let message = self.relay.receive().await?;
        debug!(bytes = message.len(), "tool call fulfilled");
        Ok(ToolResult::text(&message))
    }
}
