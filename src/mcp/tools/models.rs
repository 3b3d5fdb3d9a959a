use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a single tool that can be invoked by a model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique identifier for the tool
    pub name: String,

    /// Human-readable description of functionality
    pub description: String,

    /// JSON Schema defining expected parameters
    pub input_schema: Value,
}

impl Tool {
    /// Creates a new tool with the given name, description, and input schema
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Represents different content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolResultContent {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text content
        text: String,
    },
}

/// Represents the result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// List of content items in the result
    pub content: Vec<ToolResultContent>,

    /// Whether the tool execution resulted in an error
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a new success result with text content
    pub fn text(text: &str) -> Self {
        Self {
            content: vec![ToolResultContent::Text {
                text: text.to_string(),
            }],
            is_error: false,
        }
    }
}

/// Request parameters for calling a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to call
    pub name: String,

    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Value,
}

/// Response for listing tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResponse {
    /// List of available tools
    pub tools: Vec<Tool>,

    /// Optional cursor for fetching next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Capabilities advertised for the tools system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapabilities {
    /// Whether the server notifies clients when the tool list changes
    #[serde(default)]
    pub list_changed: bool,
}
