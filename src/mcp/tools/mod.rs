//! # Tool System
//!
//! The tools primitive exposed to the agent runtime. This relay advertises
//! exactly one capability: a no-argument tool that suspends until the human
//! operator submits a message, then returns it as a single text result.
//!
//! The [`ToolsProvider`] trait is the seam between the protocol dispatch and
//! the relay-backed implementation, [`RelayToolProvider`].

mod models;
mod provider;

// Re-export the public API
pub use models::{CallToolParams, ListToolsResponse, Tool, ToolResult, ToolResultContent, ToolsCapabilities};
pub use provider::{RelayToolProvider, ToolsProvider, AWAIT_INPUT_TOOL};
