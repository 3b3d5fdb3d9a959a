//! MCP protocol surface for the relay.
//!
//! The agent runtime connects over stdio and speaks JSON-RPC 2.0. This
//! module is organized the way the protocol is layered:
//!
//! - `types`: JSON-RPC request/response/notification/error objects
//! - `tools`: the tools primitive: models, the provider seam, and the
//!   relay-backed single-capability provider
//! - `server`: method dispatch and the stdio transport loop

/// JSON-RPC wire types used by the MCP protocol
pub mod types;

/// Tool system exposing the relay's single capability
pub mod tools;

/// Stdio JSON-RPC server and method dispatch
pub mod server;
