#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::bare_urls)]
#![deny(clippy::missing_panics_doc)]

//! MCP-Relay pairs a tool-calling agent with a human operator. The agent
//! connects over stdio and invokes a single capability that suspends until
//! the operator submits a message through the embedded web page; the message
//! then becomes the tool call's result.
//!
//! The crate is built around one shared [`relay::Relay`]: the HTTP ingress
//! feeds messages into it, the MCP tool endpoint drains them out, and
//! everything else is presentation or bootstrap.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mcp_relay::relay::Relay;
//!
//! #[tokio::main]
//! async fn main() {
//!     let relay = Arc::new(Relay::new());
//!
//!     // A submission with no waiter is buffered...
//!     relay.submit("hello".to_string()).await;
//!
//!     // ...and the next receive takes it without suspending.
//!     let message = relay.receive().await.unwrap();
//!     assert_eq!(message, "hello");
//! }
//! ```

/// Rendezvous core pairing submitted messages with suspended consumers.
pub mod relay;

/// HTTP ingress accepting operator submissions and the kill request.
pub mod ingress;

/// MCP protocol surface: JSON-RPC types, the stdio server, and the tool system.
pub mod mcp;

/// Configuration managemen
pub mod config;

/// Telemetry initialization for the relay process
pub mod telemetry;

/// Utility modules for error handling and common functionality.
pub mod utils;

// Re-export the types a consumer of the crate actually touches.
pub use config::Settings;
pub use relay::Relay;
pub use telemetry::{init_telemetry, TelemetryConfig};
pub use utils::error::{RelayError, RelayResult};
