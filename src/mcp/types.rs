//! # JSON-RPC Wire Types
//!
//! The agent runtime speaks JSON-RPC 2.0 over the stdio transport. This
//! module defines the request, response, notification, and error objects
//! plus the standard error-code constructors.
//!
//! Requests carry an `id` and expect a response; notifications carry no `id`
//! and expect none. Parsing an incoming line tries the request shape first
//! and falls back to the notification shape, mirroring how the server loop
//! routes frames.

use serde::{Deserialize, Serialize};

use crate::utils::error::{RelayError, RelayResult};

/// JSON-RPC 2.0 request object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Method name to invoke
    pub method: String,
    /// Parameters for the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Unique identifier for the reques
    pub id: serde_json::Value,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC reques
    pub fn new(method: &str, params: Option<serde_json::Value>, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id,
        }
    }

    /// Serialize the request to JSON bytes
    pub fn to_bytes(&self) -> RelayResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| RelayError::Serialization(format!("Failed to serialize request: {}", e)))
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> RelayResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            RelayError::Deserialization(format!("Failed to deserialize request: {}", e))
        })
    }
}

/// JSON-RPC 2.0 response object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Result of the method call, must be present if no error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error information, must be present if no resul
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Request identifier that this response corresponds to
    pub id: serde_json::Value,
}

impl JsonRpcResponse {
    /// Create a new successful JSON-RPC response
    pub fn success(result: serde_json::Value, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create a new error JSON-RPC response
    pub fn error(error: JsonRpcError, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Serialize the response to JSON bytes
    pub fn to_bytes(&self) -> RelayResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| RelayError::Serialization(format!("Failed to serialize response: {}", e)))
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> RelayResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            RelayError::Deserialization(format!("Failed to deserialize response: {}", e))
        })
    }
}

/// JSON-RPC 2.0 notification object (has no ID)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Method name to invoke
    pub method: String,
    /// Parameters for the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcNotification {
    /// Create a new JSON-RPC notification
    pub fn new(method: &str, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        }
    }

    /// Serialize the notification to JSON bytes
    pub fn to_bytes(&self) -> RelayResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            RelayError::Serialization(format!("Failed to serialize notification: {}", e))
        })
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> RelayResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            RelayError::Deserialization(format!("Failed to deserialize notification: {}", e))
        })
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Create a new JSON-RPC error
    pub fn new(code: i32, message: &str, data: Option<serde_json::Value>) -> Self {
        Self {
            code,
            message: message.to_string(),
            data,
        }
    }

    /// Parse error (-32700)
    pub fn parse_error(message: &str) -> Self {
        Self::new(-32700, message, None)
    }

    /// Invalid request error (-32600)
    pub fn invalid_request(message: &str) -> Self {
        Self::new(-32600, message, None)
    }

    /// Method not found error (-32601)
    pub fn method_not_found(message: &str) -> Self {
        Self::new(-32601, message, None)
    }

    /// Invalid params error (-32602)
    pub fn invalid_params(message: &str) -> Self {
        Self::new(-32602, message, None)
    }

    /// Internal error (-32603)
    pub fn internal_error(message: &str) -> Self {
        Self::new(-32603, message, None)
    }
}
