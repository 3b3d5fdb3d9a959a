use thiserror::Error;

/// A specialized Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Represents errors that can occur while running the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// IO error during read/write operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize an outgoing frame
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failed to deserialize an incoming frame
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The relay was dropped while a receive was suspended
    #[error("Relay closed")]
    Closed,

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}
