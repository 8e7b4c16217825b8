//! Error types for the protocol layer.
//!
//! Each crate in Roomlink defines its own error enum. When you see a
//! `ProtocolError`, the problem is in serialization or in the shape of a
//! message, not in networking or endpoint selection.

use crate::OperationId;

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Binary serialization failed.
    #[cfg(feature = "bincode")]
    #[error("encode failed: {0}")]
    Encode(bincode::error::EncodeError),

    /// Binary deserialization failed: truncated input, invalid variant
    /// tags, or bytes that don't match the expected type.
    #[cfg(feature = "bincode")]
    #[error("decode failed: {0}")]
    Decode(bincode::error::DecodeError),

    /// JSON serialization failed.
    #[cfg(feature = "json")]
    #[error("json encode failed: {0}")]
    JsonEncode(serde_json::Error),

    /// JSON deserialization failed.
    #[cfg(feature = "json")]
    #[error("json decode failed: {0}")]
    JsonDecode(serde_json::Error),

    /// A reply arrived for a different operation than the one requested.
    #[error("reply for {actual} does not match request {expected}")]
    OperationMismatch {
        expected: OperationId,
        actual: OperationId,
    },

    /// The message decoded but violates protocol rules.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
