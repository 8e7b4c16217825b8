//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The RPC layer doesn't care HOW messages are serialized; it just
//! needs something that implements the [`Codec`] trait, so the encoding
//! can be swapped without touching the channel or the negotiator.
//!
//! Two implementations ship with the crate:
//! - [`BincodeCodec`] — compact binary, the wire format the backend speaks.
//! - [`JsonCodec`] — human-readable, handy when debugging a fake backend.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → the codec is shared by a channel that may be used
///   from any Tokio worker thread.
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes, so the receive buffer can be dropped
/// right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns an encode error if the value can't be represented in this
    /// format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns a decode error if the bytes are malformed, incomplete, or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// BincodeCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses `bincode` with its standard configuration
/// (variable-length integers, little endian).
///
/// This is the default wire codec. Decoding rejects trailing bytes: a
/// message must be consumed exactly.
///
/// ## Example
///
/// ```rust
/// use roomlink_protocol::{BincodeCodec, Codec, Endpoint};
///
/// let codec = BincodeCodec;
/// let endpoint = Endpoint::new("eu-1.example.com", 7000);
///
/// let bytes = codec.encode(&endpoint).unwrap();
/// let decoded: Endpoint = codec.decode(&bytes).unwrap();
/// assert_eq!(endpoint, decoded);
/// ```
#[cfg(feature = "bincode")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

#[cfg(feature = "bincode")]
impl Codec for BincodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        let (value, consumed) =
            bincode::serde::decode_from_slice(data, bincode::config::standard())
                .map_err(ProtocolError::Decode)?;
        if consumed != data.len() {
            return Err(ProtocolError::InvalidMessage(format!(
                "{} trailing bytes after message",
                data.len() - consumed
            )));
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Larger than bincode, but every message can be logged and read by eye.
/// This is behind the `json` feature flag (enabled by default).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::JsonEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::JsonDecode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Endpoint, ErrorCode, ReplyEnvelope, ReplyOutcome, RpcFault};
    use crate::OperationId;

    #[cfg(feature = "bincode")]
    #[test]
    fn test_bincode_decode_rejects_trailing_bytes() {
        let codec = BincodeCodec;
        let mut bytes = codec.encode(&Endpoint::new("a.example", 7000)).unwrap();
        bytes.push(0xff);

        let result: Result<Endpoint, _> = codec.decode(&bytes);

        assert!(matches!(result, Err(ProtocolError::InvalidMessage(_))));
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn test_bincode_decode_truncated_returns_decode_error() {
        let codec = BincodeCodec;
        let bytes = codec.encode(&Endpoint::new("a.example", 7000)).unwrap();

        let result: Result<Endpoint, _> = codec.decode(&bytes[..3]);

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn test_bincode_carries_failure_reply() {
        let codec = BincodeCodec;
        let reply = ReplyEnvelope {
            operation: OperationId::JOIN_ROOM,
            outcome: ReplyOutcome::Failure(RpcFault {
                code: ErrorCode::RoomIsFull,
                message: "room is full".into(),
            }),
        };

        let bytes = codec.encode(&reply).unwrap();
        let decoded: ReplyEnvelope = codec.decode(&bytes).unwrap();

        assert_eq!(decoded, reply);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_decode_garbage_returns_error() {
        let result: Result<Endpoint, _> = JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::JsonDecode(_))));
    }
}
