//! Core protocol types for the control channel's wire format.
//!
//! Everything in this module travels "on the wire": these structures are
//! serialized by a [`Codec`](crate::Codec), sent to the backend over the
//! control connection, and deserialized on the other side.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The identifier of a room on the backend.
///
/// A newtype over `String` so a room id can't be confused with a room
/// type or any other string argument. `#[serde(transparent)]` keeps the
/// wire shape a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The opaque token the backend issues on every successful create/join.
///
/// The room server uses it to authenticate the data connection. The
/// client never parses it; it's a capability, so `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinCredential(String);

impl JoinCredential {
    /// Wraps a backend-issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for handing to the transport.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JoinCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JoinCredential(<{} bytes>)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// A backend-advertised network location for a room server.
///
/// `address` may be a hostname or an IP literal. The backend sends a list
/// of these ordered by its own preference (first = most preferred).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname or IP literal.
    pub address: String,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Creates an endpoint from an address and port.
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }
}

/// Prints `host:port`, bracketing bare IPv6 literals (`[::1]:7000`).
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.address.contains(':') && !self.address.starts_with('[') {
            write!(f, "[{}]:{}", self.address, self.port)
        } else {
            write!(f, "{}:{}", self.address, self.port)
        }
    }
}

// ---------------------------------------------------------------------------
// OperationId
// ---------------------------------------------------------------------------

/// A protocol operation identifier.
///
/// Small integers that tell the backend which payload shape follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(pub u32);

impl OperationId {
    /// Create a room.
    pub const CREATE_ROOM: Self = Self(21);
    /// Join an existing room.
    pub const JOIN_ROOM: Self = Self(24);
    /// Create a room if absent, then join it.
    pub const CREATE_JOIN_ROOM: Self = Self(27);
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Errors reported by the backend
// ---------------------------------------------------------------------------

/// Application-level error codes reported by the backend.
///
/// On the wire this is a plain `u16` (`#[serde(from, into)]`), so codes
/// added on the backend later decode as [`ErrorCode::Unknown`] instead of
/// failing the whole reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum ErrorCode {
    InternalError,
    InvalidRequest,
    Unauthorized,
    RoomNotFound,
    RoomAlreadyExists,
    RoomIsFull,
    RoomTypeNotFound,
    /// A code this client doesn't know, kept verbatim.
    Unknown(u16),
}

impl From<u16> for ErrorCode {
    fn from(code: u16) -> Self {
        match code {
            0 => Self::InternalError,
            1 => Self::InvalidRequest,
            2 => Self::Unauthorized,
            3 => Self::RoomNotFound,
            4 => Self::RoomAlreadyExists,
            5 => Self::RoomIsFull,
            6 => Self::RoomTypeNotFound,
            other => Self::Unknown(other),
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InternalError => 0,
            ErrorCode::InvalidRequest => 1,
            ErrorCode::Unauthorized => 2,
            ErrorCode::RoomNotFound => 3,
            ErrorCode::RoomAlreadyExists => 4,
            ErrorCode::RoomIsFull => 5,
            ErrorCode::RoomTypeNotFound => 6,
            ErrorCode::Unknown(other) => other,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// The error shape of a rejected request: a code plus a human-readable
/// message, both passed to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcFault {
    pub code: ErrorCode,
    pub message: String,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomId::from("lobby-1")).unwrap();
        assert_eq!(json, "\"lobby-1\"");
    }

    #[test]
    fn test_operation_id_constants_match_protocol() {
        assert_eq!(OperationId::CREATE_ROOM.0, 21);
        assert_eq!(OperationId::JOIN_ROOM.0, 24);
        assert_eq!(OperationId::CREATE_JOIN_ROOM.0, 27);
        assert_eq!(OperationId::JOIN_ROOM.to_string(), "op-24");
    }

    #[test]
    fn test_join_credential_debug_hides_token() {
        let credential = JoinCredential::new("super-secret");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(credential.as_str(), "super-secret");
    }

    #[test]
    fn test_endpoint_display_hostname() {
        assert_eq!(Endpoint::new("a.example", 7000).to_string(), "a.example:7000");
    }

    #[test]
    fn test_endpoint_display_brackets_ipv6() {
        assert_eq!(Endpoint::new("::1", 7000).to_string(), "[::1]:7000");
        assert_eq!(Endpoint::new("[::1]", 7000).to_string(), "[::1]:7000");
    }

    #[test]
    fn test_error_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::RoomIsFull).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn test_error_code_unknown_value_is_preserved() {
        let code: ErrorCode = serde_json::from_str("4242").unwrap();
        assert_eq!(code, ErrorCode::Unknown(4242));
        assert_eq!(u16::from(code), 4242);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::RoomNotFound.to_string(), "RoomNotFound");
        assert_eq!(ErrorCode::Unknown(99).to_string(), "Unknown(99)");
    }
}
