//! Error types for the RPC layer.

use std::time::Duration;

use roomlink_protocol::{ErrorCode, ProtocolError, RpcFault};
use roomlink_transport::TransportError;

/// Errors returned by [`RpcChannel`](crate::RpcChannel) calls.
///
/// Everything except [`RpcError::Application`] is a failure of the
/// channel itself; `Application` means the backend understood the
/// request and refused it.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The control connection failed while sending or receiving.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply could not be decoded, or the request could not be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// No reply arrived within the configured request timeout.
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    /// An earlier request ended before its reply was fully read and
    /// matched; the channel refuses further requests.
    #[error("control channel is desynchronized")]
    Desynchronized,

    /// The backend rejected the request.
    #[error("backend rejected request ({code}): {message}")]
    Application { code: ErrorCode, message: String },
}

impl RpcError {
    /// Returns `true` if the backend itself rejected the request.
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// The backend's error code, for application errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<RpcFault> for RpcError {
    fn from(fault: RpcFault) -> Self {
        Self::Application {
            code: fault.code,
            message: fault.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fault_is_application_error() {
        let err: RpcError = RpcFault {
            code: ErrorCode::RoomAlreadyExists,
            message: "room lobby exists".into(),
        }
        .into();

        assert!(err.is_application());
        assert_eq!(err.code(), Some(ErrorCode::RoomAlreadyExists));
        assert!(err.to_string().contains("room lobby exists"));
    }

    #[test]
    fn test_transport_error_is_not_application() {
        let err: RpcError = TransportError::ConnectionClosed("gone".into()).into();
        assert!(!err.is_application());
        assert_eq!(err.code(), None);
    }
}
