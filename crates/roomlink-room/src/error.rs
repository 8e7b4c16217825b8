//! Error types for the room layer.

use roomlink_protocol::ErrorCode;
use roomlink_rpc::RpcError;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The RPC failed: transport trouble or a backend rejection.
    /// Nothing was probed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Every candidate endpoint (or the dev override) failed to probe,
    /// resolve or connect.
    #[error("no reachable endpoint among {candidates} candidate(s)")]
    NoReachableEndpoint { candidates: usize },
}

impl RoomError {
    /// Returns `true` if the backend rejected the request.
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Rpc(e) if e.is_application())
    }

    /// The backend's error code, for backend rejections.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rpc(e) => e.code(),
            Self::NoReachableEndpoint { .. } => None,
        }
    }
}
