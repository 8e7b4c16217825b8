//! Unified error type for Roomlink.

use roomlink_net::ResolveError;
use roomlink_protocol::{ErrorCode, ProtocolError};
use roomlink_room::RoomError;
use roomlink_rpc::RpcError;
use roomlink_transport::TransportError;

use crate::logging::TracingError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `roomlink` facade you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// conversions let `?` lift sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RoomlinkError {
    /// Opening or using the control connection failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A message could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A hostname could not be resolved.
    ///
    /// Room operations never return this: they treat an unresolvable
    /// endpoint as unreachable and move on. It is here so code that calls
    /// a [`roomlink::net`](crate::net) resolver directly can still use `?`.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A request failed or was rejected by the backend.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A room operation failed.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The tracing subscriber could not be installed.
    #[error(transparent)]
    Tracing(#[from] TracingError),
}

impl RoomlinkError {
    /// Returns `true` if the backend rejected the request.
    pub fn is_application(&self) -> bool {
        self.code().is_some()
    }

    /// The backend's error code, for backend rejections.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rpc(e) => e.code(),
            Self::Room(e) => e.code(),
            _ => None,
        }
    }
}
