//! Request and reply envelopes exchanged on the control channel.
//!
//! ```text
//! client → backend   RequestEnvelope { operation: 24, payload: <JoinRoomArgs> }
//! backend → client   ReplyEnvelope   { operation: 24, outcome: Success(<JoinRoomOutput>) }
//!                                                  or Failure({ code, message })
//! ```
//!
//! The payload bytes are encoded with the same codec as the envelope. The
//! envelope itself never looks inside them; only the caller that knows
//! the operation does.

use serde::{Deserialize, Serialize};

use crate::{OperationId, RpcFault};

/// A request: an operation id and its encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub operation: OperationId,
    pub payload: Vec<u8>,
}

/// A reply to the most recent request on the channel.
///
/// Replies carry no request id: they are matched to requests by arrival
/// order, so at most one request may be in flight per channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// Echo of the request's operation id.
    pub operation: OperationId,
    pub outcome: ReplyOutcome,
}

/// Either the encoded success payload or the backend's fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyOutcome {
    Success(Vec<u8>),
    Failure(RpcFault),
}

impl ReplyEnvelope {
    /// Builds a success reply.
    pub fn success(operation: OperationId, payload: Vec<u8>) -> Self {
        Self {
            operation,
            outcome: ReplyOutcome::Success(payload),
        }
    }

    /// Builds a failure reply.
    pub fn failure(operation: OperationId, fault: RpcFault) -> Self {
        Self {
            operation,
            outcome: ReplyOutcome::Failure(fault),
        }
    }
}
