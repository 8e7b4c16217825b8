//! Control-channel wire protocol for Roomlink.
//!
//! This crate defines the "language" the client speaks with the backend:
//!
//! - **Types** ([`RoomId`], [`Endpoint`], [`JoinCredential`],
//!   [`OperationId`], [`ErrorCode`]) — the values that travel on the wire.
//! - **Envelopes** ([`RequestEnvelope`], [`ReplyEnvelope`]) — the outer
//!   shape of every request and reply.
//! - **Operations** ([`Operation`] and the three room operations) — which
//!   payload shape goes with which operation id.
//! - **Codec** ([`Codec`], [`BincodeCodec`], [`JsonCodec`]) — how those
//!   messages become bytes.
//!
//! # Architecture
//!
//! ```text
//! Transport (frames) → Protocol (envelopes) → RPC channel → Room negotiator
//! ```
//!
//! Nothing here performs I/O.

mod codec;
mod envelope;
mod error;
mod ops;
mod types;

#[cfg(feature = "bincode")]
pub use codec::BincodeCodec;
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use envelope::{ReplyEnvelope, ReplyOutcome, RequestEnvelope};
pub use error::ProtocolError;
pub use ops::{
    CreateJoinRoom, CreateJoinRoomArgs, CreateJoinRoomOutput, CreateRoom,
    CreateRoomArgs, CreateRoomOutput, JoinRoom, JoinRoomArgs, JoinRoomOutput,
    Operation,
};
pub use types::{Endpoint, ErrorCode, JoinCredential, OperationId, RoomId, RpcFault};
