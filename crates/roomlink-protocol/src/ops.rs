//! The room operations and their argument/result shapes.
//!
//! Each operation is a marker type implementing [`Operation`], which ties
//! an [`OperationId`] to the argument and result structs at compile time.
//! The RPC channel uses this to pick the right types for a call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Endpoint, JoinCredential, OperationId, RoomId};

/// Binds an operation id to its request and response payload types.
pub trait Operation {
    /// The id sent in the request envelope.
    const ID: OperationId;
    /// Request payload.
    type Args: Serialize + DeserializeOwned + Send + Sync;
    /// Success payload.
    type Output: Serialize + DeserializeOwned + Send;
}

/// Operation 21: create a room.
#[derive(Debug, Clone, Copy)]
pub struct CreateRoom;

/// Operation 24: join an existing room.
#[derive(Debug, Clone, Copy)]
pub struct JoinRoom;

/// Operation 27: create the room if absent, then join it.
#[derive(Debug, Clone, Copy)]
pub struct CreateJoinRoom;

impl Operation for CreateRoom {
    const ID: OperationId = OperationId::CREATE_ROOM;
    type Args = CreateRoomArgs;
    type Output = CreateRoomOutput;
}

impl Operation for JoinRoom {
    const ID: OperationId = OperationId::JOIN_ROOM;
    type Args = JoinRoomArgs;
    type Output = JoinRoomOutput;
}

impl Operation for CreateJoinRoom {
    const ID: OperationId = OperationId::CREATE_JOIN_ROOM;
    type Args = CreateJoinRoomArgs;
    type Output = CreateJoinRoomOutput;
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomArgs {
    pub room_id: RoomId,
    pub room_type: String,
    /// Whether the room shows up in listings.
    pub visible: bool,
    pub room_data: HashMap<String, String>,
    /// Set when the client targets a local development server.
    pub is_dev_room: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomOutput {
    /// The id the backend actually assigned.
    pub room_id: RoomId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomArgs {
    pub room_id: RoomId,
    pub join_data: HashMap<String, String>,
    pub is_dev_room: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomOutput {
    pub join_key: JoinCredential,
    /// Room server candidates, most preferred first.
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJoinRoomArgs {
    pub room_id: RoomId,
    pub server_type: String,
    pub visible: bool,
    pub room_data: HashMap<String, String>,
    pub join_data: HashMap<String, String>,
    pub is_dev_room: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJoinRoomOutput {
    pub room_id: RoomId,
    pub join_key: JoinCredential,
    pub endpoints: Vec<Endpoint>,
}
