//! Room negotiation for Roomlink.
//!
//! Creating or joining a room is one RPC to the backend. A join returns
//! a credential and a list of room server endpoints; the negotiator
//! walks that list in order, probing, resolving and connecting until one
//! endpoint works, and hands back a live [`RoomConnection`].
//!
//! # Key types
//!
//! - [`RoomNegotiator`] — create_room / join_room / create_join_room
//! - [`ClientConfig`] — immutable settings (dev override, TLS, probing)
//! - [`Connector`] — opens the room connection to a resolved endpoint
//! - [`RoomConnection`] — the live connection plus its credential
//! - [`RoomError`] — what can go wrong

#![allow(async_fn_in_trait)]

mod config;
mod connection;
mod connector;
mod error;
mod negotiator;

pub use config::{ClientConfig, DevServer};
pub use connection::RoomConnection;
pub use connector::{Connector, WebSocketConnector};
pub use error::RoomError;
pub use negotiator::RoomNegotiator;
