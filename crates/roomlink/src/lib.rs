//! # Roomlink
//!
//! Client library for creating and joining real-time multiplayer rooms
//! hosted by a remote backend.
//!
//! A [`RoomlinkClient`] holds one control connection to the backend.
//! Each room operation is a single request on it; joining additionally
//! picks a live room server out of the endpoints the backend offers and
//! returns a connection to it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! use roomlink::prelude::*;
//!
//! # async fn run() -> Result<(), RoomlinkError> {
//! let client = RoomlinkClient::builder()
//!     .connect("rooms.example.com:7350")
//!     .await?;
//!
//! let room = client
//!     .create_join_room("lobby", "battle", true, HashMap::new(), HashMap::new())
//!     .await?;
//! room.send(b"ready").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod logging;

pub use client::{RoomlinkClient, RoomlinkClientBuilder};
pub use error::RoomlinkError;
pub use logging::{LogFormat, TracingConfig, TracingError, init_tracing};

pub use roomlink_net as net;
pub use roomlink_protocol as protocol;
pub use roomlink_room as room;
pub use roomlink_rpc as rpc;
pub use roomlink_transport as transport;

/// Common imports for applications.
pub mod prelude {
    pub use crate::{RoomlinkClient, RoomlinkClientBuilder, RoomlinkError};
    pub use roomlink_net::ProbePolicy;
    pub use roomlink_protocol::{Endpoint, ErrorCode, JoinCredential, RoomId};
    pub use roomlink_room::{ClientConfig, DevServer, RoomConnection};
    pub use roomlink_transport::Connection;
}
