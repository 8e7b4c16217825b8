//! `RoomlinkClient` builder and room operations.
//!
//! This is the entry point for applications. It ties the layers
//! together: TCP control connection → RPC channel → room negotiator.

use std::collections::HashMap;
use std::time::Duration;

use roomlink_net::ProbePolicy;
use roomlink_protocol::{BincodeCodec, RoomId};
use roomlink_room::{ClientConfig, DevServer, RoomConnection, RoomNegotiator};
use roomlink_rpc::{RpcChannel, RpcConfig};
use roomlink_transport::{
    Connection, TcpConnection, TransportError, WebSocketConnection, framing::MAX_FRAME_SIZE,
};

use crate::RoomlinkError;

/// Builder for configuring and connecting a [`RoomlinkClient`].
///
/// # Example
///
/// ```rust,ignore
/// use roomlink::prelude::*;
///
/// let client = RoomlinkClient::builder()
///     .secure_connections(true)
///     .connect("rooms.example.com:7350")
///     .await?;
/// let room = client.join_room("lobby", HashMap::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RoomlinkClientBuilder {
    config: ClientConfig,
    rpc: RpcConfig,
    control_timeout: Duration,
    max_frame_size: usize,
}

impl RoomlinkClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            rpc: RpcConfig::default(),
            control_timeout: Duration::from_secs(5),
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    /// Replaces the whole room configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes every join to a local room server.
    pub fn dev_server(mut self, address: impl Into<String>, port: u16) -> Self {
        self.config = self.config.with_dev_server(DevServer::new(address, port));
        self
    }

    /// Use `wss://` for room connections.
    pub fn secure_connections(mut self, secure: bool) -> Self {
        self.config = self.config.with_secure_connections(secure);
        self
    }

    pub fn probe_policy(mut self, policy: ProbePolicy) -> Self {
        self.config = self.config.with_probe_policy(policy);
        self
    }

    /// Bound on opening a room connection.
    pub fn room_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(timeout);
        self
    }

    /// Bound on waiting for each backend reply.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.rpc.request_timeout = timeout;
        self
    }

    /// Bound on opening the control connection.
    pub fn control_timeout(mut self, timeout: Duration) -> Self {
        self.control_timeout = timeout;
        self
    }

    /// Largest control frame accepted in either direction.
    pub fn max_frame_size(mut self, max: usize) -> Self {
        self.max_frame_size = max;
        self
    }

    /// Opens the TCP control connection to the backend at `addr`.
    pub async fn connect(self, addr: &str) -> Result<RoomlinkClient, RoomlinkError> {
        let conn = TcpConnection::connect(addr, self.control_timeout)
            .await?
            .with_max_frame_size(self.max_frame_size);
        tracing::info!(addr, conn = %conn.id(), "connected to backend");
        Ok(self.build(conn))
    }

    /// Builds a client over an already-established control connection.
    pub fn build<T>(self, conn: T) -> RoomlinkClient<T>
    where
        T: Connection<Error = TransportError>,
    {
        let rpc = RpcChannel::with_config(conn, BincodeCodec, self.rpc);
        RoomlinkClient {
            negotiator: RoomNegotiator::new(rpc, self.config),
        }
    }
}

impl Default for RoomlinkClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A client connected to a Roomlink backend.
///
/// Cheap to share by reference: concurrent calls queue on the control
/// connection.
pub struct RoomlinkClient<T = TcpConnection> {
    negotiator: RoomNegotiator<T, BincodeCodec>,
}

impl RoomlinkClient {
    /// Creates a new builder.
    pub fn builder() -> RoomlinkClientBuilder {
        RoomlinkClientBuilder::new()
    }
}

impl<T> RoomlinkClient<T>
where
    T: Connection<Error = TransportError>,
{
    /// Creates a room and returns the id the backend assigned.
    pub async fn create_room(
        &self,
        room_id: impl Into<RoomId>,
        room_type: impl Into<String>,
        visible: bool,
        room_data: HashMap<String, String>,
    ) -> Result<RoomId, RoomlinkError> {
        Ok(self
            .negotiator
            .create_room(room_id, room_type, visible, room_data)
            .await?)
    }

    /// Joins a room and connects to one of its servers.
    pub async fn join_room(
        &self,
        room_id: impl Into<RoomId>,
        join_data: HashMap<String, String>,
    ) -> Result<RoomConnection<WebSocketConnection>, RoomlinkError> {
        Ok(self.negotiator.join_room(room_id, join_data).await?)
    }

    /// Creates a room, or joins it if it exists, and connects to one of
    /// its servers.
    pub async fn create_join_room(
        &self,
        room_id: impl Into<RoomId>,
        room_type: impl Into<String>,
        visible: bool,
        room_data: HashMap<String, String>,
        join_data: HashMap<String, String>,
    ) -> Result<RoomConnection<WebSocketConnection>, RoomlinkError> {
        Ok(self
            .negotiator
            .create_join_room(room_id, room_type, visible, room_data, join_data)
            .await?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.negotiator.config()
    }

    /// Closes the control connection. Open room connections are not
    /// affected.
    pub async fn close(&self) -> Result<(), RoomlinkError> {
        Ok(self.negotiator.rpc().close().await?)
    }
}
