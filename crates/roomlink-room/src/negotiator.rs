//! Room session negotiation and endpoint selection.

use std::collections::HashMap;

use roomlink_net::{Prober, Resolver, SystemResolver, TcpProber};
use roomlink_protocol::{
    Codec, CreateJoinRoom, CreateJoinRoomArgs, CreateRoom, CreateRoomArgs, Endpoint,
    JoinCredential, JoinRoom, JoinRoomArgs, RoomId,
};
use roomlink_rpc::RpcChannel;
use roomlink_transport::{Connection, TransportError};

use crate::{ClientConfig, Connector, RoomConnection, RoomError, WebSocketConnector};

/// Creates and joins rooms on top of an [`RpcChannel`].
///
/// Every operation sends exactly one request. Join-type operations then
/// pick a room server: either the configured dev override, or the first
/// endpoint from the backend's list that passes probe, resolve and
/// connect, tried strictly one at a time in the backend's order.
///
/// The negotiator holds no state besides its configuration and its
/// collaborators, so calls are independent of each other.
///
/// # Type parameters
///
/// - `T`, `K` — control connection and codec of the RPC channel
/// - `P` — reachability prober ([`TcpProber`] by default)
/// - `R` — name resolver ([`SystemResolver`] by default)
/// - `N` — room connector ([`WebSocketConnector`] by default)
pub struct RoomNegotiator<T, K, P = TcpProber, R = SystemResolver, N = WebSocketConnector> {
    rpc: RpcChannel<T, K>,
    config: ClientConfig,
    prober: P,
    resolver: R,
    connector: N,
}

impl<T, K> RoomNegotiator<T, K>
where
    T: Connection<Error = TransportError>,
    K: Codec,
{
    /// Creates a negotiator that probes over TCP, resolves through the
    /// system resolver and opens WebSocket room connections.
    pub fn new(rpc: RpcChannel<T, K>, config: ClientConfig) -> Self {
        Self::with_parts(rpc, config, TcpProber, SystemResolver, WebSocketConnector)
    }
}

impl<T, K, P, R, N> RoomNegotiator<T, K, P, R, N>
where
    T: Connection<Error = TransportError>,
    K: Codec,
    P: Prober,
    R: Resolver,
    N: Connector,
{
    /// Creates a negotiator with custom network collaborators.
    pub fn with_parts(
        rpc: RpcChannel<T, K>,
        config: ClientConfig,
        prober: P,
        resolver: R,
        connector: N,
    ) -> Self {
        Self {
            rpc,
            config,
            prober,
            resolver,
            connector,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The RPC channel carrying the room operations.
    pub fn rpc(&self) -> &RpcChannel<T, K> {
        &self.rpc
    }

    /// Asks the backend to create a room. Returns the room id the
    /// backend assigned.
    pub async fn create_room(
        &self,
        room_id: impl Into<RoomId>,
        room_type: impl Into<String>,
        visible: bool,
        room_data: HashMap<String, String>,
    ) -> Result<RoomId, RoomError> {
        let args = CreateRoomArgs {
            room_id: room_id.into(),
            room_type: room_type.into(),
            visible,
            room_data,
            is_dev_room: self.config.is_dev(),
        };

        let output = self.rpc.call::<CreateRoom>(&args).await?;
        tracing::info!(room_id = %output.room_id, "room created");
        Ok(output.room_id)
    }

    /// Joins an existing room and connects to one of its servers.
    pub async fn join_room(
        &self,
        room_id: impl Into<RoomId>,
        join_data: HashMap<String, String>,
    ) -> Result<RoomConnection<N::Connection>, RoomError> {
        let args = JoinRoomArgs {
            room_id: room_id.into(),
            join_data,
            is_dev_room: self.config.is_dev(),
        };

        let output = self.rpc.call::<JoinRoom>(&args).await?;
        let conn = self.establish(&output.endpoints, output.join_key).await?;
        tracing::info!(room_id = %args.room_id, endpoint = %conn.endpoint(), "joined room");
        Ok(conn)
    }

    /// Creates a room (or joins it if it already exists) and connects to
    /// one of its servers.
    pub async fn create_join_room(
        &self,
        room_id: impl Into<RoomId>,
        room_type: impl Into<String>,
        visible: bool,
        room_data: HashMap<String, String>,
        join_data: HashMap<String, String>,
    ) -> Result<RoomConnection<N::Connection>, RoomError> {
        let args = CreateJoinRoomArgs {
            room_id: room_id.into(),
            server_type: room_type.into(),
            visible,
            room_data,
            join_data,
            is_dev_room: self.config.is_dev(),
        };

        let output = self.rpc.call::<CreateJoinRoom>(&args).await?;
        let conn = self.establish(&output.endpoints, output.join_key).await?;
        tracing::info!(room_id = %output.room_id, endpoint = %conn.endpoint(), "created and joined room");
        Ok(conn)
    }

    /// Connects to the dev override if one is configured, otherwise runs
    /// selection over the backend's list.
    async fn establish(
        &self,
        endpoints: &[Endpoint],
        credential: JoinCredential,
    ) -> Result<RoomConnection<N::Connection>, RoomError> {
        match &self.config.dev_server {
            Some(dev) => {
                tracing::debug!(address = %dev.address, port = dev.port, "using dev server override");
                self.open(&dev.endpoint(), &credential)
                    .await
                    .ok_or(RoomError::NoReachableEndpoint { candidates: 1 })
            }
            None => self.select(endpoints, &credential).await,
        }
    }

    /// Walks `candidates` in order and returns the first that probes,
    /// resolves and connects.
    async fn select(
        &self,
        candidates: &[Endpoint],
        credential: &JoinCredential,
    ) -> Result<RoomConnection<N::Connection>, RoomError> {
        if candidates.is_empty() {
            tracing::warn!("backend returned no endpoints");
            return Err(RoomError::NoReachableEndpoint { candidates: 0 });
        }

        let policy = &self.config.probe_policy;
        for candidate in candidates {
            if !self
                .prober
                .is_reachable(&candidate.address, candidate.port, policy)
                .await
            {
                tracing::debug!(%candidate, "candidate unreachable");
                continue;
            }

            if let Some(conn) = self.open(candidate, credential).await {
                return Ok(conn);
            }
        }

        tracing::warn!(candidates = candidates.len(), "no reachable endpoint");
        Err(RoomError::NoReachableEndpoint {
            candidates: candidates.len(),
        })
    }

    /// Resolves `endpoint` and opens the room connection. `None` means
    /// this endpoint is unusable; the reason has been logged.
    async fn open(
        &self,
        endpoint: &Endpoint,
        credential: &JoinCredential,
    ) -> Option<RoomConnection<N::Connection>> {
        let resolved = match self.resolver.resolve(&endpoint.address, endpoint.port).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(%endpoint, error = %e, "failed to resolve endpoint");
                return None;
            }
        };

        match self
            .connector
            .connect(
                &resolved,
                credential,
                self.config.use_secure_connections,
                self.config.connect_timeout,
            )
            .await
        {
            Ok(conn) => {
                tracing::debug!(%endpoint, %resolved, "room connection open");
                Some(RoomConnection::new(conn, resolved, credential.clone()))
            }
            Err(e) => {
                tracing::warn!(%endpoint, %resolved, error = %e, "failed to connect to endpoint");
                None
            }
        }
    }
}
