//! Opening the room connection once an endpoint has been chosen.

use std::time::Duration;

use roomlink_net::ResolvedEndpoint;
use roomlink_protocol::JoinCredential;
use roomlink_transport::{Connection, TransportError, WebSocketConnection};

/// Opens the data connection to a room server and presents the join
/// credential.
///
/// The negotiator calls this only after a candidate has been probed and
/// resolved. An `Err` moves selection on to the next candidate.
pub trait Connector: Send + Sync + 'static {
    /// The connection type handed back to the application.
    type Connection: Connection<Error = TransportError>;

    async fn connect(
        &self,
        endpoint: &ResolvedEndpoint,
        credential: &JoinCredential,
        secure: bool,
        timeout: Duration,
    ) -> Result<Self::Connection, TransportError>;
}

/// Connects over WebSocket to `ws://ip:port/` (or `wss://` when secure)
/// and sends the credential as the first text message.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

impl Connector for WebSocketConnector {
    type Connection = WebSocketConnection;

    async fn connect(
        &self,
        endpoint: &ResolvedEndpoint,
        credential: &JoinCredential,
        secure: bool,
        timeout: Duration,
    ) -> Result<Self::Connection, TransportError> {
        let url = room_url(endpoint, secure);
        let conn = WebSocketConnection::connect(&url, timeout).await?;
        conn.send_text(credential.as_str()).await?;
        Ok(conn)
    }
}

fn room_url(endpoint: &ResolvedEndpoint, secure: bool) -> String {
    let scheme = if secure { "wss" } else { "ws" };
    format!("{scheme}://{endpoint}/")
}
