//! WebSocket client connection using `tokio-tungstenite`.

use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::MaybeTlsStream;
use tokio_tungstenite::tungstenite::Message;

use crate::{Connection, ConnectionId, TransportError};

type WsStream = tokio_tungstenite::WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A single client-side WebSocket connection.
///
/// The sink and stream halves are locked independently, so a pending
/// `recv` does not block `send`.
pub struct WebSocketConnection {
    id: ConnectionId,
    url: String,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl WebSocketConnection {
    /// Opens a WebSocket connection to `url` (`ws://` or `wss://`).
    ///
    /// `wss://` URLs need the `tls` feature.
    pub async fn connect(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let (ws, _response) =
            tokio::time::timeout(timeout, tokio_tungstenite::connect_async(url))
                .await
                .map_err(|_| TransportError::ConnectTimeout {
                    addr: url.to_string(),
                    timeout,
                })?
                .map_err(|e| TransportError::ConnectFailed {
                    addr: url.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        e,
                    ),
                })?;

        let id = ConnectionId::next();
        tracing::debug!(%id, url, "WebSocket connection established");

        let (sink, stream) = ws.split();
        Ok(Self {
            id,
            url: url.to_string(),
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        })
    }

    /// The URL this connection was opened against.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends a text message.
    pub async fn send_text(&self, text: &str) -> Result<(), TransportError> {
        self.send_message(Message::Text(text.into())).await
    }

    async fn send_message(&self, msg: Message) -> Result<(), TransportError> {
        self.sink.lock().await.send(msg).await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        self.send_message(Message::Binary(data.to_vec().into())).await
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut stream = self.stream.lock().await;
        loop {
            let msg = stream.next().await;
            match msg {
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.sink.lock().await.close().await.map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
