//! Framed TCP connection used for the backend control channel.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;

use crate::framing::{self, MAX_FRAME_SIZE};
use crate::{Connection, ConnectionId, TransportError};

/// A [`Connection`] over a TCP stream with length-prefixed frames.
///
/// The read and write halves are locked independently, so a task waiting
/// in `recv` does not block another task calling `send`.
pub struct TcpConnection {
    id: ConnectionId,
    peer: Option<SocketAddr>,
    reader: Mutex<OwnedReadHalf>,
    writer: Mutex<OwnedWriteHalf>,
    max_frame_size: usize,
}

impl TcpConnection {
    /// Connects to `addr` (a `host:port` string), giving up after `timeout`.
    pub async fn connect(
        addr: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| TransportError::ConnectTimeout {
                addr: addr.to_string(),
                timeout,
            })?
            .map_err(|source| TransportError::ConnectFailed {
                addr: addr.to_string(),
                source,
            })?;

        let conn = Self::from_stream(stream);
        tracing::debug!(id = %conn.id, addr, "TCP connection established");
        Ok(conn)
    }

    /// Wraps an already-connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        // Requests are small and latency-sensitive.
        let _ = stream.set_nodelay(true);
        let peer = stream.peer_addr().ok();
        let (reader, writer) = stream.into_split();
        Self {
            id: ConnectionId::next(),
            peer,
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    /// Overrides the maximum accepted frame size.
    pub fn with_max_frame_size(mut self, max: usize) -> Self {
        self.max_frame_size = max;
        self
    }

    /// Returns the remote address, if it was known at connect time.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let mut writer = self.writer.lock().await;
        framing::write_frame(&mut *writer, data, self.max_frame_size).await
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut reader = self.reader.lock().await;
        framing::read_frame(&mut *reader, self.max_frame_size).await
    }

    async fn close(&self) -> Result<(), Self::Error> {
        use tokio::io::AsyncWriteExt;
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
