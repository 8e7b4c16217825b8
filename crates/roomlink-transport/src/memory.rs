//! In-process connection pair.
//!
//! Two [`MemoryConnection`]s created by [`MemoryConnection::pair`] are
//! wired back to back: what one sends, the other receives. Useful for
//! running a client against an in-process backend.

use tokio::sync::{Mutex, mpsc};

use crate::{Connection, ConnectionId, TransportError};

/// One end of an in-memory, message-preserving duplex channel.
pub struct MemoryConnection {
    id: ConnectionId,
    /// `None` once this side has been closed.
    tx: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    rx: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

impl MemoryConnection {
    /// Creates two connected ends.
    pub fn pair() -> (Self, Self) {
        let (a_tx, a_rx) = mpsc::unbounded_channel();
        let (b_tx, b_rx) = mpsc::unbounded_channel();
        let a = Self {
            id: ConnectionId::next(),
            tx: Mutex::new(Some(a_tx)),
            rx: Mutex::new(b_rx),
        };
        let b = Self {
            id: ConnectionId::next(),
            tx: Mutex::new(Some(b_tx)),
            rx: Mutex::new(a_rx),
        };
        (a, b)
    }
}

impl Connection for MemoryConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let tx = self.tx.lock().await;
        let tx = tx.as_ref().ok_or_else(|| {
            TransportError::ConnectionClosed("local side closed".into())
        })?;
        tx.send(data.to_vec()).map_err(|_| {
            TransportError::ConnectionClosed("peer dropped".into())
        })
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.rx.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), Self::Error> {
        // Dropping the sender lets the peer drain pending messages and
        // then observe a clean close.
        self.tx.lock().await.take();
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
