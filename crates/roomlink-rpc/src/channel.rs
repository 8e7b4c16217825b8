//! The request/response channel.

use std::sync::atomic::{AtomicBool, Ordering};

use roomlink_protocol::{
    Codec, Operation, OperationId, ProtocolError, ReplyEnvelope, ReplyOutcome,
    RequestEnvelope,
};
use roomlink_transport::{Connection, TransportError};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{RpcConfig, RpcError};

/// Sends typed requests over a control connection and decodes the replies.
///
/// Replies carry no request id, so the channel allows one request in
/// flight at a time: concurrent callers queue on an internal lock and
/// are served in turn. The channel never retries.
///
/// The channel counts as *desynchronized* from the moment a request
/// starts going out until its whole reply has been read and matched.
/// If that window closes early (timeout, transport error, undecodable
/// reply, or the caller dropping the future), a stale reply may still be
/// on the wire, and every later request fails with
/// [`RpcError::Desynchronized`].
pub struct RpcChannel<T, K> {
    conn: T,
    codec: K,
    config: RpcConfig,
    in_flight: Mutex<()>,
    desynced: AtomicBool,
}

impl<T, K> RpcChannel<T, K>
where
    T: Connection<Error = TransportError>,
    K: Codec,
{
    /// Wraps an established control connection with default settings.
    pub fn new(conn: T, codec: K) -> Self {
        Self::with_config(conn, codec, RpcConfig::default())
    }

    /// Wraps an established control connection.
    pub fn with_config(conn: T, codec: K, config: RpcConfig) -> Self {
        Self {
            conn,
            codec,
            config,
            in_flight: Mutex::new(()),
            desynced: AtomicBool::new(false),
        }
    }

    /// Performs operation `O` with compile-time checked payload types.
    pub async fn call<O: Operation>(&self, args: &O::Args) -> Result<O::Output, RpcError> {
        self.request(O::ID, args).await
    }

    /// Sends `args` as operation `operation` and waits for the reply.
    ///
    /// # Errors
    /// Returns [`RpcError::Application`] if the backend refused the
    /// request, and any other variant if the channel itself failed.
    pub async fn request<A, R>(&self, operation: OperationId, args: &A) -> Result<R, RpcError>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let _turn = self.in_flight.lock().await;

        if self.desynced.load(Ordering::Acquire) {
            return Err(RpcError::Desynchronized);
        }

        let envelope = RequestEnvelope {
            operation,
            payload: self.codec.encode(args)?,
        };
        let bytes = self.codec.encode(&envelope)?;

        tracing::debug!(conn = %self.conn.id(), %operation, bytes = bytes.len(), "sending request");
        // Cleared only once the matching reply has been consumed.
        self.desynced.store(true, Ordering::Release);
        self.conn.send(&bytes).await?;

        let reply = match tokio::time::timeout(self.config.request_timeout, self.conn.recv()).await {
            Ok(Ok(Some(reply))) => reply,
            Ok(Ok(None)) => {
                return Err(TransportError::ConnectionClosed(
                    "control channel closed before reply".into(),
                )
                .into());
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                tracing::warn!(%operation, timeout = ?self.config.request_timeout, "request timed out");
                return Err(RpcError::Timeout(self.config.request_timeout));
            }
        };

        let reply: ReplyEnvelope = self.codec.decode(&reply)?;

        if reply.operation != operation {
            return Err(ProtocolError::OperationMismatch {
                expected: operation,
                actual: reply.operation,
            }
            .into());
        }
        self.desynced.store(false, Ordering::Release);

        match reply.outcome {
            ReplyOutcome::Success(payload) => {
                tracing::debug!(%operation, bytes = payload.len(), "reply received");
                Ok(self.codec.decode(&payload)?)
            }
            ReplyOutcome::Failure(fault) => {
                tracing::debug!(%operation, code = %fault.code, message = %fault.message, "request rejected");
                Err(fault.into())
            }
        }
    }

    /// Returns the underlying control connection.
    pub fn connection(&self) -> &T {
        &self.conn
    }

    /// Returns `true` once the channel has refused further requests.
    pub fn is_desynchronized(&self) -> bool {
        self.desynced.load(Ordering::Acquire)
    }

    /// Closes the control connection.
    pub async fn close(&self) -> Result<(), RpcError> {
        self.conn.close().await?;
        Ok(())
    }
}
