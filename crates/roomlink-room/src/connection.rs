use roomlink_net::ResolvedEndpoint;
use roomlink_protocol::JoinCredential;
use roomlink_transport::{Connection, ConnectionId};

/// A live connection to one room server.
///
/// Bound to exactly one resolved endpoint and the credential the backend
/// issued for it. Only produced by a successful join; dropped or closed
/// by the application.
pub struct RoomConnection<C> {
    inner: C,
    endpoint: ResolvedEndpoint,
    credential: JoinCredential,
}

impl<C: Connection> RoomConnection<C> {
    pub(crate) fn new(inner: C, endpoint: ResolvedEndpoint, credential: JoinCredential) -> Self {
        Self {
            inner,
            endpoint,
            credential,
        }
    }

    /// The address this connection is bound to.
    pub fn endpoint(&self) -> ResolvedEndpoint {
        self.endpoint
    }

    /// The backend-issued join credential.
    pub fn credential(&self) -> &JoinCredential {
        &self.credential
    }

    /// Borrows the underlying transport connection.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Connection> Connection for RoomConnection<C> {
    type Error = C::Error;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.send(data).await
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        self.inner.recv().await
    }

    async fn close(&self) -> Result<(), Self::Error> {
        tracing::debug!(endpoint = %self.endpoint, "closing room connection");
        self.inner.close().await
    }

    fn id(&self) -> ConnectionId {
        self.inner.id()
    }
}

impl<C> std::fmt::Debug for RoomConnection<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomConnection")
            .field("endpoint", &self.endpoint)
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}
