//! Hostname resolution.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::{ResolveError, bare_host};

/// An endpoint whose address has been resolved to a concrete IP.
///
/// Short-lived: it exists to open exactly one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedEndpoint {
    pub address: IpAddr,
    pub port: u16,
}

impl ResolvedEndpoint {
    /// Returns the endpoint as a socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl From<SocketAddr> for ResolvedEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self {
            address: addr.ip(),
            port: addr.port(),
        }
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.socket_addr(), f)
    }
}

/// Turns a hostname (or IP literal) into a concrete address.
pub trait Resolver: Send + Sync + 'static {
    /// Resolves `host` and pairs the result with `port`.
    ///
    /// IP literals must resolve to themselves.
    async fn resolve(&self, host: &str, port: u16) -> Result<ResolvedEndpoint, ResolveError>;
}

/// [`Resolver`] backed by the operating system (`getaddrinfo` via Tokio).
///
/// When a name has several addresses the first one returned wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str, port: u16) -> Result<ResolvedEndpoint, ResolveError> {
        let host = bare_host(host);

        if let Ok(address) = host.parse::<IpAddr>() {
            return Ok(ResolvedEndpoint { address, port });
        }

        let resolved = tokio::net::lookup_host((host, port))
            .await
            .map_err(|source| ResolveError::Lookup {
                host: host.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| ResolveError::NoAddresses {
                host: host.to_string(),
            })?;

        tracing::debug!(host, %resolved, "resolved host");
        Ok(resolved.into())
    }
}
