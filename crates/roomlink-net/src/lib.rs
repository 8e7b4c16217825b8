//! Network helpers used while picking a room server endpoint.
//!
//! - [`Resolver`] / [`SystemResolver`] — hostname → concrete IP address.
//! - [`Prober`] / [`TcpProber`] — "can I open a TCP connection to this
//!   address within a bounded time?"
//!
//! Both are traits so the negotiator can be driven by fakes in tests.

#![allow(async_fn_in_trait)]

mod error;
mod prober;
mod resolver;

pub use error::ResolveError;
pub use prober::{ProbePolicy, Prober, TcpProber};
pub use resolver::{ResolvedEndpoint, Resolver, SystemResolver};

/// Strips the brackets from an IPv6 literal written as `[::1]`.
///
/// Endpoint addresses may arrive in URL style; the socket APIs want the
/// bare form.
pub(crate) fn bare_host(address: &str) -> &str {
    address
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(address)
}
