//! Bounded-time reachability probing.

use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;

use crate::bare_host;

/// How hard to try before declaring an endpoint dead.
///
/// A probe makes up to `max_attempts` sequential connection attempts,
/// each bounded by `timeout`, so an unreachable endpoint costs at most
/// `max_attempts × timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbePolicy {
    /// Upper bound on a single connection attempt.
    pub timeout: Duration,
    /// Number of attempts. 0 means "never reachable".
    pub max_attempts: u32,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(1000),
            max_attempts: 3,
        }
    }
}

impl ProbePolicy {
    /// The longest a probe under this policy can take.
    pub fn worst_case(&self) -> Duration {
        self.timeout.saturating_mul(self.max_attempts)
    }
}

/// Answers "is anything accepting connections at `address:port`?".
pub trait Prober: Send + Sync + 'static {
    /// Returns `true` on the first successful attempt, `false` once the
    /// policy's attempts are exhausted.
    ///
    /// Probing connections are discarded immediately; they never carry
    /// traffic.
    async fn is_reachable(&self, address: &str, port: u16, policy: &ProbePolicy) -> bool;
}

/// [`Prober`] that opens (and immediately drops) a TCP connection.
///
/// The address is handed to the socket layer as-is, so hostnames are
/// resolved by the connect call itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

impl Prober for TcpProber {
    async fn is_reachable(&self, address: &str, port: u16, policy: &ProbePolicy) -> bool {
        let host = bare_host(address);
        attempt_connects(address, port, policy, || TcpStream::connect((host, port))).await
    }
}

/// Runs up to `policy.max_attempts` sequential attempts of `connect`, each
/// bounded by `policy.timeout`, and reports whether any succeeded.
async fn attempt_connects<F, Fut, S>(
    address: &str,
    port: u16,
    policy: &ProbePolicy,
    mut connect: F,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<S>>,
{
    for attempt in 1..=policy.max_attempts {
        match tokio::time::timeout(policy.timeout, connect()).await {
            Ok(Ok(stream)) => {
                drop(stream);
                tracing::debug!(address, port, attempt, "probe succeeded");
                return true;
            }
            Ok(Err(error)) => {
                tracing::debug!(address, port, attempt, %error, "probe attempt failed");
            }
            Err(_) => {
                tracing::debug!(
                    address,
                    port,
                    attempt,
                    timeout = ?policy.timeout,
                    "probe attempt timed out"
                );
            }
        }
    }

    false
}
