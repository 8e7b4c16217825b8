//! Client configuration.

use std::time::Duration;

use roomlink_net::ProbePolicy;
use roomlink_protocol::Endpoint;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DevServer
// ---------------------------------------------------------------------------

/// A local room server that replaces the backend's endpoint list.
///
/// When set, join-type operations connect straight to it without
/// probing, and every request is flagged `is_dev_room`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServer {
    /// Hostname or IP literal.
    pub address: String,
    pub port: u16,
}

impl DevServer {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// The override as a plain endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.address.clone(), self.port)
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Settings attached to a [`RoomNegotiator`](crate::RoomNegotiator).
///
/// Immutable once the negotiator is built; there is no global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Development server override.
    pub dev_server: Option<DevServer>,

    /// Open room connections with `wss://` instead of `ws://`.
    /// Has no effect on endpoint selection.
    pub use_secure_connections: bool,

    /// Policy for reachability probes during endpoint selection.
    pub probe_policy: ProbePolicy,

    /// Upper bound on opening the room connection itself.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dev_server: None,
            use_secure_connections: false,
            probe_policy: ProbePolicy::default(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn with_dev_server(mut self, dev_server: DevServer) -> Self {
        self.dev_server = Some(dev_server);
        self
    }

    pub fn with_secure_connections(mut self, secure: bool) -> Self {
        self.use_secure_connections = secure;
        self
    }

    pub fn with_probe_policy(mut self, policy: ProbePolicy) -> Self {
        self.probe_policy = policy;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Whether requests should be flagged as dev-room requests.
    pub fn is_dev(&self) -> bool {
        self.dev_server.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert!(config.dev_server.is_none());
        assert!(!config.use_secure_connections);
        assert!(!config.is_dev());
        assert_eq!(config.probe_policy, ProbePolicy::default());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_with_dev_server_sets_dev_flag() {
        let config = ClientConfig::default().with_dev_server(DevServer::new("127.0.0.1", 7350));
        assert!(config.is_dev());
        assert_eq!(
            config.dev_server.as_ref().map(DevServer::endpoint),
            Some(Endpoint::new("127.0.0.1", 7350))
        );
    }

    #[test]
    fn test_client_config_partial_json_uses_defaults() {
        let json = r#"{"use_secure_connections": true, "dev_server": {"address": "localhost", "port": 9000}}"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();

        assert!(config.use_secure_connections);
        assert_eq!(config.dev_server, Some(DevServer::new("localhost", 9000)));
        assert_eq!(config.probe_policy.max_attempts, 3);
    }
}
