use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for an [`RpcChannel`](crate::RpcChannel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// How long to wait for the reply to one request.
    pub request_timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}
