//! Error types for name resolution.

/// Errors that can occur while resolving a hostname.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The system resolver failed (unknown name, no DNS, ...).
    #[error("failed to resolve {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// The lookup succeeded but returned no addresses.
    #[error("{host} resolved to no addresses")]
    NoAddresses { host: String },
}
