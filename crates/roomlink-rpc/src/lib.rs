//! Request/response layer for Roomlink.
//!
//! [`RpcChannel`] owns the control connection to the backend. It turns a
//! typed request into a [`RequestEnvelope`](roomlink_protocol::RequestEnvelope),
//! writes it, waits for the matching reply, and hands back either the
//! typed result or an [`RpcError`].
//!
//! The channel knows nothing about rooms or endpoints.

mod channel;
mod config;
mod error;

pub use channel::RpcChannel;
pub use config::RpcConfig;
pub use error::RpcError;
