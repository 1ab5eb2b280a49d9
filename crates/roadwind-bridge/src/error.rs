//! Error types for the host bridge.

use thiserror::Error;

/// Errors that can occur while talking to the host shell.
///
/// A missing host channel is not an error: the bridge simply stays idle.
/// Malformed host replies are not errors either; they are recorded as
/// [`Diagnostic`](crate::bridge::Diagnostic)s and dropped.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host channel has been closed by the shell.
    #[error("host channel closed")]
    ChannelClosed,

    /// The host refused an outbound message.
    #[error("failed to post message to host: {0}")]
    SendFailed(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
