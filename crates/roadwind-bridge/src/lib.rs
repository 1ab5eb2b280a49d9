//! # Roadwind Bridge
//!
//! Host shell bridge for the Roadwind mobile-web front-end.
//!
//! The front-end runs inside a native mobile shell that injects a message
//! channel into the webview. This crate wraps that channel behind a typed
//! API and implements the one exchange the front-end needs: asking the shell
//! who the current user is.
//!
//! ## Features
//!
//! - **Host Channel**: [`HostChannel`] capability with RAII [`Subscription`]s
//! - **Identity Bridge**: request the user identity and observe the reply
//! - **Typed Replies**: inbound payloads are classified, never trusted blindly
//! - **Memory Host**: in-process channel for tests and tooling
//!
//! ## Example
//!
//! ```rust
//! use roadwind_bridge::{HostChannel, IdentityBridge, MemoryHostChannel};
//! use std::sync::Arc;
//!
//! let host = MemoryHostChannel::new();
//! let channel: Arc<dyn HostChannel> = Arc::new(host.clone());
//! let bridge = IdentityBridge::new(Some(channel));
//!
//! bridge.initialize().unwrap();
//!
//! // The shell answers at some later point.
//! host.deliver(r#"{"name":"userinfo","data":{"id":"abc123","nickname":"Tom"}}"#);
//!
//! assert_eq!(bridge.user_id(), "abc123");
//! ```
//!
//! ## Wire Protocol
//!
//! ### Web -> Host
//!
//! ```json
//! {"name": "userinfo", "data": null}
//! ```
//!
//! ### Host -> Web
//!
//! ```json
//! {"name": "userinfo", "data": {"id": "abc123", "nickname": "Tom"}}
//! ```
//!
//! Messages with another `name` are ignored. Replies that are not JSON or
//! lack `data.id` are dropped and kept as [`Diagnostic`]s.

pub mod bridge;
pub mod channel;
pub mod error;
pub mod memory;
pub mod message;

// Re-export main types
pub use bridge::{BridgeConfig, BridgeStats, Diagnostic, IdentityBridge, UserState, MAX_DIAGNOSTICS};
pub use channel::{HostChannel, ListenerId, MessageListener, Subscription};
pub use error::BridgeError;
pub use memory::{ChannelStats, MemoryHostChannel};
pub use message::{HostReply, IdentityRequestMessage, MalformedReason, UserIdentity, USERINFO_MESSAGE};
