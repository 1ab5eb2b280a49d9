//! The host channel capability and listener registrations.

use crate::error::BridgeError;
use std::fmt;
use std::sync::Arc;

/// Callback invoked by the host's dispatch loop for every inbound message.
pub type MessageListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Unique identifier for a listener registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(String);

impl ListenerId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Messaging capability injected by the hosting shell.
///
/// The shell owns the channel. Bridges only hold a reference to it and never
/// create or destroy it.
pub trait HostChannel: Send + Sync {
    /// Send one serialized message to the host.
    fn post_message(&self, message: String) -> Result<(), BridgeError>;

    /// Register a listener for inbound serialized messages.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// cancelled or dropped.
    fn subscribe(&self, listener: MessageListener) -> Result<Subscription, BridgeError>;
}

type CancelHook = Box<dyn FnOnce(&ListenerId) + Send + Sync>;

/// A live listener registration. Dropping it releases the listener.
pub struct Subscription {
    id: ListenerId,
    on_cancel: Option<CancelHook>,
}

impl Subscription {
    /// Create a subscription that runs `on_cancel` exactly once on release.
    pub fn new<F>(id: ListenerId, on_cancel: F) -> Self
    where
        F: FnOnce(&ListenerId) + Send + Sync + 'static,
    {
        Self {
            id,
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    /// The registration identifier.
    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.on_cancel.is_some()
    }

    /// Release the listener. Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        if let Some(hook) = self.on_cancel.take() {
            hook(&self.id);
            tracing::debug!(listener_id = %self.id, "Host listener released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
