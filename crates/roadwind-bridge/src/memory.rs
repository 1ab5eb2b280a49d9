//! In-process host channel.
//!
//! Stands in for the native shell in tests and tooling: outbound messages
//! are collected in an outbox and inbound messages are pushed with
//! [`MemoryHostChannel::deliver`].

use crate::channel::{HostChannel, ListenerId, MessageListener, Subscription};
use crate::error::BridgeError;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Default)]
struct Registry {
    /// Registered listeners in registration order.
    listeners: Vec<(ListenerId, MessageListener)>,
    stats: ChannelStats,
}

/// In-memory [`HostChannel`] implementation.
#[derive(Clone, Default)]
pub struct MemoryHostChannel {
    registry: Arc<RwLock<Registry>>,
    outbox: Arc<RwLock<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryHostChannel {
    /// Create a new, open channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one inbound message to every registered listener.
    ///
    /// Listeners run one at a time in registration order. Returns the number
    /// of listeners invoked.
    pub fn deliver(&self, raw: &str) -> usize {
        // Snapshot so listeners may re-enter the channel.
        let listeners: Vec<MessageListener> = self
            .registry
            .read()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in &listeners {
            listener(raw);
        }

        self.registry.write().stats.messages_delivered += 1;
        trace!(recipients = listeners.len(), "Host message delivered");

        listeners.len()
    }

    /// Every outbound message posted so far, oldest first.
    pub fn sent(&self) -> Vec<String> {
        self.outbox.read().clone()
    }

    /// Drain the outbox.
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut *self.outbox.write())
    }

    /// Close the channel. Later posts and subscriptions fail.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        debug!("Memory host channel closed");
    }

    /// Whether the channel has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.read().listeners.len()
    }

    /// Channel statistics.
    pub fn stats(&self) -> ChannelStats {
        let registry = self.registry.read();
        let mut stats = registry.stats.clone();
        stats.current_listeners = registry.listeners.len();
        stats
    }
}

impl HostChannel for MemoryHostChannel {
    fn post_message(&self, message: String) -> Result<(), BridgeError> {
        if self.is_closed() {
            return Err(BridgeError::ChannelClosed);
        }

        trace!(message = %message, "Message posted to host");
        self.outbox.write().push(message);
        self.registry.write().stats.messages_posted += 1;
        Ok(())
    }

    fn subscribe(&self, listener: MessageListener) -> Result<Subscription, BridgeError> {
        if self.is_closed() {
            return Err(BridgeError::ChannelClosed);
        }

        let id = ListenerId::new();
        {
            let mut registry = self.registry.write();
            registry.listeners.push((id.clone(), listener));
            registry.stats.total_subscriptions += 1;
        }
        debug!(listener_id = %id, "Host listener registered");

        let registry = Arc::downgrade(&self.registry);
        Ok(Subscription::new(id, move |id| {
            if let Some(registry) = registry.upgrade() {
                registry.write().listeners.retain(|(other, _)| other != id);
            }
        }))
    }
}

impl std::fmt::Debug for MemoryHostChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHostChannel")
            .field("listeners", &self.listener_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Channel statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Messages posted to the host.
    pub messages_posted: u64,
    /// Inbound messages dispatched.
    pub messages_delivered: u64,
    /// Total subscriptions since creation.
    pub total_subscriptions: u64,
    /// Listeners currently registered.
    pub current_listeners: usize,
}
