//! The identity bridge.
//!
//! Asks the host shell for the current user's identity and keeps the latest
//! reply as observable [`UserState`]. The bridge never blocks: until the host
//! answers, the state simply stays at its defaults.

use crate::channel::{HostChannel, MessageListener, Subscription};
use crate::error::BridgeError;
use crate::message::{HostReply, IdentityRequestMessage, MalformedReason, UserIdentity, USERINFO_MESSAGE};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

/// Default number of diagnostics kept per bridge.
pub const MAX_DIAGNOSTICS: usize = 32;

/// Identity state exposed to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    /// Empty until the host has replied.
    pub user_id: String,
    /// The host's full identity payload.
    pub user_info: Option<UserIdentity>,
}

impl UserState {
    /// Whether an identity reply has been applied.
    pub fn has_identity(&self) -> bool {
        !self.user_id.is_empty()
    }
}

/// Bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Message name used for the request and expected on replies.
    pub request_name: String,
    /// How many diagnostics to retain.
    pub max_diagnostics: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_name: USERINFO_MESSAGE.to_string(),
            max_diagnostics: MAX_DIAGNOSTICS,
        }
    }
}

/// A host message that was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Why the message was dropped.
    pub reason: MalformedReason,
    /// The raw payload as received.
    pub raw: String,
}

/// Bridge statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStats {
    /// Identity requests posted to the host.
    pub requests_sent: u64,
    /// Identity replies applied to the state.
    pub replies_applied: u64,
    /// Messages ignored because of their name.
    pub replies_ignored: u64,
    /// Messages dropped as malformed.
    pub replies_malformed: u64,
}

/// State shared between the bridge and its host listener.
#[derive(Debug)]
struct BridgeInner {
    request_name: String,
    max_diagnostics: usize,
    state: watch::Sender<UserState>,
    stats: RwLock<BridgeStats>,
    diagnostics: RwLock<VecDeque<Diagnostic>>,
}

impl BridgeInner {
    fn handle_message(&self, raw: &str) {
        match HostReply::parse_for(raw, &self.request_name) {
            HostReply::Recognized(identity) => {
                debug!(user_id = %identity.id, "Identity reply applied");
                self.state.send_replace(UserState {
                    user_id: identity.id.clone(),
                    user_info: Some(identity),
                });
                self.stats.write().replies_applied += 1;
            }
            HostReply::Unrecognized(name) => {
                trace!(name = %name, "Ignoring host message");
                self.stats.write().replies_ignored += 1;
            }
            HostReply::Malformed(reason) => {
                warn!(reason = %reason, "Dropping malformed host message");
                let mut diagnostics = self.diagnostics.write();
                if self.max_diagnostics > 0 {
                    while diagnostics.len() >= self.max_diagnostics {
                        diagnostics.pop_front();
                    }
                    diagnostics.push_back(Diagnostic {
                        reason,
                        raw: raw.to_string(),
                    });
                }
                drop(diagnostics);
                self.stats.write().replies_malformed += 1;
            }
        }
    }
}

/// Retrieves the current user's identity from the host shell.
///
/// Construct it with the host channel if the shell provides one, or `None`
/// when running without a shell; then call [`initialize`](Self::initialize).
/// The listener registered by `initialize` is released by
/// [`deactivate`](Self::deactivate) or when the bridge is dropped, after
/// which host replies are no longer observed.
///
/// # Example
///
/// ```rust
/// use roadwind_bridge::{HostChannel, IdentityBridge, MemoryHostChannel};
/// use std::sync::Arc;
///
/// let host = MemoryHostChannel::new();
/// let bridge = IdentityBridge::new(Some(Arc::new(host.clone()) as Arc<dyn HostChannel>));
///
/// bridge.initialize().unwrap();
/// assert_eq!(host.sent(), vec![r#"{"name":"userinfo","data":null}"#.to_string()]);
///
/// host.deliver(r#"{"name":"userinfo","data":{"id":"abc123"}}"#);
/// assert_eq!(bridge.user_id(), "abc123");
/// ```
pub struct IdentityBridge {
    channel: Option<Arc<dyn HostChannel>>,
    inner: Arc<BridgeInner>,
    subscription: Mutex<Option<Subscription>>,
}

impl IdentityBridge {
    /// Create a bridge with the default configuration.
    pub fn new(channel: Option<Arc<dyn HostChannel>>) -> Self {
        Self::with_config(channel, BridgeConfig::default())
    }

    /// Create a bridge with a custom configuration.
    pub fn with_config(channel: Option<Arc<dyn HostChannel>>, config: BridgeConfig) -> Self {
        let (state, _) = watch::channel(UserState::default());
        Self {
            channel,
            inner: Arc::new(BridgeInner {
                request_name: config.request_name,
                max_diagnostics: config.max_diagnostics,
                state,
                stats: RwLock::new(BridgeStats::default()),
                diagnostics: RwLock::new(VecDeque::new()),
            }),
            subscription: Mutex::new(None),
        }
    }

    /// Request the identity from the host and start listening for replies.
    ///
    /// Without a host channel this does nothing. Each call posts one request;
    /// a repeated call replaces the previous listener rather than adding a
    /// second one.
    pub fn initialize(&self) -> Result<(), BridgeError> {
        let Some(channel) = &self.channel else {
            debug!("No host channel, identity bridge stays idle");
            return Ok(());
        };

        let request = IdentityRequestMessage::new(self.inner.request_name.as_str()).to_json()?;

        // Release the previous listener so an inline reply is applied once.
        let previous = self.subscription.lock().take();
        drop(previous);

        // Listen before posting: a host may answer from inside post_message.
        let weak: Weak<BridgeInner> = Arc::downgrade(&self.inner);
        let listener: MessageListener = Arc::new(move |raw: &str| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_message(raw);
            }
        });
        let subscription = channel.subscribe(listener)?;

        // On failure the new subscription is dropped, releasing the listener.
        channel.post_message(request)?;
        self.inner.stats.write().requests_sent += 1;

        info!(
            listener_id = %subscription.id(),
            request = %self.inner.request_name,
            "Identity requested from host"
        );

        let replaced = self.subscription.lock().replace(subscription);
        drop(replaced);

        Ok(())
    }

    /// Apply one inbound host message.
    pub fn handle_message(&self, raw: &str) {
        self.inner.handle_message(raw);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UserState {
        self.inner.state.borrow().clone()
    }

    /// Current user id, empty until the host replies.
    pub fn user_id(&self) -> String {
        self.inner.state.borrow().user_id.clone()
    }

    /// Current identity payload.
    pub fn user_info(&self) -> Option<UserIdentity> {
        self.inner.state.borrow().user_info.clone()
    }

    /// Observe state changes as they happen.
    pub fn watch(&self) -> watch::Receiver<UserState> {
        self.inner.state.subscribe()
    }

    /// Whether a host listener is registered.
    pub fn is_active(&self) -> bool {
        self.subscription
            .lock()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Whether the bridge was given a host channel.
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    /// Release the host listener. The current state is kept.
    pub fn deactivate(&self) {
        let taken = self.subscription.lock().take();
        if let Some(mut subscription) = taken {
            subscription.cancel();
            info!(listener_id = %subscription.id(), "Identity bridge deactivated");
        }
    }

    /// Bridge statistics.
    pub fn stats(&self) -> BridgeStats {
        self.inner.stats.read().clone()
    }

    /// Recently dropped host messages, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.diagnostics.read().iter().cloned().collect()
    }
}

impl std::fmt::Debug for IdentityBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityBridge")
            .field("has_channel", &self.has_channel())
            .field("active", &self.is_active())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHostChannel;

    fn bridge_with_host() -> (IdentityBridge, MemoryHostChannel) {
        let host = MemoryHostChannel::new();
        let bridge = IdentityBridge::new(Some(Arc::new(host.clone())));
        (bridge, host)
    }

    #[test]
    fn test_default_state() {
        let state = UserState::default();
        assert_eq!(state.user_id, "");
        assert!(state.user_info.is_none());
        assert!(!state.has_identity());
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let json = serde_json::to_value(UserState::default()).unwrap();
        assert_eq!(json, serde_json::json!({"userId": "", "userInfo": null}));
    }

    #[test]
    fn test_no_channel_is_noop() {
        let bridge = IdentityBridge::new(None);
        bridge.initialize().unwrap();

        assert!(!bridge.has_channel());
        assert!(!bridge.is_active());
        assert_eq!(bridge.state(), UserState::default());
        assert_eq!(bridge.stats().requests_sent, 0);
    }

    #[test]
    fn test_initialize_registers_listener() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize().unwrap();

        assert!(bridge.is_active());
        assert_eq!(host.listener_count(), 1);
        assert_eq!(bridge.stats().requests_sent, 1);
    }

    #[test]
    fn test_repeated_initialize_replaces_listener() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize().unwrap();
        bridge.initialize().unwrap();

        assert_eq!(host.sent().len(), 2);
        assert_eq!(host.listener_count(), 1);
        assert_eq!(bridge.stats().requests_sent, 2);
    }

    #[test]
    fn test_handle_message_direct() {
        let bridge = IdentityBridge::new(None);
        bridge.handle_message(r#"{"name":"userinfo","data":{"id":"u-1"}}"#);

        assert_eq!(bridge.user_id(), "u-1");
        assert_eq!(bridge.user_info(), Some(UserIdentity::new("u-1")));
        assert_eq!(bridge.stats().replies_applied, 1);
    }

    #[test]
    fn test_ignored_message_counted() {
        let bridge = IdentityBridge::new(None);
        bridge.handle_message(r#"{"name":"location","data":{"id":"x"}}"#);

        assert_eq!(bridge.state(), UserState::default());
        assert_eq!(bridge.stats().replies_ignored, 1);
        assert!(bridge.diagnostics().is_empty());
    }

    #[test]
    fn test_malformed_message_recorded() {
        let bridge = IdentityBridge::new(None);
        bridge.handle_message("{oops");

        let diagnostics = bridge.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].reason,
            MalformedReason::InvalidJson(_)
        ));
        assert_eq!(diagnostics[0].raw, "{oops");
        assert_eq!(bridge.stats().replies_malformed, 1);
    }

    #[test]
    fn test_empty_id_leaves_state_unchanged() {
        let bridge = IdentityBridge::new(None);
        bridge.handle_message(r#"{"name":"userinfo","data":{"id":"","nickname":"Tom"}}"#);

        assert_eq!(bridge.state(), UserState::default());
        assert!(bridge.user_info().is_none());
        assert_eq!(
            bridge.diagnostics()[0].reason,
            MalformedReason::MissingIdentityId
        );
    }

    #[test]
    fn test_non_object_data_recorded() {
        let bridge = IdentityBridge::new(None);
        bridge.handle_message(r#"{"name":"userinfo","data":"x"}"#);

        assert_eq!(bridge.state(), UserState::default());
        assert_eq!(bridge.diagnostics()[0].reason, MalformedReason::InvalidData);
    }

    #[test]
    fn test_diagnostics_are_bounded() {
        let config = BridgeConfig {
            max_diagnostics: 2,
            ..BridgeConfig::default()
        };
        let bridge = IdentityBridge::with_config(None, config);

        bridge.handle_message("a");
        bridge.handle_message("b");
        bridge.handle_message("c");

        let raws: Vec<String> = bridge.diagnostics().into_iter().map(|d| d.raw).collect();
        assert_eq!(raws, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(bridge.stats().replies_malformed, 3);
    }

    #[test]
    fn test_custom_request_name() {
        let host = MemoryHostChannel::new();
        let config = BridgeConfig {
            request_name: "whoami".to_string(),
            ..BridgeConfig::default()
        };
        let bridge = IdentityBridge::with_config(Some(Arc::new(host.clone())), config);
        bridge.initialize().unwrap();

        assert_eq!(host.sent(), vec![r#"{"name":"whoami","data":null}"#.to_string()]);

        host.deliver(r#"{"name":"userinfo","data":{"id":"nope"}}"#);
        host.deliver(r#"{"name":"whoami","data":{"id":"yes"}}"#);
        assert_eq!(bridge.user_id(), "yes");
    }

    #[test]
    fn test_deactivate_stops_updates() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize().unwrap();
        host.deliver(r#"{"name":"userinfo","data":{"id":"first"}}"#);

        bridge.deactivate();
        assert!(!bridge.is_active());
        assert_eq!(host.listener_count(), 0);

        host.deliver(r#"{"name":"userinfo","data":{"id":"second"}}"#);
        assert_eq!(bridge.user_id(), "first");
    }

    #[test]
    fn test_drop_releases_listener() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize().unwrap();
        assert_eq!(host.listener_count(), 1);

        drop(bridge);
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.deliver(r#"{"name":"userinfo","data":{"id":"late"}}"#), 0);
    }

    #[test]
    fn test_closed_channel_fails_initialize() {
        let (bridge, host) = bridge_with_host();
        host.close();

        assert!(matches!(bridge.initialize(), Err(BridgeError::ChannelClosed)));
        assert!(!bridge.is_active());
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: BridgeConfig = serde_json::from_str(r#"{"max_diagnostics": 4}"#).unwrap();
        assert_eq!(config.request_name, "userinfo");
        assert_eq!(config.max_diagnostics, 4);
    }

    #[tokio::test]
    async fn test_watch_sees_updates() {
        let (bridge, host) = bridge_with_host();
        let mut rx = bridge.watch();
        bridge.initialize().unwrap();

        host.deliver(r#"{"name":"userinfo","data":{"id":"watched"}}"#);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().user_id, "watched");
    }
}
