//! CLI command implementations.

use roadwind_bridge::{
    BridgeConfig, BridgeError, BridgeStats, Diagnostic, HostChannel, IdentityBridge,
    MemoryHostChannel, UserState,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Fixture data sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Fixture {
    /// Home screen overview
    Home,
    /// Wind readings
    Wind,
    /// Weather headlines
    WindNews,
    /// Traffic screen tabs
    TrafficTabs,
    /// Traffic layer presets keyed by tab
    TrafficPresets,
    /// Traffic map embed URL
    TrafficMap,
}

/// Render a fixture as pretty JSON.
pub fn fixture(kind: Fixture) -> Result<String> {
    tracing::info!(fixture = ?kind, "Rendering fixture");

    let json = match kind {
        Fixture::Home => serde_json::to_string_pretty(&roadwind_types::home_overview())?,
        Fixture::Wind => serde_json::to_string_pretty(&roadwind_types::wind_metrics())?,
        Fixture::WindNews => serde_json::to_string_pretty(&roadwind_types::wind_news())?,
        Fixture::TrafficTabs => serde_json::to_string_pretty(&roadwind_types::traffic_tabs())?,
        Fixture::TrafficPresets => {
            serde_json::to_string_pretty(&roadwind_types::traffic_layer_presets())?
        }
        Fixture::TrafficMap => serde_json::to_string_pretty(&roadwind_types::traffic_map_embed_url())?,
    };

    Ok(json)
}

/// Outcome of an identity bridge session.
#[derive(Debug, Serialize)]
pub struct IdentityReport {
    /// Messages the bridge posted to the host.
    pub sent: Vec<String>,
    /// Final identity state.
    pub state: UserState,
    /// Bridge statistics.
    pub stats: BridgeStats,
    /// Dropped host messages.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the identity bridge against an in-memory host and replay `replies`.
///
/// With `no_host` the bridge is built without a channel and replies are
/// never delivered.
pub fn identity(replies: &[String], no_host: bool, config: BridgeConfig) -> Result<IdentityReport> {
    let host = (!no_host).then(MemoryHostChannel::new);
    let channel = host
        .clone()
        .map(|host| Arc::new(host) as Arc<dyn HostChannel>);

    let bridge = IdentityBridge::with_config(channel, config);
    bridge.initialize()?;

    if let Some(host) = &host {
        for reply in replies {
            let recipients = host.deliver(reply);
            tracing::debug!(recipients, "Replayed host reply");
        }
    } else if !replies.is_empty() {
        tracing::warn!(count = replies.len(), "No host channel, replies not delivered");
    }

    let report = IdentityReport {
        sent: host.as_ref().map(MemoryHostChannel::sent).unwrap_or_default(),
        state: bridge.state(),
        stats: bridge.stats(),
        diagnostics: bridge.diagnostics(),
    };

    bridge.deactivate();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_outputs_json() {
        for kind in [
            Fixture::Home,
            Fixture::Wind,
            Fixture::WindNews,
            Fixture::TrafficTabs,
            Fixture::TrafficPresets,
            Fixture::TrafficMap,
        ] {
            let json = fixture(kind).unwrap();
            assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
        }
    }

    #[test]
    fn test_fixture_presets_keyed_by_tab() {
        let json: serde_json::Value =
            serde_json::from_str(&fixture(Fixture::TrafficPresets).unwrap()).unwrap();
        assert!(json.get("avoid").is_some());
        assert!(json.get("danger").is_some());
        assert!(json.get("safe").is_some());
    }

    #[test]
    fn test_identity_replays_replies() {
        let replies = vec![
            r#"{"name":"userinfo","data":{"id":"first"}}"#.to_string(),
            "garbage".to_string(),
            r#"{"name":"userinfo","data":{"id":"second"}}"#.to_string(),
        ];

        let report = identity(&replies, false, BridgeConfig::default()).unwrap();
        assert_eq!(report.sent, vec![r#"{"name":"userinfo","data":null}"#.to_string()]);
        assert_eq!(report.state.user_id, "second");
        assert_eq!(report.stats.replies_applied, 2);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_identity_without_host() {
        let replies = vec![r#"{"name":"userinfo","data":{"id":"x"}}"#.to_string()];

        let report = identity(&replies, true, BridgeConfig::default()).unwrap();
        assert!(report.sent.is_empty());
        assert_eq!(report.state, UserState::default());
        assert_eq!(report.stats.requests_sent, 0);
    }
}
