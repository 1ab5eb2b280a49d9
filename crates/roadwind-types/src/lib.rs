//! Screen data types used throughout `roadwind`.
//!
//! This crate provides the typed data the Roadwind front-end renders on its
//! home, wind and traffic screens, together with fixture factories that
//! return the current hard-coded Taipei data set. Field names serialize in
//! camelCase to match the front-end's JSON.

mod home;
mod map;
mod traffic;
mod wind;

pub use home::{home_overview, HomeOverview, MapPreview, ServiceItem, StreetInfo};
pub use map::{LatLng, MapMarkerDescriptor};
pub use traffic::{
    traffic_layer_presets, traffic_map_embed_url, traffic_tabs, TrafficLayerPreset, TrafficTab,
    TrafficTabId,
};
pub use wind::{wind_metrics, wind_news, NewsItem, WindInfo};
