//! Traffic screen tabs and map layer presets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Traffic tab identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficTabId {
    /// Road sections to avoid.
    Avoid,
    /// Dangerous road sections.
    Danger,
    /// Recommended road sections.
    Safe,
}

impl TrafficTabId {
    /// All tabs in display order.
    pub fn all() -> [TrafficTabId; 3] {
        [TrafficTabId::Avoid, TrafficTabId::Danger, TrafficTabId::Safe]
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficTabId::Avoid => "avoid",
            TrafficTabId::Danger => "danger",
            TrafficTabId::Safe => "safe",
        }
    }
}

impl std::fmt::Display for TrafficTabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tab on the traffic screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTab {
    pub id: TrafficTabId,
    pub label: String,
}

/// Map layer content shown for a traffic tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficLayerPreset {
    pub title: String,
    pub description: String,
    pub highlight: String,
    /// Hex color of the highlighted road segments.
    pub color: String,
}

const TRAFFIC_MAP_EMBED: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3614.568581001418!2d121.54126917607693!3d25.045193677804056!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3442a97a5ddeea4f%3A0x1dea53c58d32e848!2z5paw5YyX6Y6u5Lit5b-DIOWPsOmdmOaWsOWMl-W6lw!5e0!3m2!1szh-TW!2stw!4v1717136400000!5m2!1szh-TW!2stw";

/// Traffic screen tabs in display order.
pub fn traffic_tabs() -> Vec<TrafficTab> {
    TrafficTabId::all()
        .into_iter()
        .map(|id| TrafficTab {
            id,
            label: match id {
                TrafficTabId::Avoid => "迴避路段",
                TrafficTabId::Danger => "危險路段",
                TrafficTabId::Safe => "安全路段",
            }
            .to_string(),
        })
        .collect()
}

/// One layer preset per traffic tab.
pub fn traffic_layer_presets() -> BTreeMap<TrafficTabId, TrafficLayerPreset> {
    let preset = |title: &str, description: &str, highlight: &str, color: &str| TrafficLayerPreset {
        title: title.to_string(),
        description: description.to_string(),
        highlight: highlight.to_string(),
        color: color.to_string(),
    };

    BTreeMap::from([
        (
            TrafficTabId::Avoid,
            preset(
                "請迴避：忠孝復興圓環",
                "目前車流壅塞，陣風達 10 m/s，建議改道至敦化南路。",
                "灰色虛線顯示可能封閉路段",
                "#6B7280",
            ),
        ),
        (
            TrafficTabId::Danger,
            preset(
                "危險路段：仁愛路三段",
                "路樹傾倒仍在處理，局部區域有積水，進入前請放慢速度。",
                "紅色警示標記顯示事故熱點",
                "#D45251",
            ),
        ),
        (
            TrafficTabId::Safe,
            preset(
                "安全路段：市民大道高架",
                "路況順暢且視線良好，系統建議優先通過該路段。",
                "綠色線段顯示建議路徑",
                "#62A3A6",
            ),
        ),
    ])
}

/// Embedded map URL for the traffic screen.
pub fn traffic_map_embed_url() -> String {
    TRAFFIC_MAP_EMBED.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_tabs_order() {
        let ids: Vec<TrafficTabId> = traffic_tabs().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, TrafficTabId::all().to_vec());
        assert_eq!(traffic_tabs()[1].label, "危險路段");
    }

    #[test]
    fn test_every_tab_has_preset() {
        let presets = traffic_layer_presets();
        assert_eq!(presets.len(), 3);
        for tab in traffic_tabs() {
            assert!(presets.contains_key(&tab.id), "missing preset for {}", tab.id);
        }
        assert_eq!(presets[&TrafficTabId::Danger].color, "#D45251");
    }

    #[test]
    fn test_tab_id_serialization() {
        assert_eq!(
            serde_json::to_string(&TrafficTabId::Avoid).unwrap(),
            "\"avoid\""
        );
        let json = serde_json::to_value(traffic_layer_presets()).unwrap();
        assert_eq!(json["safe"]["color"], "#62A3A6");
    }

    #[test]
    fn test_traffic_map_embed_url() {
        assert!(traffic_map_embed_url().contains("zh-TW"));
    }
}
