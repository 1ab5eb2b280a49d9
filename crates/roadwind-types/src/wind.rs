//! Wind conditions and weather news.

use serde::{Deserialize, Serialize};

/// Current wind and weather readings.
///
/// Readings are kept as display strings; `intensity` is a 0-100 gauge value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindInfo {
    pub speed: String,
    pub unit: String,
    pub direction: String,
    pub intensity: u8,
    pub temperature: String,
    pub humidity: String,
    pub pressure: String,
}

/// A news headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl NewsItem {
    /// Creates a headline without time, source or thumbnail.
    pub fn new(id: u32, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            summary: summary.into(),
            time: None,
            source: None,
            thumbnail: None,
        }
    }

    /// Sets the relative publication time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Sets the publisher.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Wind readings for the wind detail screen.
pub fn wind_metrics() -> WindInfo {
    WindInfo {
        speed: "15".to_string(),
        unit: "m/s".to_string(),
        direction: "東北風".to_string(),
        intensity: 65,
        temperature: "25".to_string(),
        humidity: "65".to_string(),
        pressure: "1013".to_string(),
    }
}

/// Weather headlines for the wind detail screen.
pub fn wind_news() -> Vec<NewsItem> {
    vec![
        NewsItem::new(
            1,
            "東北季風增強 北部轉涼有雨",
            "受東北季風影響，北部地區氣溫下降3-5度，並有局部陣雨...",
        )
        .with_time("2小時前")
        .with_source("中央氣象署"),
        NewsItem::new(
            2,
            "強風特報 沿海地區需注意",
            "今日午後東北風持續增強，沿海空曠地區陣風可達8-9級...",
        )
        .with_time("5小時前")
        .with_source("氣象局"),
        NewsItem::new(
            3,
            "週末天氣轉好 適合戶外活動",
            "預計週末東北季風減弱，各地多雲到晴，溫度回升...",
        )
        .with_time("1天前")
        .with_source("天氣風險公司"),
        NewsItem::new(
            4,
            "空氣品質預報 中南部需注意",
            "受風向影響，中南部地區空氣品質可能達到橘色提醒等級...",
        )
        .with_time("1天前")
        .with_source("環保署"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_metrics() {
        let wind = wind_metrics();
        assert_eq!(wind.speed, "15");
        assert_eq!(wind.direction, "東北風");
        assert_eq!(wind.intensity, 65);
    }

    #[test]
    fn test_wind_news() {
        let news = wind_news();
        let ids: Vec<u32> = news.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(news.iter().all(|n| n.time.is_some() && n.source.is_some()));
        assert_eq!(news[0].source.as_deref(), Some("中央氣象署"));
    }

    #[test]
    fn test_news_item_skips_absent_fields() {
        let item = NewsItem::new(7, "t", "s");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "title": "t", "summary": "s"}));
    }
}
