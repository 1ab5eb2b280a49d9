//! Home screen overview.

use crate::wind::{NewsItem, WindInfo};
use serde::{Deserialize, Serialize};

/// Entry in the home screen service grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Front-end route the tile opens.
    pub route: String,
}

impl ServiceItem {
    fn new(id: &str, name: &str, icon: &str, route: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            route: route.to_string(),
        }
    }
}

/// Map preview card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPreview {
    pub title: String,
    pub address_hint: String,
    pub road: String,
    pub landmark: String,
    pub updated_at: String,
}

/// Street-level status for the nearest intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetInfo {
    pub intersection: String,
    pub status: String,
    pub source: String,
}

/// Everything the home screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeOverview {
    pub location: String,
    pub advisory: String,
    pub wind_info: WindInfo,
    pub driving_advice: String,
    pub services: Vec<ServiceItem>,
    pub map_preview: MapPreview,
    pub google_map_embed: String,
    pub street_info: StreetInfo,
    pub news_list: Vec<NewsItem>,
}

const HOME_MAP_EMBED: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3615.022253974696!2d121.56235021214552!3d25.03396498397207!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3442abbf0c93418d%3A0x64db763b69ad2b6!2z5Y-w5YyXIDEwMQ!5e0!3m2!1szh-TW!2stw!4v1717132800000!5m2!1szh-TW!2stw";

/// Home screen data for the Xinyi district.
pub fn home_overview() -> HomeOverview {
    HomeOverview {
        location: "臺北市信義區莊敬路391巷22號".to_string(),
        advisory: "行車建議：盡可能減少外出".to_string(),
        wind_info: WindInfo {
            speed: "10.5".to_string(),
            unit: "m/s".to_string(),
            direction: "東北風".to_string(),
            intensity: 70,
            temperature: "25".to_string(),
            humidity: "65".to_string(),
            pressure: "1013".to_string(),
        },
        driving_advice: "持續有強陣風與短暫大雨，建議非必要不要駕車上路。".to_string(),
        services: vec![
            ServiceItem::new("traffic", "路況檢視", "🚗", "traffic"),
            ServiceItem::new("safe-nav", "安全導航", "🧭", "traffic"),
            ServiceItem::new("report", "障礙回報", "⚠️", "traffic"),
            ServiceItem::new("wind", "風況詳情", "🌪️", "wind"),
            ServiceItem::new("settings", "個人設定", "⚙️", "settings"),
        ],
        map_preview: MapPreview {
            title: "路況查看".to_string(),
            address_hint: "顯示詳細地址 >".to_string(),
            road: "信義路五段".to_string(),
            landmark: "台北101".to_string(),
            updated_at: "更新於 2 分鐘前".to_string(),
        },
        google_map_embed: HOME_MAP_EMBED.to_string(),
        street_info: StreetInfo {
            intersection: "莊敬路391巷 x 信義路五段".to_string(),
            status: "街口資料讀取中，等待 API 注入".to_string(),
            source: "資料來源：智慧交通 API（預留）".to_string(),
        },
        news_list: vec![
            NewsItem::new(
                1,
                "北部持續豪大雨 勿強行涉水",
                "台北一名大學生於返家路上遭遇颱風外圍環流，雨勢造成能見度低，駕駛須減速慢行。",
            ),
            NewsItem::new(
                2,
                "東部山區出現落石 須注意",
                "花蓮天祥路段傳出落石，公路總局籲民眾暫勿前往並密切關注最新路況資訊。",
            ),
        ],
    }
}
