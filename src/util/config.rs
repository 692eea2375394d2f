use serde::Deserialize;
use tracing::info;

use super::misc::{read_file, Res};
use crate::model::*;

// 起動時に一度だけ読み込む設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub groups: Vec<TileGroup>,   // カタログに含める牌の種別
    pub request: RequestSettings, // 申告内容の初期値
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            groups: TileGroup::ALL.to_vec(),
            request: RequestSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_json_str(data: &str) -> Res<Self> {
        let settings: Self = serde_json::from_str(data)?;
        if settings.groups.is_empty() {
            return Err("settings: groups must not be empty".into());
        }
        Ok(settings)
    }
}

pub fn load_settings(file_path: &str) -> Res<Settings> {
    let settings = Settings::from_json_str(&read_file(file_path)?)?;
    info!("settings loaded from {}: {:?}", file_path, settings.groups);
    Ok(settings)
}

#[test]
fn test_settings_default() {
    let s = Settings::from_json_str("{}").unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.groups.len(), 5);
}

#[test]
fn test_settings_json() {
    let data = r#"{
        "groups": ["suit", "wind", "dragon"],
        "request": {"prevalent_wind": "SOUTH", "last_tile_situation": "Last Tile Situation"}
    }"#;
    let s = Settings::from_json_str(data).unwrap();
    assert_eq!(s.groups, vec![TileGroup::Suit, TileGroup::Wind, TileGroup::Dragon]);
    assert_eq!(s.request.prevalent_wind, Wind::South);
    assert_eq!(s.request.player_wind, Wind::East);
    assert_eq!(s.request.last_tile_situation, LastTileSituation::LastTile);
}

#[test]
fn test_settings_invalid() {
    assert!(Settings::from_json_str(r#"{"groups": ["joker"]}"#).is_err());
    assert!(Settings::from_json_str(r#"{"groups": []}"#).is_err());
    assert!(load_settings("/nonexistent/settings.json").is_err());
}

// 手牌の上限はカタログから決まるので設定できない
#[test]
fn test_settings_unknown_key() {
    assert!(Settings::from_json_str(r#"{"hand_max_len": 14}"#).is_err());
    assert!(Settings::from_json_str(r#"{"group": ["suit"]}"#).is_err());
}
