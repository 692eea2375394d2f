use super::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Wind {
    #[default]
    East,
    South,
    West,
    North,
}

impl Wind {
    pub fn tile(self) -> Tile {
        let ni = match self {
            Self::East => WE,
            Self::South => WS,
            Self::West => WW,
            Self::North => WN,
        };
        Tile(TW, ni)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinningTileOrigin {
    #[default]
    #[serde(rename = "Self Drawn")]
    SelfDrawn,
    #[serde(rename = "Discard")]
    Discard,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastTileSituation {
    #[default]
    #[serde(rename = "Not Last Tile Situation")]
    NotLastTile,
    #[serde(rename = "Last Tile Situation")]
    LastTile,
}

// 手牌以外の申告内容
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub prevalent_wind: Wind,
    pub player_wind: Wind,
    pub winning_tile_origin: WinningTileOrigin,
    pub last_tile_situation: LastTileSituation,
}

/// 組み立て中の手牌と申告内容をまとめたもの.
/// 和了判定や点数計算は行わず, 外部の計算機に渡すための形式のみを扱う.
///
/// 鳴き (`melded`), 暗槓 (`concealed_kong`), 和了牌 (`winning_tile`) は組み立ての対象外で,
/// 計算機の入力形式に合わせて空の値のみを出力する.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub concealed: Vec<Tile>,
    #[serde(default)]
    pub concealed_kong: Vec<Tile>,
    #[serde(default)]
    pub melded: Vec<Vec<Tile>>,
    #[serde(default, with = "winning_tile")]
    pub winning_tile: Option<Tile>, // 未指定は ""
    #[serde(flatten)]
    pub settings: RequestSettings,
}

impl Request {
    pub fn new(concealed: Vec<Tile>, settings: RequestSettings) -> Self {
        Self {
            concealed,
            concealed_kong: vec![],
            melded: vec![],
            winning_tile: None,
            settings,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

mod winning_tile {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Tile;

    pub fn serialize<S>(t: &Option<Tile>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match t {
            Some(t) => serializer.serialize_str(&t.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Tile>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        Tile::from_symbol(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.settings;
        writeln!(f, "concealed: {}", tiles_to_string(&self.concealed))?;
        write!(
            f,
            "prevalent_wind: {}, player_wind: {}, origin: {:?}, last_tile: {:?}",
            s.prevalent_wind.tile(),
            s.player_wind.tile(),
            s.winning_tile_origin,
            s.last_tile_situation,
        )
    }
}

#[test]
fn test_request_json() {
    let req = Request::new(
        vec![Tile(TB, 1), Tile(TD, DR)],
        RequestSettings {
            player_wind: Wind::South,
            ..Default::default()
        },
    );
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "concealed": ["b1", "dr"],
            "concealed_kong": [],
            "melded": [],
            "winning_tile": "",
            "prevalent_wind": "EAST",
            "player_wind": "SOUTH",
            "winning_tile_origin": "Self Drawn",
            "last_tile_situation": "Not Last Tile Situation",
        })
    );
}

#[test]
fn test_request_settings_partial() {
    let s: RequestSettings =
        serde_json::from_str(r#"{"winning_tile_origin": "Discard"}"#).unwrap();
    assert_eq!(s.winning_tile_origin, WinningTileOrigin::Discard);
    assert_eq!(s.prevalent_wind, Wind::East);
    assert_eq!(Wind::North.tile(), Tile(TW, WN));
}

#[test]
fn test_request_from_json() {
    let data = r#"{
        "concealed": ["c1", "c2"],
        "concealed_kong": [],
        "melded": [],
        "winning_tile": "",
        "prevalent_wind": "WEST",
        "player_wind": "EAST",
        "winning_tile_origin": "Self Drawn",
        "last_tile_situation": "Not Last Tile Situation"
    }"#;
    let req: Request = serde_json::from_str(data).unwrap();
    assert_eq!(req.concealed, vec![Tile(TC, 1), Tile(TC, 2)]);
    assert_eq!(req.winning_tile, None);
    assert_eq!(req.settings.prevalent_wind, Wind::West);

    let req: Request =
        serde_json::from_str(r#"{"concealed": [], "winning_tile": "dw"}"#).unwrap();
    assert_eq!(req.winning_tile, Some(Tile(TD, DW)));
    let bad = r#"{"concealed": [], "winning_tile": "x"}"#;
    assert!(serde_json::from_str::<Request>(bad).is_err());
}
