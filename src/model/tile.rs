use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{de, ser};

use super::*;
use crate::error::ParseTileError;

// 字牌,花牌の数字部分に対応する記号 (index 0は未使用)
const HONOR_CHARS: [&str; TYPE] = ["", "", "", " eswn", " rgw", " suaw", " pcbo"];
const TYPE_CHARS: [char; TYPE] = ['b', 'c', 's', 'w', 'd', 's', 'f'];

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    pub fn from_symbol(s: &str) -> Result<Self, ParseTileError> {
        let err = || ParseTileError::Symbol(s.to_string());
        let mut chars = s.chars();
        let (c0, c1) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c0), Some(c1), None) => (c0, c1),
            _ => return Err(err()),
        };

        let tile = match (c0, c1) {
            ('b', '1'..='9') => Self(TB, digit(c1)),
            ('c', '1'..='9') => Self(TC, digit(c1)),
            ('s', '1'..='9') => Self(TS, digit(c1)),
            ('w', _) => Self(TW, honor_number(TW, c1).ok_or_else(err)?),
            ('d', _) => Self(TD, honor_number(TD, c1).ok_or_else(err)?),
            ('s', _) => Self(TE, honor_number(TE, c1).ok_or_else(err)?),
            ('f', _) => Self(TF, honor_number(TF, c1).ok_or_else(err)?),
            _ => return Err(err()),
        };
        Ok(tile)
    }

    #[inline]
    pub fn group(&self) -> Option<TileGroup> {
        let g = TileGroup::of(self.0)?;
        if g.numbers().contains(&self.1) {
            Some(g)
        } else {
            None
        }
    }

    // カタログ上に存在し得る牌
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.group().is_some()
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 <= TS
    }
}

fn digit(ch: char) -> Tnum {
    ch as Tnum - '0' as Tnum
}

fn honor_number(ti: Type, ch: char) -> Option<Tnum> {
    match HONOR_CHARS[ti].find(ch) {
        Some(0) | None => None,
        Some(ni) => Some(ni),
    }
}

impl FromStr for Tile {
    type Err = ParseTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c0 = TYPE_CHARS.get(self.0).copied().unwrap_or('?');
        let c1 = if self.is_suit() {
            std::char::from_digit(self.1 as u32, 10)
        } else {
            HONOR_CHARS.get(self.0).and_then(|s| s.chars().nth(self.1))
        };
        write!(f, "{}{}", c0, c1.unwrap_or('?'))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// 空白またはカンマ区切りの牌記号列 (例: "b1 b2,we")
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, ParseTileError> {
    exp.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Tile::from_symbol)
        .collect()
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let vs: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
    vs.join(" ")
}

// [TileGroup]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileGroup {
    Suit,
    Wind,
    Dragon,
    Season,
    Flower,
}

impl TileGroup {
    pub const ALL: [TileGroup; 5] = [
        TileGroup::Suit,
        TileGroup::Wind,
        TileGroup::Dragon,
        TileGroup::Season,
        TileGroup::Flower,
    ];

    pub fn of(ti: Type) -> Option<Self> {
        Some(match ti {
            TB | TC | TS => Self::Suit,
            TW => Self::Wind,
            TD => Self::Dragon,
            TE => Self::Season,
            TF => Self::Flower,
            _ => return None,
        })
    }

    pub fn types(self) -> &'static [Type] {
        match self {
            Self::Suit => &[TB, TC, TS],
            Self::Wind => &[TW],
            Self::Dragon => &[TD],
            Self::Season => &[TE],
            Self::Flower => &[TF],
        }
    }

    pub fn numbers(self) -> RangeInclusive<Tnum> {
        match self {
            Self::Suit => 1..=9,
            Self::Wind => WE..=WN,
            Self::Dragon => DR..=DW,
            Self::Season => SS..=SW,
            Self::Flower => FP..=FO,
        }
    }

    pub fn capacity(self) -> Count {
        match self {
            Self::Suit | Self::Wind | Self::Dragon => CAPACITY_STANDARD,
            Self::Season | Self::Flower => CAPACITY_BONUS,
        }
    }

    pub fn tiles(self) -> Vec<Tile> {
        let mut tiles = vec![];
        for &ti in self.types() {
            for ni in self.numbers() {
                tiles.push(Tile(ti, ni));
            }
        }
        tiles
    }
}

// [TileTable]
pub type TileRow = [Count; TNUM];
pub type TileTable = [TileRow; TYPE];

#[inline]
pub fn table_count(tt: &TileTable, t: Tile) -> Count {
    tt.get(t.0).and_then(|r| r.get(t.1)).copied().unwrap_or(0)
}

#[inline]
pub fn table_count_mut(tt: &mut TileTable, t: Tile) -> Option<&mut Count> {
    tt.get_mut(t.0).and_then(|r| r.get_mut(t.1))
}

#[test]
fn test_tile_symbol() {
    let symbols = [
        "b1", "c9", "s5", "we", "ws", "ww", "wn", "dr", "dg", "dw", "ss", "su", "sa", "sw", "fp",
        "fc", "fb", "fo",
    ];
    for s in symbols {
        let t = Tile::from_symbol(s).unwrap();
        assert!(t.is_valid());
        assert_eq!(t.to_string(), s);
    }
    assert_eq!(Tile::from_symbol("s3").unwrap(), Tile(TS, 3));
    assert_eq!(Tile::from_symbol("sa").unwrap(), Tile(TE, SA));
}

#[test]
fn test_tile_symbol_invalid() {
    for s in ["", "b", "b0", "b10", "wx", "d1", "x1", "fp "] {
        assert_eq!(
            Tile::from_symbol(s),
            Err(ParseTileError::Symbol(s.to_string())),
            "{:?}",
            s
        );
    }
}

#[test]
fn test_tiles_from_string() {
    let tiles = tiles_from_string("b1 b2,we  fp").unwrap();
    assert_eq!(tiles, vec![Tile(TB, 1), Tile(TB, 2), Tile(TW, WE), Tile(TF, FP)]);
    assert_eq!(tiles_to_string(&tiles), "b1 b2 we fp");
    assert!(tiles_from_string("b1 zz").is_err());
}

#[test]
fn test_tile_serde() {
    let t = Tile(TD, DG);
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "\"dg\"");
    let t2: Tile = serde_json::from_str(&json).unwrap();
    assert_eq!(t, t2);
    assert!(serde_json::from_str::<Tile>("\"b0\"").is_err());
}

#[test]
fn test_tile_group() {
    let total: Count = TileGroup::ALL
        .iter()
        .map(|g| g.tiles().len() * g.capacity())
        .sum();
    assert_eq!(total, 144);
    assert_eq!(Tile(TE, SS).group(), Some(TileGroup::Season));
    assert_eq!(Tile(TW, 5).group(), None);
    assert_eq!(Tile(9, 1).group(), None);
}
