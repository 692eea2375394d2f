use crate::model::*;

/// 牌の種類ごとの上限枚数を保持する不変のテーブル.
/// 起動時に一度だけ生成し, 以後変更しない.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    capacities: TileTable,
    tiles: Vec<Tile>, // カタログ順
    groups: Vec<TileGroup>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self::from_groups(&TileGroup::ALL)
    }

    pub fn from_groups(groups: &[TileGroup]) -> Self {
        let mut capacities = TileTable::default();
        let mut gs = vec![];
        for &g in TileGroup::ALL.iter().filter(|g| groups.contains(*g)) {
            for t in g.tiles() {
                capacities[t.0][t.1] = g.capacity();
            }
            gs.push(g);
        }

        let mut tiles = vec![];
        for ti in 0..TYPE {
            for ni in 0..TNUM {
                if capacities[ti][ni] != 0 {
                    tiles.push(Tile(ti, ni));
                }
            }
        }

        Self {
            capacities,
            tiles,
            groups: gs,
        }
    }

    // カタログ外の牌は0
    #[inline]
    pub fn capacity(&self, tile: Tile) -> Count {
        table_count(&self.capacities, tile)
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.capacity(tile) != 0
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn groups(&self) -> &[TileGroup] {
        &self.groups
    }

    pub(crate) fn capacities(&self) -> &TileTable {
        &self.capacities
    }

    // 全牌の合計枚数
    pub fn total(&self) -> Count {
        self.tiles.iter().map(|&t| self.capacity(t)).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[test]
fn test_standard_catalog() {
    let c = Catalog::standard();
    assert_eq!(c.tiles().len(), 42);
    assert_eq!(c.total(), 144);
    assert_eq!(c.capacity(Tile(TB, 1)), 4);
    assert_eq!(c.capacity(Tile(TD, DW)), 4);
    assert_eq!(c.capacity(Tile(TF, FP)), 1);
    assert_eq!(c.capacity(Tile(TE, SW)), 1);
    assert_eq!(c.capacity(Tile(TB, 0)), 0);
    assert_eq!(c.capacity(Tile(42, 1)), 0);

    // カタログ順: 数牌 -> 風牌 -> 三元牌 -> 季節牌 -> 花牌
    assert_eq!(c.tiles()[0], Tile(TB, 1));
    assert_eq!(c.tiles()[27], Tile(TW, WE));
    assert_eq!(c.tiles()[41], Tile(TF, FO));
}

#[test]
fn test_partial_catalog() {
    let c = Catalog::from_groups(&[TileGroup::Flower, TileGroup::Suit]);
    assert_eq!(c.groups(), &[TileGroup::Suit, TileGroup::Flower]);
    assert_eq!(c.total(), 27 * 4 + 4);
    assert!(!c.contains(Tile(TW, WE)));
    assert!(c.contains(Tile(TF, FB)));
}
