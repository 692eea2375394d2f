use std::fmt;

use tracing::{debug, error, warn};

use super::catalog::Catalog;
use crate::error::InventoryError;
use crate::listener::{notify_all, Listener};
use crate::model::*;

/// 牌の種類ごとの残り枚数を管理する.
/// 全ての牌について `0 <= remaining <= capacity` を常に保証する.
#[derive(Debug)]
pub struct TileInventory {
    catalog: Catalog,
    remaining: TileTable,
    listeners: Vec<Box<dyn Listener>>,
}

impl TileInventory {
    // 全ての牌を上限枚数で初期化
    pub fn new(catalog: Catalog) -> Self {
        let remaining = *catalog.capacities();
        Self {
            catalog,
            remaining,
            listeners: vec![],
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn use_tile(&mut self, tile: Tile) -> Result<(), InventoryError> {
        let remaining = match table_count_mut(&mut self.remaining, tile) {
            Some(n) if *n > 0 => {
                *n -= 1;
                *n
            }
            _ => {
                warn!("tile {} exhausted", tile);
                return Err(InventoryError::Exhausted(tile));
            }
        };

        debug!("use {} (remaining: {})", tile, remaining);
        notify_all(&mut self.listeners, &Event::used(tile, remaining));
        if remaining == 0 {
            notify_all(&mut self.listeners, &Event::depleted(tile));
        }
        Ok(())
    }

    pub fn unuse_tile(&mut self, tile: Tile) -> Result<(), InventoryError> {
        let capacity = self.catalog.capacity(tile);
        let remaining = match table_count_mut(&mut self.remaining, tile) {
            Some(n) if *n < capacity => {
                *n += 1;
                *n
            }
            _ => {
                error!("tile {} over capacity ({})", tile, capacity);
                return Err(InventoryError::OverCapacity(tile));
            }
        };

        debug!("unuse {} (remaining: {})", tile, remaining);
        notify_all(&mut self.listeners, &Event::restored(tile, remaining));
        Ok(())
    }

    #[inline]
    pub fn remaining(&self, tile: Tile) -> Count {
        table_count(&self.remaining, tile)
    }

    #[inline]
    pub fn capacity(&self, tile: Tile) -> Count {
        self.catalog.capacity(tile)
    }

    #[inline]
    pub fn is_depleted(&self, tile: Tile) -> bool {
        self.remaining(tile) == 0
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        self.catalog
            .tiles()
            .iter()
            .map(|&t| (t, self.remaining(t)))
            .collect()
    }
}

impl fmt::Display for TileInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &g in self.catalog.groups() {
            let row: Vec<String> = g
                .tiles()
                .iter()
                .map(|&t| format!("{}:{}", t, self.remaining(t)))
                .collect();
            writeln!(f, "{:?}: {}", g, row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
fn tile(s: &str) -> Tile {
    Tile::from_symbol(s).unwrap()
}

#[test]
fn test_use_until_exhausted() {
    let mut inv = TileInventory::new(Catalog::standard());
    let b1 = tile("b1");
    for n in (0..4).rev() {
        inv.use_tile(b1).unwrap();
        assert_eq!(inv.remaining(b1), n);
    }
    assert!(inv.is_depleted(b1));
    assert_eq!(inv.use_tile(b1), Err(InventoryError::Exhausted(b1)));
    assert_eq!(inv.remaining(b1), 0);
}

#[test]
fn test_unuse_over_capacity() {
    let mut inv = TileInventory::new(Catalog::standard());
    let fp = tile("fp");
    assert_eq!(inv.unuse_tile(fp), Err(InventoryError::OverCapacity(fp)));
    assert_eq!(inv.remaining(fp), 1);

    inv.use_tile(fp).unwrap();
    inv.unuse_tile(fp).unwrap();
    assert_eq!(inv.remaining(fp), 1);
    assert_eq!(inv.unuse_tile(fp), Err(InventoryError::OverCapacity(fp)));
}

#[test]
fn test_tile_outside_catalog() {
    let mut inv = TileInventory::new(Catalog::from_groups(&[TileGroup::Suit]));
    let we = tile("we");
    assert_eq!(inv.remaining(we), 0);
    assert_eq!(inv.use_tile(we), Err(InventoryError::Exhausted(we)));
    assert_eq!(inv.unuse_tile(we), Err(InventoryError::OverCapacity(we)));
    assert!(!inv.snapshot().contains_key(&we));

    let bogus = Tile(TYPE, 1);
    assert_eq!(inv.use_tile(bogus), Err(InventoryError::Exhausted(bogus)));
    assert_eq!(inv.unuse_tile(bogus), Err(InventoryError::OverCapacity(bogus)));
}

#[test]
fn test_inventory_events() {
    use crate::listener::EventChannel;

    let mut inv = TileInventory::new(Catalog::standard());
    let (ch, rx) = EventChannel::pair();
    inv.add_listener(Box::new(ch));

    let fc = tile("fc");
    inv.use_tile(fc).unwrap();
    inv.use_tile(fc).unwrap_err();
    inv.unuse_tile(fc).unwrap();

    let events: Vec<Event> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            Event::used(fc, 0),
            Event::depleted(fc),
            Event::restored(fc, 1)
        ]
    );
}

#[test]
fn test_snapshot() {
    let mut inv = TileInventory::new(Catalog::standard());
    inv.use_tile(tile("dg")).unwrap();
    let snapshot = inv.snapshot();
    assert_eq!(snapshot.len(), 42);
    assert_eq!(snapshot[&tile("dg")], 3);
    assert_eq!(snapshot[&tile("sa")], 1);

    // スナップショットは複製なので後続の変更の影響を受けない
    inv.use_tile(tile("dg")).unwrap();
    assert_eq!(snapshot[&tile("dg")], 3);
}
