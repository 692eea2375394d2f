use tracing::{debug, error, warn};

use super::catalog::Catalog;
use super::hand::HandAssembly;
use super::inventory::TileInventory;
use crate::error::{AssembleError, PickError, ReturnError};
use crate::listener::{notify_all, Listener};
use crate::model::*;
use crate::util::config::Settings;

/// 在庫と手牌を常に同時に更新する.
///
/// 牌の選択 (`pick`) は在庫の減算と手牌への追加を, 返却 (`return_at`) は
/// 手牌からの削除と在庫の加算を1つの操作として行う.
/// 全ての牌について `remaining + count_in_hand == capacity` が操作の前後で成立する.
///
/// 登録したListenerへの通知は両方の更新が完了した後にまとめて行うため,
/// 途中の不整合な状態が外部から見えることはない.
#[derive(Debug)]
pub struct Coordinator {
    inventory: TileInventory,
    hand: HandAssembly,
    settings: RequestSettings,
    listeners: Vec<Box<dyn Listener>>,
}

impl Coordinator {
    pub fn new(catalog: Catalog) -> Self {
        let max_len = catalog.total();
        Self::assemble(
            TileInventory::new(catalog),
            HandAssembly::with_max_len(max_len),
        )
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut c = Self::new(Catalog::from_groups(&settings.groups));
        c.settings = settings.request.clone();
        c
    }

    // 保存則を満たさない在庫と手牌の組み合わせは受け付けない
    pub fn from_parts(
        inventory: TileInventory,
        hand: HandAssembly,
    ) -> Result<Self, AssembleError> {
        if let Err(e) = check_parts(&inventory, &hand) {
            warn!("from_parts rejected: {}", e);
            return Err(e);
        }
        Ok(Self::assemble(inventory, hand))
    }

    // 補償処理の検証用. 検査なしで組み立てる
    #[cfg(test)]
    fn from_parts_unchecked(inventory: TileInventory, hand: HandAssembly) -> Self {
        Self::assemble(inventory, hand)
    }

    fn assemble(inventory: TileInventory, hand: HandAssembly) -> Self {
        Self {
            inventory,
            hand,
            settings: RequestSettings::default(),
            listeners: vec![],
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    // 追加された手牌のIndexを返却
    pub fn pick(&mut self, tile: Tile) -> Result<Index, PickError> {
        if let Err(e) = self.inventory.use_tile(tile) {
            warn!("pick {}: {}", tile, e);
            return Err(PickError::Unavailable(tile));
        }

        let index = match self.hand.append(tile) {
            Ok(i) => i,
            Err(e) => {
                error!("pick {}: append failed: {}", tile, e);
                if let Err(e2) = self.inventory.unuse_tile(tile) {
                    error!("pick {}: rollback failed: {}", tile, e2);
                }
                return Err(PickError::InternalInconsistency(e));
            }
        };

        debug!("pick {} -> hand[{}]", tile, index);
        self.notify_inventory_changed();
        self.notify_hand_changed();
        Ok(index)
    }

    // 返却した牌を返す
    pub fn return_at(&mut self, index: Index) -> Result<Tile, ReturnError> {
        let len = self.hand.len();
        let tile = match self.hand.remove_at(index) {
            Ok(t) => t,
            Err(e) => {
                warn!("return_at {}: {}", index, e);
                return Err(ReturnError::InvalidIndex { index, len });
            }
        };

        if let Err(e) = self.inventory.unuse_tile(tile) {
            error!("return_at {}: restoring {} failed: {}", index, tile, e);
            if let Err(e2) = self.hand.insert_at(index, tile) {
                error!("return_at {}: rollback failed: {}", index, e2);
            }
            return Err(ReturnError::InternalInconsistency(e));
        }

        debug!("return hand[{}] -> {}", index, tile);
        self.notify_hand_changed();
        self.notify_inventory_changed();
        Ok(tile)
    }

    pub fn inventory_snapshot(&self) -> InventorySnapshot {
        self.inventory.snapshot()
    }

    pub fn hand_entries(&self) -> Vec<Tile> {
        self.hand.entries().to_vec()
    }

    #[inline]
    pub fn remaining(&self, tile: Tile) -> Count {
        self.inventory.remaining(tile)
    }

    #[inline]
    pub fn count_in_hand(&self, tile: Tile) -> Count {
        self.hand.count(tile)
    }

    pub fn inventory(&self) -> &TileInventory {
        &self.inventory
    }

    pub fn hand(&self) -> &HandAssembly {
        &self.hand
    }

    pub fn catalog(&self) -> &Catalog {
        self.inventory.catalog()
    }

    // 全ての牌で remaining + count_in_hand == capacity が成立しているか
    pub fn is_consistent(&self) -> bool {
        check_balance(&self.inventory, &self.hand).is_ok()
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }

    pub fn request(&self) -> Request {
        Request::new(self.hand_entries(), self.settings.clone())
    }

    fn notify_inventory_changed(&mut self) {
        let event = Event::inventory_changed(self.inventory.snapshot());
        notify_all(&mut self.listeners, &event);
    }

    fn notify_hand_changed(&mut self) {
        let event = Event::hand_changed(self.hand_entries());
        notify_all(&mut self.listeners, &event);
    }
}

fn check_parts(inventory: &TileInventory, hand: &HandAssembly) -> Result<(), AssembleError> {
    let catalog = inventory.catalog();
    if hand.max_len() < catalog.total() {
        return Err(AssembleError::HandBound {
            max_len: hand.max_len(),
            total: catalog.total(),
        });
    }
    check_balance(inventory, hand)
}

fn check_balance(inventory: &TileInventory, hand: &HandAssembly) -> Result<(), AssembleError> {
    let catalog = inventory.catalog();
    if let Some(&t) = hand.entries().iter().find(|&&t| !catalog.contains(t)) {
        return Err(AssembleError::NotInCatalog(t));
    }
    for &t in catalog.tiles() {
        let remaining = inventory.remaining(t);
        let in_hand = hand.count(t);
        let capacity = catalog.capacity(t);
        if remaining + in_hand != capacity {
            return Err(AssembleError::Unbalanced {
                tile: t,
                remaining,
                in_hand,
                capacity,
            });
        }
    }
    Ok(())
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}


#[cfg(test)]
use crate::error::{HandError, InventoryError};
#[cfg(test)]
use crate::listener::{EventChannel, EventRx};

#[cfg(test)]
fn tile(s: &str) -> Tile {
    Tile::from_symbol(s).unwrap()
}

#[cfg(test)]
fn with_channel(mut c: Coordinator) -> (Coordinator, EventRx) {
    let (ch, rx) = EventChannel::pair();
    c.add_listener(Box::new(ch));
    (c, rx)
}

#[test]
fn test_exhaustion() {
    let mut c = Coordinator::default();
    let b1 = tile("b1");
    for n in 0..4 {
        assert_eq!(c.pick(b1), Ok(n));
        assert_eq!(c.remaining(b1), 3 - n);
    }
    assert_eq!(c.hand_entries(), vec![b1; 4]);

    assert_eq!(c.pick(b1), Err(PickError::Unavailable(b1)));
    assert_eq!(c.remaining(b1), 0);
    assert_eq!(c.hand().len(), 4);
    assert!(c.is_consistent());
}

#[test]
fn test_singleton_bonus_tile() {
    let mut c = Coordinator::default();
    let fp = tile("fp");
    c.pick(fp).unwrap();
    assert_eq!(c.remaining(fp), 0);
    let e = c.pick(fp).unwrap_err();
    assert_eq!(e, PickError::Unavailable(fp));
    assert!(!e.is_fatal());
}

#[test]
fn test_round_trip() {
    let mut c = Coordinator::default();
    c.pick(tile("c3")).unwrap();
    c.pick(tile("dw")).unwrap();
    let before_snapshot = c.inventory_snapshot();
    let before_entries = c.hand_entries();

    let i = c.pick(tile("c3")).unwrap();
    assert_eq!(c.return_at(i), Ok(tile("c3")));
    assert_eq!(c.inventory_snapshot(), before_snapshot);
    assert_eq!(c.hand_entries(), before_entries);
}

#[test]
fn test_index_shift() {
    let mut c = Coordinator::default();
    for s in ["b1", "b2", "b3"] {
        c.pick(tile(s)).unwrap();
    }
    assert_eq!(c.return_at(1), Ok(tile("b2")));
    assert_eq!(c.hand_entries(), vec![tile("b1"), tile("b3")]);
    assert_eq!(c.return_at(1), Ok(tile("b3")));
    assert_eq!(c.hand_entries(), vec![tile("b1")]);
    assert_eq!(c.remaining(tile("b2")), 4);
    assert_eq!(c.remaining(tile("b3")), 4);
}

#[test]
fn test_invalid_return() {
    let mut c = Coordinator::default();
    c.pick(tile("we")).unwrap();
    c.pick(tile("ww")).unwrap();
    let snapshot = c.inventory_snapshot();
    let (mut c, rx) = with_channel(c);

    let e = c.return_at(5).unwrap_err();
    assert_eq!(e, ReturnError::InvalidIndex { index: 5, len: 2 });
    assert!(!e.is_fatal());
    assert_eq!(c.inventory_snapshot(), snapshot);
    assert_eq!(c.hand_entries(), vec![tile("we"), tile("ww")]);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_notification_order() {
    let (mut c, rx) = with_channel(Coordinator::default());
    let dr = tile("dr");

    c.pick(dr).unwrap();
    let events: Vec<Event> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::InventoryChanged(e) => assert_eq!(e.snapshot[&dr], 3),
        e => panic!("unexpected event: {:?}", e),
    }
    assert_eq!(events[1], Event::hand_changed(vec![dr]));

    c.return_at(0).unwrap();
    let events: Vec<Event> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::hand_changed(vec![]));
    match &events[1] {
        Event::InventoryChanged(e) => assert_eq!(e.snapshot[&dr], 4),
        e => panic!("unexpected event: {:?}", e),
    }

    // 失敗した操作は通知しない
    c.pick(Tile(TW, 7)).unwrap_err();
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_from_parts() {
    let mut inv = TileInventory::new(Catalog::standard());
    let mut hand = HandAssembly::with_max_len(144);
    for _ in 0..2 {
        inv.use_tile(tile("c7")).unwrap();
        hand.append(tile("c7")).unwrap();
    }
    let mut c = Coordinator::from_parts(inv, hand).unwrap();
    assert!(c.is_consistent());
    c.pick(tile("c7")).unwrap();
    c.pick(tile("c7")).unwrap();
    assert_eq!(c.pick(tile("c7")), Err(PickError::Unavailable(tile("c7"))));
}

#[test]
fn test_from_parts_unbalanced() {
    // 在庫が満杯のまま手牌にb1が4枚ある
    let inv = TileInventory::new(Catalog::standard());
    let mut hand = HandAssembly::with_max_len(144);
    for _ in 0..4 {
        hand.append(tile("b1")).unwrap();
    }
    let e = Coordinator::from_parts(inv, hand).unwrap_err();
    assert_eq!(
        e,
        AssembleError::Unbalanced {
            tile: tile("b1"),
            remaining: 4,
            in_hand: 4,
            capacity: 4,
        }
    );
}

#[test]
fn test_from_parts_rejected() {
    let inv = TileInventory::new(Catalog::from_groups(&[TileGroup::Suit]));
    let mut hand = HandAssembly::new();
    hand.append(tile("dr")).unwrap();
    assert_eq!(
        Coordinator::from_parts(inv, hand).unwrap_err(),
        AssembleError::NotInCatalog(tile("dr"))
    );

    // 手牌の上限がカタログの合計枚数未満
    let inv = TileInventory::new(Catalog::standard());
    assert_eq!(
        Coordinator::from_parts(inv, HandAssembly::with_max_len(14)).unwrap_err(),
        AssembleError::HandBound {
            max_len: 14,
            total: 144
        }
    );
}

#[test]
fn test_pick_rollback() {
    let inv = TileInventory::new(Catalog::standard());
    let c = Coordinator::from_parts_unchecked(inv, HandAssembly::with_max_len(1));
    let (mut c, rx) = with_channel(c);
    let s9 = tile("s9");

    c.pick(s9).unwrap();
    let _: Vec<Event> = rx.try_iter().collect();

    let e = c.pick(s9).unwrap_err();
    assert_eq!(
        e,
        PickError::InternalInconsistency(HandError::Overflow { max_len: 1 })
    );
    assert!(e.is_fatal());
    assert_eq!(c.remaining(s9), 3);
    assert_eq!(c.hand_entries(), vec![s9]);
    assert!(c.is_consistent());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_return_rollback() {
    let inv = TileInventory::new(Catalog::standard());
    let mut hand = HandAssembly::new();
    hand.append(tile("b5")).unwrap();
    hand.append(tile("c5")).unwrap();
    let mut c = Coordinator::from_parts_unchecked(inv, hand);
    assert!(!c.is_consistent());

    let e = c.return_at(1).unwrap_err();
    assert_eq!(
        e,
        ReturnError::InternalInconsistency(InventoryError::OverCapacity(tile("c5")))
    );
    assert!(e.is_fatal());
    assert_eq!(c.hand_entries(), vec![tile("b5"), tile("c5")]);
    assert_eq!(c.remaining(tile("c5")), 4);
}

#[test]
fn test_from_settings() {
    let settings = Settings {
        groups: vec![TileGroup::Suit, TileGroup::Dragon],
        request: RequestSettings {
            prevalent_wind: Wind::South,
            ..Default::default()
        },
    };
    let mut c = Coordinator::from_settings(&settings);
    assert_eq!(c.catalog().total(), 27 * 4 + 3 * 4);
    assert_eq!(c.hand().max_len(), c.catalog().total());
    assert_eq!(c.pick(tile("fp")), Err(PickError::Unavailable(tile("fp"))));

    c.pick(tile("dg")).unwrap();
    c.settings_mut().player_wind = Wind::West;
    let req = c.request();
    assert_eq!(req.concealed, vec![tile("dg")]);
    assert_eq!(req.settings.prevalent_wind, Wind::South);
    assert_eq!(req.settings.player_wind, Wind::West);
}

// 上限は常にカタログの合計枚数なので, 通常の選択で内部不整合にはならない
#[test]
fn test_hand_bound_not_reached() {
    let settings = Settings {
        groups: vec![TileGroup::Suit],
        ..Default::default()
    };
    let mut c = Coordinator::from_settings(&settings);
    for &t in c.catalog().tiles().to_vec().iter() {
        for _ in 0..4 {
            c.pick(t).unwrap();
        }
    }
    assert_eq!(c.hand().len(), 108);
    assert_eq!(c.pick(tile("c6")), Err(PickError::Unavailable(tile("c6"))));
}
