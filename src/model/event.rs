use super::*;

// 在庫のスナップショット (カタログ順)
pub type InventorySnapshot = BTreeMap<Tile, Count>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Used(EventUsed),                         // 在庫から1枚使用
    Restored(EventRestored),                 // 在庫に1枚返却
    Depleted(EventDepleted),                 // 在庫の残りが0になった
    HandChanged(EventHandChanged),           // 手牌の変更
    InventoryChanged(EventInventoryChanged), // 在庫の変更
}

impl Event {
    #[inline]
    pub fn used(tile: Tile, remaining: Count) -> Self {
        Self::Used(EventUsed { tile, remaining })
    }

    #[inline]
    pub fn restored(tile: Tile, remaining: Count) -> Self {
        Self::Restored(EventRestored { tile, remaining })
    }

    #[inline]
    pub fn depleted(tile: Tile) -> Self {
        Self::Depleted(EventDepleted { tile })
    }

    #[inline]
    pub fn hand_changed(entries: Vec<Tile>) -> Self {
        Self::HandChanged(EventHandChanged { entries })
    }

    #[inline]
    pub fn inventory_changed(snapshot: InventorySnapshot) -> Self {
        Self::InventoryChanged(EventInventoryChanged { snapshot })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUsed {
    pub tile: Tile,
    pub remaining: Count,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRestored {
    pub tile: Tile,
    pub remaining: Count,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDepleted {
    pub tile: Tile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHandChanged {
    pub entries: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInventoryChanged {
    pub snapshot: InventorySnapshot,
}

#[test]
fn test_event_json() {
    let ev = Event::used(Tile(TB, 1), 3);
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "Used", "tile": "b1", "remaining": 3})
    );

    let mut snapshot = InventorySnapshot::new();
    snapshot.insert(Tile(TW, WE), 4);
    snapshot.insert(Tile(TF, FP), 0);
    let ev = Event::inventory_changed(snapshot);
    let json = serde_json::to_string(&ev).unwrap();
    let ev2: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(ev, ev2);
}
