use std::fmt;

use tracing::{debug, warn};

use crate::error::HandError;
use crate::listener::{notify_all, Listener};
use crate::model::*;

// 手牌に追加した順序を保持する. 枚数の検査は行わない (在庫側の責務)
#[derive(Debug)]
pub struct HandAssembly {
    entries: Vec<Tile>,
    max_len: usize,
    listeners: Vec<Box<dyn Listener>>,
}

impl HandAssembly {
    pub fn new() -> Self {
        Self::with_max_len(usize::MAX)
    }

    // max_lenを超える追加はOverflowになる
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            entries: vec![],
            max_len,
            listeners: vec![],
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    pub fn append(&mut self, tile: Tile) -> Result<Index, HandError> {
        if self.entries.len() >= self.max_len {
            return Err(HandError::Overflow {
                max_len: self.max_len,
            });
        }

        self.entries.push(tile);
        let index = self.entries.len() - 1;
        debug!("append {} at {}", tile, index);
        self.notify_changed();
        Ok(index)
    }

    // 後続の要素のIndexは1つずつ前にずれる
    pub fn remove_at(&mut self, index: Index) -> Result<Tile, HandError> {
        if index >= self.entries.len() {
            warn!("remove_at: index {} out of range", index);
            return Err(self.out_of_range(index));
        }

        let tile = self.entries.remove(index);
        debug!("remove {} at {}", tile, index);
        self.notify_changed();
        Ok(tile)
    }

    // remove_atの取り消し用. index == len の場合は末尾に追加
    pub fn insert_at(&mut self, index: Index, tile: Tile) -> Result<(), HandError> {
        if index > self.entries.len() {
            return Err(self.out_of_range(index));
        }
        if self.entries.len() >= self.max_len {
            return Err(HandError::Overflow {
                max_len: self.max_len,
            });
        }

        self.entries.insert(index, tile);
        debug!("insert {} at {}", tile, index);
        self.notify_changed();
        Ok(())
    }

    pub fn entries(&self) -> &[Tile] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn count(&self, tile: Tile) -> Count {
        self.entries.iter().filter(|&&t| t == tile).count()
    }

    fn out_of_range(&self, index: Index) -> HandError {
        HandError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        }
    }

    fn notify_changed(&mut self) {
        let event = Event::hand_changed(self.entries.clone());
        notify_all(&mut self.listeners, &event);
    }
}

impl Default for HandAssembly {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandAssembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", tiles_to_string(&self.entries))
    }
}

#[cfg(test)]
fn hand_from(exp: &str) -> HandAssembly {
    let mut hand = HandAssembly::new();
    for t in tiles_from_string(exp).unwrap() {
        hand.append(t).unwrap();
    }
    hand
}

#[test]
fn test_append_index() {
    let mut hand = HandAssembly::new();
    assert!(hand.is_empty());
    assert_eq!(hand.append(Tile(TB, 1)), Ok(0));
    assert_eq!(hand.append(Tile(TB, 1)), Ok(1));
    assert_eq!(hand.append(Tile(TW, WE)), Ok(2));
    assert_eq!(hand.count(Tile(TB, 1)), 2);
    assert_eq!(hand.to_string(), "[b1 b1 we]");
}

#[test]
fn test_remove_shifts_index() {
    let mut hand = hand_from("b1 b2 b3");
    assert_eq!(hand.remove_at(1), Ok(Tile(TB, 2)));
    assert_eq!(hand.entries(), &[Tile(TB, 1), Tile(TB, 3)]);
    assert_eq!(hand.remove_at(1), Ok(Tile(TB, 3)));
    assert_eq!(hand.entries(), &[Tile(TB, 1)]);
}

#[test]
fn test_remove_out_of_range() {
    let mut hand = hand_from("b1 c1");
    assert_eq!(
        hand.remove_at(5),
        Err(HandError::IndexOutOfRange { index: 5, len: 2 })
    );
    assert_eq!(
        hand.remove_at(2),
        Err(HandError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(hand.len(), 2);
}

#[test]
fn test_insert_at() {
    let mut hand = hand_from("b1 b3");
    hand.insert_at(1, Tile(TB, 2)).unwrap();
    hand.insert_at(3, Tile(TB, 4)).unwrap();
    assert_eq!(hand.to_string(), "[b1 b2 b3 b4]");
    assert_eq!(
        hand.insert_at(9, Tile(TB, 5)),
        Err(HandError::IndexOutOfRange { index: 9, len: 4 })
    );
}

#[test]
fn test_overflow() {
    let mut hand = HandAssembly::with_max_len(2);
    hand.append(Tile(TS, 1)).unwrap();
    hand.append(Tile(TS, 2)).unwrap();
    assert_eq!(
        hand.append(Tile(TS, 3)),
        Err(HandError::Overflow { max_len: 2 })
    );
    assert_eq!(hand.len(), 2);
}

#[test]
fn test_hand_events() {
    use crate::listener::EventChannel;

    let mut hand = HandAssembly::new();
    let (ch, rx) = EventChannel::pair();
    hand.add_listener(Box::new(ch));

    hand.append(Tile(TD, DR)).unwrap();
    hand.append(Tile(TD, DG)).unwrap();
    hand.remove_at(0).unwrap();
    hand.remove_at(3).unwrap_err();

    let events: Vec<Event> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            Event::hand_changed(vec![Tile(TD, DR)]),
            Event::hand_changed(vec![Tile(TD, DR), Tile(TD, DG)]),
            Event::hand_changed(vec![Tile(TD, DG)]),
        ]
    );
}
