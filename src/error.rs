use thiserror::Error;

use crate::model::{Index, Tile};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTileError {
    #[error("invalid tile symbol: '{0}'")]
    Symbol(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("tile {0} has no copies left")]
    Exhausted(Tile),
    #[error("tile {0} is already at full capacity")]
    OverCapacity(Tile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("hand index {index} out of range (len: {len})")]
    IndexOutOfRange { index: Index, len: usize },
    #[error("hand cannot hold more than {max_len} tiles")]
    Overflow { max_len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("tile {0} unavailable")]
    Unavailable(Tile),
    #[error("internal inconsistency while picking: {0}")]
    InternalInconsistency(HandError),
}

impl PickError {
    // falseの場合はユーザーへの通知のみでセッションを継続可能
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InternalInconsistency(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReturnError {
    #[error("selection no longer valid: index {index} (len: {len})")]
    InvalidIndex { index: Index, len: usize },
    #[error("internal inconsistency while returning: {0}")]
    InternalInconsistency(InventoryError),
}

impl ReturnError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InternalInconsistency(_))
    }
}

// 既存の在庫と手牌からCoordinatorを組み立てる際の検査結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("tile {tile}: remaining {remaining} + in hand {in_hand} != capacity {capacity}")]
    Unbalanced {
        tile: Tile,
        remaining: usize,
        in_hand: usize,
        capacity: usize,
    },
    #[error("tile {0} in hand is not in the catalog")]
    NotInCatalog(Tile),
    #[error("hand bound {max_len} is below the catalog total {total}")]
    HandBound { max_len: usize, total: usize },
}
