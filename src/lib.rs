//! 麻雀の手牌 (request) を組み立てるための在庫・手牌管理.
//!
//! 牌の在庫 ([`TileInventory`]) と手牌 ([`HandAssembly`]) を [`Coordinator`] が
//! 常に同時に更新し, 全ての牌について `残り枚数 + 手牌内の枚数 == 上限枚数` を保つ.
//! 描画や入力の解釈は呼び出し側が行い, このクレートは変更通知とスナップショットのみを提供する.
#![warn(rust_2018_idioms)]

pub mod control;
pub mod error;
pub mod listener;
pub mod model;
pub mod util;

pub use control::{Catalog, Coordinator, HandAssembly, TileInventory};
pub use error::{AssembleError, HandError, InventoryError, ParseTileError, PickError, ReturnError};
pub use listener::{EventChannel, EventPrinter, Listener};
pub use util::config::{load_settings, Settings};
