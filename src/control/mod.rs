// 在庫と手牌の整合性を保つための各種処理を行うモジュール
pub mod catalog;
pub mod coordinator;
pub mod hand;
pub mod inventory;

pub use catalog::Catalog;
pub use coordinator::Coordinator;
pub use hand::HandAssembly;
pub use inventory::TileInventory;
