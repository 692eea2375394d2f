// 手牌組み立てツールのデータモデル
mod define;
mod event;
mod request;
mod tile;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use event::*;
pub use request::*;
pub use tile::*;
