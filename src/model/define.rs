// 型エイリアス
pub type Type = usize; // 牌の種別部分 (索子,萬子,筒子,風牌,三元牌,季節牌,花牌)
pub type Tnum = usize; // 牌の数字部分 (1~9, 0は未使用)
pub type Index = usize; // 手牌のIndex
pub type Count = usize; // 枚数

// Number
pub const TYPE: usize = 7; // 牌の種別部分の数
pub const TNUM: usize = 10; // 牌の数字部分の数 (0~9)

// Type Index
pub const TB: Type = 0; // Type: Bamboo     (索子)
pub const TC: Type = 1; // Type: Characters (萬子)
pub const TS: Type = 2; // Type: Stones     (筒子)
pub const TW: Type = 3; // Type: Wind       (風牌)
pub const TD: Type = 4; // Type: Dragon     (三元牌)
pub const TE: Type = 5; // Type: sEason     (季節牌)
pub const TF: Type = 6; // Type: Flower     (花牌)

// Tnum Index
pub const WE: Tnum = 1; // Wind:   East   (東)
pub const WS: Tnum = 2; // Wind:   South  (南)
pub const WW: Tnum = 3; // Wind:   West   (西)
pub const WN: Tnum = 4; // Wind:   North  (北)
pub const DR: Tnum = 1; // Dragon: Red    (中)
pub const DG: Tnum = 2; // Dragon: Green  (發)
pub const DW: Tnum = 3; // Dragon: White  (白)
pub const SS: Tnum = 1; // Season: Spring (春)
pub const SU: Tnum = 2; // Season: Summer (夏)
pub const SA: Tnum = 3; // Season: Autumn (秋)
pub const SW: Tnum = 4; // Season: Winter (冬)
pub const FP: Tnum = 1; // Flower: Plum          (梅)
pub const FC: Tnum = 2; // Flower: Chrysanthemum (菊)
pub const FB: Tnum = 3; // Flower: Bamboo        (竹)
pub const FO: Tnum = 4; // Flower: Orchid        (蘭)

// Capacity
pub const CAPACITY_STANDARD: Count = 4; // 数牌,風牌,三元牌
pub const CAPACITY_BONUS: Count = 1; // 季節牌,花牌
