//! 天干、地支與干支柱

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// 十天干，`甲` 為首。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// 十二地支，`子` 為首。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Stem {
    pub const ALL: [Stem; 10] = {
        use Stem::*;
        [Jia, Yi, Bing, Ding, Wu, Ji, Geng, Xin, Ren, Gui]
    };
    const NAMES: [&'static str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

    /// 依序號取天干，`0` 為甲，超出 `0..10` 者取模。
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }
    /// 序號，`0..10`。
    pub fn index(&self) -> u32 {
        *self as u32
    }
    /// 陽干（甲丙戊庚壬）為 `true`。
    pub fn is_yang(&self) -> bool {
        self.index() % 2 == 0
    }
    pub fn name(&self) -> &'static str {
        Self::NAMES[self.index() as usize]
    }
}

impl Branch {
    pub const ALL: [Branch; 12] = {
        use Branch::*;
        [Zi, Chou, Yin, Mao, Chen, Si, Wu, Wei, Shen, You, Xu, Hai]
    };
    const NAMES: [&'static str; 12] = [
        "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
    ];

    /// 依序號取地支，`0` 為子，超出 `0..12` 者取模。
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }
    /// 序號，`0..12`。
    pub fn index(&self) -> u32 {
        *self as u32
    }
    pub fn name(&self) -> &'static str {
        Self::NAMES[self.index() as usize]
    }
    /// 時辰對應的地支。子時跨 23:00 至 00:59。
    ///
    /// ```
    /// use sizhu::chinese::ganzhi::Branch;
    ///
    /// assert_eq!(Branch::Zi, Branch::for_hour(23));
    /// assert_eq!(Branch::Zi, Branch::for_hour(0));
    /// assert_eq!(Branch::Chou, Branch::for_hour(1));
    /// assert_eq!(Branch::Hai, Branch::for_hour(22));
    /// ```
    pub fn for_hour(hour: u32) -> Self {
        Self::from_index((hour as i32 + 1) / 2)
    }
}

/// 干支柱，即天干、地支之組合。
///
/// 干支陰陽必相配（陽干配陽支），故只能經由干支序號或
/// [`Pillar::new`] 建立，兩者皆保證此性質。
///
/// # 用例
///
/// ```
/// use sizhu::chinese::ganzhi::{Branch, Pillar, Stem};
///
/// let p = Pillar::from_sexagenary(1);
/// assert_eq!((Stem::Jia, Branch::Zi), (p.stem(), p.branch()));
/// assert_eq!("甲子", p.to_string());
/// assert!(Pillar::new(Stem::Jia, Branch::Chou).is_none());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// 干支陰陽不配時返回 `None`。
    pub fn new(stem: Stem, branch: Branch) -> Option<Self> {
        (stem.index() % 2 == branch.index() % 2).then_some(Self { stem, branch })
    }
    /// 依干支序號建立，`1` 為甲子，`60` 為癸亥，超出範圍者取模。
    pub fn from_sexagenary(num: u32) -> Self {
        let idx = (num as i32 - 1).rem_euclid(60);
        Self {
            stem: Stem::from_index(idx),
            branch: Branch::from_index(idx),
        }
    }
    /// 依干、支序號建立，二者奇偶須相同。
    pub(crate) fn from_indices(stem: i32, branch: i32) -> Self {
        debug_assert_eq!(stem.rem_euclid(2), branch.rem_euclid(2));
        Self::from_sexagenary((6 * stem - 5 * branch).rem_euclid(60) as u32 + 1)
    }
    /// 干支序號，`1..=60`。
    pub fn sexagenary(&self) -> u32 {
        let (s, b) = (self.stem.index() as i32, self.branch.index() as i32);
        (6 * s - 5 * b).rem_euclid(60) as u32 + 1
    }
    /// 沿六十甲子順（`n > 0`）或逆（`n < 0`）推 `n` 位。
    ///
    /// ```
    /// use sizhu::chinese::ganzhi::Pillar;
    ///
    /// let p = Pillar::from_sexagenary(60); // 癸亥
    /// assert_eq!("甲子", p.shift(1).to_string());
    /// assert_eq!("壬戌", p.shift(-1).to_string());
    /// ```
    pub fn shift(&self, n: i32) -> Self {
        Self::from_sexagenary((self.sexagenary() as i32 + n).rem_euclid(60) as u32)
    }
    pub fn stem(&self) -> Stem {
        self.stem
    }
    pub fn branch(&self) -> Branch {
        self.branch
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// 序列化為 `{"gan": "甲", "zhi": "子"}`。
impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Pillar", 2)?;
        s.serialize_field("gan", &self.stem)?;
        s.serialize_field("zhi", &self.branch)?;
        s.end()
    }
}
