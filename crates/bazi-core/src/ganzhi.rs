//! 天干、地支、五行静态表。
//!
//! - 天干: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! - 地支: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
//!
//! Every table below is indexed by the enum discriminant and is exhaustive over
//! its domain; `validate_tables` re-checks that at start-up.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CalculationError;

/// 五行
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "木")]
    Wood,
    #[serde(rename = "火")]
    Fire,
    #[serde(rename = "土")]
    Earth,
    #[serde(rename = "金")]
    Metal,
    #[serde(rename = "水")]
    Water,
}

impl Element {
    /// 木火土金水, the order used for histograms and tie-breaking.
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        ["木", "火", "土", "金", "水"][self.index()]
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == s.trim())
    }

    /// 我生: 木→火→土→金→水→木
    pub fn generates(self) -> Element {
        Self::ALL[(self.index() + 1) % 5]
    }

    /// 生我
    pub fn generated_by(self) -> Element {
        Self::ALL[(self.index() + 4) % 5]
    }

    /// 我克: 木→土→水→火→金→木
    pub fn controls(self) -> Element {
        Self::ALL[(self.index() + 2) % 5]
    }

    /// 克我
    pub fn controlled_by(self) -> Element {
        Self::ALL[(self.index() + 3) % 5]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 检查五行是否相生
pub fn is_sheng(from: Element, to: Element) -> bool {
    matches!(
        (from, to),
        (Element::Wood, Element::Fire)
            | (Element::Fire, Element::Earth)
            | (Element::Earth, Element::Metal)
            | (Element::Metal, Element::Water)
            | (Element::Water, Element::Wood)
    )
}

/// 检查五行是否相克
pub fn is_ke(from: Element, to: Element) -> bool {
    matches!(
        (from, to),
        (Element::Wood, Element::Earth)
            | (Element::Earth, Element::Water)
            | (Element::Water, Element::Fire)
            | (Element::Fire, Element::Metal)
            | (Element::Metal, Element::Wood)
    )
}

/// 天干
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

const STEM_LABELS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const STEM_ELEMENTS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Reduces any non-negative offset into the 10-cycle.
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 10]
    }

    pub fn label(self) -> &'static str {
        STEM_LABELS[self.index()]
    }

    pub fn element(self) -> Element {
        STEM_ELEMENTS[self.index()]
    }

    /// 阳干: 甲丙戊庚壬
    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn from_label(s: &str) -> Result<Self, CalculationError> {
        Self::ALL
            .into_iter()
            .find(|x| x.label() == s)
            .ok_or_else(|| CalculationError::InvalidGanZhi(s.to_string()))
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 地支
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

const BRANCH_LABELS: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

/// 时辰: hour 0..=23 -> branch index. 23:00 and 0:00 both fall in 子.
const HOUR_BRANCH: [usize; 24] = [
    0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 0,
];

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 12]
    }

    pub fn label(self) -> &'static str {
        BRANCH_LABELS[self.index()]
    }

    pub fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index()]
    }

    /// Two-hour 时辰 containing `hour`.
    pub fn from_hour(hour: u32) -> Result<Self, CalculationError> {
        HOUR_BRANCH
            .get(hour as usize)
            .map(|&i| Self::ALL[i])
            .ok_or(CalculationError::HourOutOfRange(hour))
    }

    pub fn from_label(s: &str) -> Result<Self, CalculationError> {
        Self::ALL
            .into_iter()
            .find(|x| x.label() == s)
            .ok_or_else(|| CalculationError::InvalidGanZhi(s.to_string()))
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 干支: one pillar of a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Position in the sexagenary cycle, split into `mod 10` / `mod 12`.
    pub fn from_cycle_index(i: usize) -> Self {
        let i = i % 60;
        Self::new(Stem::from_index(i), Branch::from_index(i))
    }

    /// Parses "甲子"-style two-character strings.
    pub fn parse(s: &str) -> Result<Self, CalculationError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(g), Some(z), None) => Ok(Self::new(
                Stem::from_label(&g.to_string())?,
                Branch::from_label(&z.to_string())?,
            )),
            _ => Err(CalculationError::InvalidGanZhi(s.to_string())),
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl Serialize for Pillar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pillar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pillar::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Re-checks table invariants. Called once when the service starts.
pub fn validate_tables() -> Result<(), String> {
    for (i, s) in Stem::ALL.iter().enumerate() {
        if s.index() != i || Stem::from_label(s.label()).ok() != Some(*s) {
            return Err(format!("stem table out of order at {i}"));
        }
    }
    for (i, b) in Branch::ALL.iter().enumerate() {
        if b.index() != i || Branch::from_label(b.label()).ok() != Some(*b) {
            return Err(format!("branch table out of order at {i}"));
        }
    }
    for e in Element::ALL {
        if e.generates().generated_by() != e || e.controls().controlled_by() != e {
            return Err(format!("element cycle broken at {e}"));
        }
        let stems = Stem::ALL.iter().filter(|s| s.element() == e).count();
        if stems != 2 {
            return Err(format!("element {e} owns {stems} stems"));
        }
    }
    Ok(())
}
