//! 三才五格 and the 81-number luck table.

use serde::{Deserialize, Serialize};

use crate::ganzhi::{is_ke, is_sheng, Element};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuckLevel {
    #[serde(rename = "大吉")]
    GreatFortune,
    #[serde(rename = "吉")]
    Fortune,
    #[serde(rename = "半吉")]
    HalfFortune,
    #[serde(rename = "平")]
    Neutral,
    #[serde(rename = "凶")]
    Misfortune,
    #[serde(rename = "大凶")]
    GreatMisfortune,
}

impl LuckLevel {
    pub fn score(self) -> u32 {
        match self {
            LuckLevel::GreatFortune => 95,
            LuckLevel::Fortune => 80,
            LuckLevel::HalfFortune => 70,
            LuckLevel::Neutral => 60,
            LuckLevel::Misfortune => 40,
            LuckLevel::GreatMisfortune => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LuckLevel::GreatFortune => "大吉",
            LuckLevel::Fortune => "吉",
            LuckLevel::HalfFortune => "半吉",
            LuckLevel::Neutral => "平",
            LuckLevel::Misfortune => "凶",
            LuckLevel::GreatMisfortune => "大凶",
        }
    }

    /// Level for an overall 0-100 name score.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            LuckLevel::GreatFortune
        } else if score >= 80.0 {
            LuckLevel::Fortune
        } else if score >= 70.0 {
            LuckLevel::HalfFortune
        } else if score >= 60.0 {
            LuckLevel::Neutral
        } else if score >= 40.0 {
            LuckLevel::Misfortune
        } else {
            LuckLevel::GreatMisfortune
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Luck {
    pub luck: LuckLevel,
    pub desc: &'static str,
}

use LuckLevel::{Fortune as J, GreatFortune as DJ, HalfFortune as BJ, Misfortune as X};

/// Numbers with a specific reading. Everything else uses [`number_luck`]'s default.
const NUMBER_LUCK: &[(i32, LuckLevel, &str)] = &[
    (1, DJ, "太极之数，万物开泰"),
    (2, X, "两仪之数，混沌未开"),
    (3, DJ, "三才之数，天地人和"),
    (4, X, "四象之数，待于生发"),
    (5, DJ, "五行之数，循环相生"),
    (6, DJ, "六爻之数，发展变化"),
    (7, J, "七政之数，精悍严谨"),
    (8, J, "八卦之数，乾坤震巽"),
    (9, X, "大成之数，蕴涵凶险"),
    (10, X, "终数之数，雪暗飘零"),
    (11, DJ, "旱苗逢雨，万物更新"),
    (12, X, "无理之数，发展薄弱"),
    (13, DJ, "天才，多才多艺"),
    (14, X, "破兆，家庭缘薄"),
    (15, DJ, "福寿，完成学识"),
    (16, DJ, "厚重，载德载物"),
    (17, BJ, "刚强，突破万难"),
    (18, DJ, "有志，有目的志"),
    (19, X, "多难，风云蔽日"),
    (20, X, "非业，非运之空"),
    (21, DJ, "明月中天，独立权威"),
    (23, DJ, "壮丽，旭日东升"),
    (24, DJ, "掘藏得金，家门余庆"),
    (25, BJ, "荣俊，资性英敏"),
    (29, BJ, "智谋，智谋优秀"),
    (31, DJ, "春日花开，智勇得志"),
    (32, DJ, "侥幸，龙池跃龙"),
    (33, DJ, "升天，家门昌隆"),
    (35, DJ, "高楼望月，温和平静"),
    (37, DJ, "猛虎出林，权威显达"),
    (39, BJ, "富贵，财源进宝"),
    (41, DJ, "有德，纯阳独秀"),
    (45, DJ, "顺风，新生泰和"),
    (47, DJ, "点石成金，花开之象"),
    (48, DJ, "古松立鹤，德智兼备"),
    (52, BJ, "达眼，卓识达眼"),
    (57, BJ, "日照春松，寒雪青松"),
    (63, DJ, "舟归平海，富贵繁荣"),
    (65, DJ, "巨流归海，富贵长寿"),
    (67, DJ, "通达，天赋幸运"),
    (68, DJ, "顺风，思虑周密"),
    (81, DJ, "万物回春，恒久富贵"),
];

/// Folds any integer into 1..=81 first.
pub fn number_luck(n: i32) -> Luck {
    let n = (n - 1).rem_euclid(81) + 1;
    if let Some(&(_, luck, desc)) = NUMBER_LUCK.iter().find(|(k, _, _)| *k == n) {
        return Luck { luck, desc };
    }
    if n % 2 == 1 && n < 40 {
        Luck { luck: LuckLevel::Fortune, desc: "运势平稳，有所发展" }
    } else {
        Luck { luck: LuckLevel::Neutral, desc: "运势一般，平稳发展" }
    }
}

/// Element by last digit: 1,2 木 3,4 火 5,6 土 7,8 金 9,0 水.
pub fn number_element(n: i32) -> Element {
    match n.rem_euclid(10) {
        1 | 2 => Element::Wood,
        3 | 4 => Element::Fire,
        5 | 6 => Element::Earth,
        7 | 8 => Element::Metal,
        _ => Element::Water,
    }
}

const SANCAI: &[([Element; 3], LuckLevel, &str)] = {
    use Element::*;
    &[
        ([Wood, Wood, Wood], DJ, "同心协力，成功发达"),
        ([Wood, Wood, Fire], DJ, "木火通明，前程似锦"),
        ([Wood, Fire, Earth], DJ, "顺序相生，大获成功"),
        ([Fire, Earth, Metal], DJ, "三才相生，富贵双全"),
        ([Earth, Metal, Water], DJ, "金水相生，智慧过人"),
        ([Metal, Water, Wood], DJ, "水木清华，文采斐然"),
        ([Water, Wood, Fire], DJ, "木火通明，事业有成"),
        ([Wood, Metal, Earth], X, "金克木，多有挫折"),
        ([Fire, Water, Metal], X, "水火不容，冲突不断"),
        ([Earth, Wood, Water], X, "木土相克，发展受阻"),
    ]
};

/// Combination table first, then the generate/control rule.
pub fn evaluate_sancai(tian: Element, ren: Element, di: Element) -> Luck {
    if let Some(&(_, luck, desc)) = SANCAI.iter().find(|(k, _, _)| *k == [tian, ren, di]) {
        return Luck { luck, desc };
    }
    let harmonious = if is_sheng(tian, ren) || is_sheng(ren, di) {
        true
    } else {
        !(is_ke(tian, ren) || is_ke(ren, di))
    };
    if harmonious {
        Luck { luck: LuckLevel::Fortune, desc: "三才配置和谐，运势良好" }
    } else {
        Luck { luck: LuckLevel::Neutral, desc: "三才配置一般，需要努力" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub value: i32,
    pub wuxing: Element,
    pub luck: Luck,
}

impl Grid {
    fn new(value: i32) -> Self {
        Self {
            value,
            wuxing: number_element(value),
            luck: number_luck(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WugeAnalysis {
    #[serde(rename = "天格")]
    pub tian: Grid,
    #[serde(rename = "人格")]
    pub ren: Grid,
    #[serde(rename = "地格")]
    pub di: Grid,
    #[serde(rename = "外格")]
    pub wai: Grid,
    #[serde(rename = "总格")]
    pub zong: Grid,
}

impl WugeAnalysis {
    pub fn grids(&self) -> [&Grid; 5] {
        [&self.tian, &self.ren, &self.di, &self.wai, &self.zong]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WugeEvaluation {
    pub score: f64,
    pub level: &'static str,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SancaiWuge {
    pub wuge_analysis: WugeAnalysis,
    pub sancai_config: String,
    pub sancai_evaluation: Luck,
    pub overall_evaluation: WugeEvaluation,
}

impl SancaiWuge {
    /// Five grids from per-character stroke counts.
    pub fn from_strokes(surname: &[u32], given: &[u32]) -> Self {
        let s: i32 = surname.iter().map(|&n| n as i32).sum();
        let g: i32 = given.iter().map(|&n| n as i32).sum();
        let tian = if surname.len() == 1 { s + 1 } else { s };
        let ren = s + given.first().map_or(1, |&n| n as i32);
        let di = if given.is_empty() { 1 } else { g };
        let wai = tian + di - ren;
        let zong = s + g;

        let wuge_analysis = WugeAnalysis {
            tian: Grid::new(tian),
            ren: Grid::new(ren),
            di: Grid::new(di),
            wai: Grid::new(wai),
            zong: Grid::new(zong),
        };
        let (te, re, de) = (
            wuge_analysis.tian.wuxing,
            wuge_analysis.ren.wuxing,
            wuge_analysis.di.wuxing,
        );
        let overall_evaluation = overall(&wuge_analysis);
        Self {
            sancai_config: format!("{te}{re}{de}"),
            sancai_evaluation: evaluate_sancai(te, re, de),
            overall_evaluation,
            wuge_analysis,
        }
    }
}

fn overall(w: &WugeAnalysis) -> WugeEvaluation {
    let total: u32 = w.grids().iter().map(|g| g.luck.luck.score()).sum();
    let avg = total as f64 / 5.0;
    let level = if avg >= 85.0 {
        "优秀"
    } else if avg >= 70.0 {
        "良好"
    } else if avg >= 60.0 {
        "一般"
    } else {
        "需改善"
    };
    WugeEvaluation {
        score: (avg * 10.0).round_ties_even() / 10.0,
        level,
        description: format!("五格综合评分{avg:.1}分，等级：{level}"),
    }
}
