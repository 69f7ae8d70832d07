//! 每日运势: the day's 干支 against a personal day master.
//!
//! Category scores run 1.0-5.0 in 0.1 steps. The overall score weights them
//! by age band and nudges the result by the current solar term.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::current_solar_term;
use crate::error::{CalculationError, CalculationResult};
use crate::ganzhi::{Branch, Element, Stem};

/// 1900-01-31, counted as 甲子 for daily ganzhi.
const DAILY_EPOCH: (i32, u32, u32) = (1900, 1, 31);

pub const DEFAULT_AGE: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyGanZhi {
    pub heavenly_stem: Stem,
    pub earthly_branch: Branch,
    pub ganzhi: String,
    pub stem_index: usize,
    pub branch_index: usize,
}

pub fn daily_ganzhi(date: NaiveDate) -> DailyGanZhi {
    let (y, m, d) = DAILY_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
    let days = (date - epoch).num_days();
    let stem_index = days.rem_euclid(10) as usize;
    let branch_index = days.rem_euclid(12) as usize;
    let (stem, branch) = (Stem::from_index(stem_index), Branch::from_index(branch_index));
    DailyGanZhi {
        heavenly_stem: stem,
        earthly_branch: branch,
        ganzhi: format!("{}{}", stem.label(), branch.label()),
        stem_index,
        branch_index,
    }
}

/// How the other element stands to the day master's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Relation {
    #[serde(rename = "同气")]
    Same,
    #[serde(rename = "我生他")]
    Generates,
    #[serde(rename = "我克他")]
    Controls,
    #[serde(rename = "他生我")]
    GeneratedBy,
    #[serde(rename = "他克我")]
    ControlledBy,
}

impl Relation {
    pub fn between(personal: Element, other: Element) -> Self {
        if personal == other {
            Relation::Same
        } else if personal.generates() == other {
            Relation::Generates
        } else if personal.controls() == other {
            Relation::Controls
        } else if personal.generated_by() == other {
            Relation::GeneratedBy
        } else {
            Relation::ControlledBy
        }
    }

    pub fn strength(self) -> f64 {
        match self {
            Relation::Same => 0.8,
            Relation::Generates => 0.6,
            Relation::Controls => 0.7,
            Relation::GeneratedBy => 1.0,
            Relation::ControlledBy => 0.3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Relation::Same => "同气",
            Relation::Generates => "我生他",
            Relation::Controls => "我克他",
            Relation::GeneratedBy => "他生我",
            Relation::ControlledBy => "他克我",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RelationInfo {
    #[serde(rename = "type")]
    pub kind: Relation,
    pub strength: f64,
}

impl From<Relation> for RelationInfo {
    fn from(kind: Relation) -> Self {
        Self { kind, strength: kind.strength() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverallRelation {
    pub harmony_score: f64,
    pub description: &'static str,
}

impl OverallRelation {
    fn from_pair(stem: RelationInfo, branch: RelationInfo) -> Self {
        let harmony_score = (stem.strength + branch.strength) / 2.0;
        let description = if harmony_score >= 0.8 {
            "五行和谐，运势极佳"
        } else if harmony_score >= 0.6 {
            "五行相生，运势良好"
        } else if harmony_score >= 0.4 {
            "五行平衡，运势一般"
        } else {
            "五行冲克，需要谨慎"
        };
        Self { harmony_score, description }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WuxingRelations {
    pub personal_day_wuxing: Element,
    pub daily_stem_wuxing: Element,
    pub daily_branch_wuxing: Element,
    pub stem_relation: RelationInfo,
    pub branch_relation: RelationInfo,
    pub overall_relation: OverallRelation,
}

impl WuxingRelations {
    pub fn analyse(day_master: Stem, day: &DailyGanZhi) -> Self {
        let personal = day_master.element();
        let stem_el = day.heavenly_stem.element();
        let branch_el = day.earthly_branch.element();
        let stem_relation: RelationInfo = Relation::between(personal, stem_el).into();
        let branch_relation: RelationInfo = Relation::between(personal, branch_el).into();
        Self {
            personal_day_wuxing: personal,
            daily_stem_wuxing: stem_el,
            daily_branch_wuxing: branch_el,
            overall_relation: OverallRelation::from_pair(stem_relation, branch_relation),
            stem_relation,
            branch_relation,
        }
    }
}

/// 十神
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TenGod {
    #[serde(rename = "比肩")]
    BiJian,
    #[serde(rename = "劫财")]
    JieCai,
    #[serde(rename = "食神")]
    ShiShen,
    #[serde(rename = "伤官")]
    ShangGuan,
    #[serde(rename = "偏财")]
    PianCai,
    #[serde(rename = "正财")]
    ZhengCai,
    #[serde(rename = "偏官")]
    PianGuan,
    #[serde(rename = "正官")]
    ZhengGuan,
    #[serde(rename = "偏印")]
    PianYin,
    #[serde(rename = "正印")]
    ZhengYin,
}

impl TenGod {
    /// Same polarity gives the 偏 (or 食神) variant, opposite gives 正 (or 伤官).
    pub fn between(me: Stem, other: Stem) -> Self {
        if me == other {
            return TenGod::BiJian;
        }
        let same_polarity = me.is_yang() == other.is_yang();
        match (Relation::between(me.element(), other.element()), same_polarity) {
            (Relation::Same, _) => TenGod::JieCai,
            (Relation::Generates, true) => TenGod::ShiShen,
            (Relation::Generates, false) => TenGod::ShangGuan,
            (Relation::Controls, true) => TenGod::PianCai,
            (Relation::Controls, false) => TenGod::ZhengCai,
            (Relation::GeneratedBy, true) => TenGod::PianYin,
            (Relation::GeneratedBy, false) => TenGod::ZhengYin,
            (Relation::ControlledBy, true) => TenGod::PianGuan,
            (Relation::ControlledBy, false) => TenGod::ZhengGuan,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TenGod::BiJian => "比肩",
            TenGod::JieCai => "劫财",
            TenGod::ShiShen => "食神",
            TenGod::ShangGuan => "伤官",
            TenGod::PianCai => "偏财",
            TenGod::ZhengCai => "正财",
            TenGod::PianGuan => "偏官",
            TenGod::ZhengGuan => "正官",
            TenGod::PianYin => "偏印",
            TenGod::ZhengYin => "正印",
        }
    }

    pub fn influence(self) -> f64 {
        match self {
            TenGod::BiJian => 0.6,
            TenGod::JieCai => 0.4,
            TenGod::ShiShen => 0.8,
            TenGod::ShangGuan => 0.5,
            TenGod::PianCai => 0.9,
            TenGod::ZhengCai => 0.7,
            TenGod::PianGuan => 0.3,
            TenGod::ZhengGuan => 0.8,
            TenGod::PianYin => 0.4,
            TenGod::ZhengYin => 0.9,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TenGod::BiJian => "竞争激烈，需谨慎",
            TenGod::JieCai => "破财之象，勿投资",
            TenGod::ShiShen => "创造力强，宜表达",
            TenGod::ShangGuan => "情绪波动，注意言行",
            TenGod::PianCai => "偏财运佳，机会多",
            TenGod::ZhengCai => "正财稳定，积累为主",
            TenGod::PianGuan => "压力较大，谨慎行事",
            TenGod::ZhengGuan => "贵人相助，事业顺利",
            TenGod::PianYin => "思维敏捷，但易多疑",
            TenGod::ZhengYin => "学习运佳，贵人扶持",
        }
    }

    fn is_wealth(self) -> bool {
        matches!(self, TenGod::JieCai | TenGod::PianCai | TenGod::ZhengCai)
    }

    fn is_officer(self) -> bool {
        matches!(self, TenGod::ShangGuan | TenGod::PianGuan | TenGod::ZhengGuan)
    }

    fn is_seal(self) -> bool {
        matches!(self, TenGod::PianYin | TenGod::ZhengYin)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TenGodEffect {
    pub influence: f64,
    pub description: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TenGodAnalysis {
    pub personal_day_stem: Stem,
    pub daily_stem: Stem,
    pub ten_gods_relation: TenGod,
    pub effect: TenGodEffect,
}

impl TenGodAnalysis {
    pub fn analyse(day_master: Stem, day: &DailyGanZhi) -> Self {
        let god = TenGod::between(day_master, day.heavenly_stem);
        Self {
            personal_day_stem: day_master,
            daily_stem: day.heavenly_stem,
            ten_gods_relation: god,
            effect: TenGodEffect {
                influence: god.influence(),
                description: god.description(),
            },
        }
    }
}

/// Effect of the term in force; unknown names count as 0.5.
pub fn solar_term_effect(term: &str) -> f64 {
    match term {
        "立春" => 0.8,
        "雨水" => 0.6,
        "惊蛰" => 0.7,
        "春分" => 0.9,
        "清明" => 0.8,
        "谷雨" => 0.6,
        "立夏" => 0.9,
        "小满" => 0.7,
        "芒种" => 0.8,
        "夏至" => 1.0,
        "小暑" => 0.9,
        "大暑" => 0.7,
        "立秋" => 0.8,
        "处暑" => 0.6,
        "白露" => 0.7,
        "秋分" => 0.9,
        "寒露" => 0.8,
        "霜降" => 0.6,
        "立冬" => 0.7,
        "小雪" => 0.5,
        "大雪" => 0.6,
        "冬至" => 0.4,
        "小寒" => 0.3,
        "大寒" => 0.2,
        _ => 0.5,
    }
}

/// Clamp to 1-5 after rounding to one decimal.
pub fn normalise(score: f64) -> f64 {
    ((score * 10.0).round_ties_even() / 10.0).clamp(1.0, 5.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CategoryScores {
    pub wealth: f64,
    pub career: f64,
    pub health: f64,
    pub love: f64,
    pub study: f64,
}

impl CategoryScores {
    pub fn compute(w: &WuxingRelations, god: TenGod) -> Self {
        let stem = w.stem_relation.kind;
        let mut wealth = if stem == Relation::Controls { 1.0 } else { 0.0 };
        if god.is_wealth() {
            wealth += 0.5;
        }
        let mut career = if stem == Relation::ControlledBy { 0.8 } else { 0.0 };
        if god.is_officer() {
            career += 0.5;
        }
        let health = match stem {
            Relation::Same | Relation::GeneratedBy => 1.0,
            _ => 0.0,
        };
        let love = w.overall_relation.harmony_score;
        let mut study = if stem == Relation::GeneratedBy { 1.2 } else { 0.0 };
        if god.is_seal() {
            study += 0.5;
        }
        Self {
            wealth: normalise(3.0 + wealth),
            career: normalise(3.0 + career),
            health: normalise(3.0 + health),
            love: normalise(3.0 + love),
            study: normalise(3.0 + study),
        }
    }
}

/// Attention weights per life stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgeWeights {
    pub career: f64,
    pub wealth: f64,
    pub health: f64,
    pub love: f64,
    pub study: f64,
}

impl AgeWeights {
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=30 => Self { career: 0.30, wealth: 0.15, health: 0.15, love: 0.25, study: 0.15 },
            31..=50 => Self { career: 0.30, wealth: 0.30, health: 0.20, love: 0.15, study: 0.05 },
            _ => Self { career: 0.10, wealth: 0.20, health: 0.40, love: 0.25, study: 0.05 },
        }
    }

    fn apply(&self, s: &CategoryScores) -> f64 {
        s.wealth * self.wealth
            + s.career * self.career
            + s.health * self.health
            + s.love * self.love
            + s.study * self.study
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LuckyElements {
    pub lucky_color: &'static str,
    pub lucky_colors: [&'static str; 2],
    pub lucky_number: u32,
    pub lucky_numbers: [u32; 2],
    pub lucky_direction: &'static str,
    pub beneficial_wuxing: Element,
}

impl LuckyElements {
    fn for_relations(w: &WuxingRelations) -> Self {
        let personal = w.personal_day_wuxing;
        let need = if w.stem_relation.kind == Relation::ControlledBy
            || w.overall_relation.harmony_score < 0.5
        {
            personal.generated_by()
        } else {
            personal
        };
        let (colors, numbers, direction) = match need {
            Element::Wood => (["绿色", "青色"], [3, 8], "东方"),
            Element::Fire => (["红色", "紫色"], [2, 7], "南方"),
            Element::Earth => (["黄色", "棕色"], [5, 0], "中央"),
            Element::Metal => (["白色", "银色"], [4, 9], "西方"),
            Element::Water => (["黑色", "蓝色"], [1, 6], "北方"),
        };
        Self {
            lucky_color: colors[0],
            lucky_colors: colors,
            lucky_number: numbers[0],
            lucky_numbers: numbers,
            lucky_direction: direction,
            beneficial_wuxing: need,
        }
    }
}

fn advice(stem: Relation, s: &CategoryScores) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut suitable = Vec::new();
    let mut warnings = Vec::new();
    match stem {
        Relation::GeneratedBy => suitable.extend(["宜学习", "宜求助贵人", "宜接受帮助"]),
        Relation::Generates => suitable.extend(["宜付出", "宜帮助他人", "宜创作表达"]),
        Relation::Controls => suitable.extend(["宜投资", "宜开拓", "宜主动出击"]),
        Relation::ControlledBy => warnings.extend(["忌冲动", "忌争执", "宜低调行事"]),
        Relation::Same => suitable.extend(["宜合作", "宜团队工作", "宜与同类人交往"]),
    }
    if s.wealth >= 4.0 {
        suitable.extend(["宜理财", "宜投资"]);
    } else if s.wealth <= 2.0 {
        warnings.extend(["忌大额消费", "忌投资风险项目"]);
    }
    if s.health <= 2.0 {
        warnings.extend(["注意身体健康", "宜多休息"]);
    }
    (suitable, warnings)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyFortune {
    pub date: String,
    pub daily_ganzhi: DailyGanZhi,
    pub solar_term: &'static str,
    pub overall_score: f64,
    pub detailed_scores: CategoryScores,
    pub lucky_elements: LuckyElements,
    pub wuxing_analysis: WuxingRelations,
    pub ten_gods_analysis: TenGodAnalysis,
    pub suggestions: Vec<&'static str>,
    pub warnings: Vec<&'static str>,
    pub detailed_analysis: String,
}

pub fn daily_fortune(day_master: Stem, date: NaiveDate, age: u32) -> DailyFortune {
    let day = daily_ganzhi(date);
    let wuxing = WuxingRelations::analyse(day_master, &day);
    let gods = TenGodAnalysis::analyse(day_master, &day);
    let term = current_solar_term(date);
    let scores = CategoryScores::compute(&wuxing, gods.ten_gods_relation);
    let season = (solar_term_effect(term) - 0.5) * 0.1;
    let overall = normalise(AgeWeights::for_age(age).apply(&scores) + season);
    let (suggestions, warnings) = advice(wuxing.stem_relation.kind, &scores);
    let detailed_analysis = format!(
        "今日干支为{}{}，与您的日干{}形成{}的关系。十神关系为{}，{}。{}",
        wuxing.daily_stem_wuxing.label(),
        wuxing.daily_branch_wuxing.label(),
        wuxing.personal_day_wuxing.label(),
        wuxing.stem_relation.kind.label(),
        gods.ten_gods_relation.label(),
        gods.effect.description,
        wuxing.overall_relation.description
    );
    DailyFortune {
        date: date.format("%Y-%m-%d").to_string(),
        daily_ganzhi: day,
        solar_term: term,
        overall_score: overall,
        detailed_scores: scores,
        lucky_elements: LuckyElements::for_relations(&wuxing),
        wuxing_analysis: wuxing,
        ten_gods_analysis: gods,
        suggestions,
        warnings,
        detailed_analysis,
    }
}

pub fn parse_date(s: &str) -> CalculationResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalculationError::MalformedDate(s.to_string()))
}

/// Pillars as sent by the client. Only the day pillar is read; `day` is
/// accepted as an alias.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PersonalBazi {
    #[serde(default, alias = "day")]
    pub day_pillar: Option<String>,
}

impl PersonalBazi {
    pub fn day_master(&self) -> CalculationResult<Stem> {
        let pillar = self.day_pillar.as_deref().map(str::trim).unwrap_or_default();
        match pillar.chars().next() {
            Some(c) => Stem::from_label(&c.to_string()),
            None => Err(CalculationError::MissingDayPillar),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bazi_data: PersonalBazi,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberFortune {
    pub member_id: String,
    pub member_name: String,
    pub fortune: Option<DailyFortune>,
    pub has_valid_fortune: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FamilyOverview {
    pub total_members: usize,
    pub average_score: f64,
    pub best_member: Option<String>,
    pub family_lucky_color: &'static str,
    pub suggestions: Vec<String>,
    pub active_members: usize,
}

impl FamilyOverview {
    pub fn summarise(members: &[MemberFortune]) -> Self {
        let valid: Vec<(&MemberFortune, &DailyFortune)> = members
            .iter()
            .filter_map(|m| m.fortune.as_ref().map(|f| (m, f)))
            .collect();
        if valid.is_empty() {
            let hint = if members.is_empty() { "添加家庭成员开始使用" } else { "重新计算运势" };
            return Self {
                total_members: members.len(),
                average_score: 0.0,
                best_member: None,
                family_lucky_color: "绿色",
                suggestions: vec![hint.to_string()],
                active_members: 0,
            };
        }
        let total: f64 = valid.iter().map(|(_, f)| f.overall_score).sum();
        let average = (total / valid.len() as f64 * 10.0).round_ties_even() / 10.0;
        // First member wins ties.
        let mut best = valid[0];
        for v in &valid[1..] {
            if v.1.overall_score > best.1.overall_score {
                best = *v;
            }
        }

        let mut suggestions = Vec::new();
        if valid.len() == 1 {
            suggestions.push("添加更多家庭成员，获得完整的家庭运势分析".to_string());
        } else {
            suggestions.push("全家人今天适合一起活动，增进感情".to_string());
        }
        let lucky: Vec<&str> = valid
            .iter()
            .filter(|(_, f)| f.overall_score >= 4.0)
            .map(|(m, _)| m.member_name.as_str())
            .collect();
        if !lucky.is_empty() {
            suggestions.push(format!("{}今日运势特别好", lucky.join("、")));
        }
        suggestions.push("每天查看运势，把握最佳时机".to_string());

        Self {
            total_members: members.len(),
            average_score: average,
            best_member: Some(best.0.member_name.clone()),
            family_lucky_color: best.1.lucky_elements.lucky_color,
            suggestions,
            active_members: valid.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchFortune {
    pub date: String,
    pub members_fortune: Vec<MemberFortune>,
    pub family_overview: FamilyOverview,
    pub total_members: usize,
}

/// A member whose chart cannot be read is reported, not dropped.
pub fn batch_fortune(members: &[MemberInput], date: NaiveDate) -> BatchFortune {
    let members_fortune: Vec<MemberFortune> = members
        .iter()
        .map(|m| {
            let member_id = m.id.clone().unwrap_or_else(|| "unknown".to_string());
            let member_name = m.name.clone().unwrap_or_else(|| "未知".to_string());
            match m.bazi_data.day_master() {
                Ok(stem) => MemberFortune {
                    member_id,
                    member_name,
                    fortune: Some(daily_fortune(stem, date, m.age.unwrap_or(DEFAULT_AGE))),
                    has_valid_fortune: true,
                    error: None,
                },
                Err(e) => MemberFortune {
                    member_id,
                    member_name,
                    fortune: None,
                    has_valid_fortune: false,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();
    BatchFortune {
        date: date.format("%Y-%m-%d").to_string(),
        family_overview: FamilyOverview::summarise(&members_fortune),
        total_members: members_fortune.len(),
        members_fortune,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_cycle_starts_at_epoch() {
        assert_eq!(daily_ganzhi(date(1900, 1, 31)).ganzhi, "甲子");
        assert_eq!(daily_ganzhi(date(1900, 2, 1)).ganzhi, "乙丑");
        assert_eq!(daily_ganzhi(date(1900, 1, 30)).ganzhi, "癸亥");
    }

    #[test]
    fn ten_gods_follow_polarity() {
        assert_eq!(TenGod::between(Stem::Bing, Stem::Bing), TenGod::BiJian);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Ding), TenGod::JieCai);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Wu), TenGod::ShiShen);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Ji), TenGod::ShangGuan);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Geng), TenGod::PianCai);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Xin), TenGod::ZhengCai);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Jia), TenGod::PianYin);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Yi), TenGod::ZhengYin);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Ren), TenGod::PianGuan);
        assert_eq!(TenGod::between(Stem::Bing, Stem::Gui), TenGod::ZhengGuan);
    }

    #[test]
    fn relation_strengths_and_harmony() {
        let day = daily_ganzhi(date(1900, 1, 31)); // 甲子: wood stem, water branch
        let w = WuxingRelations::analyse(Stem::Bing, &day);
        assert_eq!(w.stem_relation.kind, Relation::GeneratedBy);
        assert_eq!(w.branch_relation.kind, Relation::ControlledBy);
        assert!((w.overall_relation.harmony_score - 0.65).abs() < 1e-9);
        assert_eq!(w.overall_relation.description, "五行相生，运势良好");
    }

    #[test]
    fn fortune_for_fire_day_master_on_jiazi_day() {
        let f = daily_fortune(Stem::Bing, date(1900, 1, 31), 30);
        assert_eq!(f.solar_term, "大寒");
        assert_eq!(f.ten_gods_analysis.ten_gods_relation, TenGod::PianYin);
        assert_eq!(f.detailed_scores.study, 4.7);
        assert_eq!(f.detailed_scores.health, 4.0);
        assert_eq!(f.detailed_scores.love, 3.6);
        assert_eq!(f.detailed_scores.wealth, 3.0);
        assert_eq!(f.detailed_scores.career, 3.0);
        assert_eq!(f.overall_score, 3.5);
        assert_eq!(f.lucky_elements.beneficial_wuxing, Element::Fire);
        assert_eq!(f.lucky_elements.lucky_direction, "南方");
        assert_eq!(f.suggestions, vec!["宜学习", "宜求助贵人", "宜接受帮助"]);
        assert!(f.warnings.is_empty());
        assert_eq!(
            f.detailed_analysis,
            "今日干支为木水，与您的日干火形成他生我的关系。十神关系为偏印，思维敏捷，但易多疑。五行相生，运势良好"
        );
    }

    #[test]
    fn scores_stay_between_one_and_five() {
        let start = date(2024, 1, 1);
        for offset in 0..366 {
            let d = start + chrono::Duration::days(offset);
            for stem in Stem::ALL {
                for age in [20, 40, 70] {
                    let f = daily_fortune(stem, d, age);
                    assert!((1.0..=5.0).contains(&f.overall_score));
                }
            }
        }
    }

    #[test]
    fn batch_reports_bad_members_and_overview() {
        let members = vec![
            MemberInput {
                id: Some("a".into()),
                name: Some("爸爸".into()),
                bazi_data: PersonalBazi { day_pillar: Some("丙午".into()) },
                age: None,
            },
            MemberInput {
                id: Some("b".into()),
                name: Some("妈妈".into()),
                bazi_data: PersonalBazi::default(),
                age: None,
            },
        ];
        let batch = batch_fortune(&members, date(1900, 1, 31));
        assert_eq!(batch.total_members, 2);
        assert!(batch.members_fortune[0].has_valid_fortune);
        assert!(!batch.members_fortune[1].has_valid_fortune);
        assert_eq!(batch.members_fortune[1].error.as_deref(), Some("八字数据缺少日柱"));
        let o = &batch.family_overview;
        assert_eq!(o.active_members, 1);
        assert_eq!(o.best_member.as_deref(), Some("爸爸"));
        assert_eq!(o.average_score, 3.5);
        assert_eq!(o.family_lucky_color, "红色");
        assert_eq!(o.suggestions[0], "添加更多家庭成员，获得完整的家庭运势分析");
    }

    #[test]
    fn empty_family_overview() {
        let o = FamilyOverview::summarise(&[]);
        assert_eq!(o.total_members, 0);
        assert_eq!(o.suggestions, vec!["添加家庭成员开始使用".to_string()]);
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(parse_date("2025-10-16").unwrap(), date(2025, 10, 16));
        assert_eq!(
            parse_date("16/10/2025").unwrap_err(),
            CalculationError::MalformedDate("16/10/2025".into())
        );
    }
}
