//! Name evaluation and generation.
//!
//! overall = 0.35·wuge + 0.30·element match + 0.20·sancai + 0.10·meaning
//! + 0.05·phonetic, rounded to one decimal. Candidates are ordered by score,
//! then total strokes, then the name itself; there is no random jitter.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::chardb::{pinyin, toneless, CharDictionary, CharEntry, NameGender};
use super::numerology::{LuckLevel, SancaiWuge};
use crate::chart::Chart;
use crate::error::{NamingError, NamingResult};
use crate::ganzhi::Element;
use crate::wuxing::{ElementHistogram, WuxingProfile, PROFILE_ORDER};

pub const DEFAULT_COUNT: usize = 10;
pub const MAX_COUNT: usize = 50;
const STROKE_RANGE: (u32, u32) = (3, 20);
/// Below this many characters a preference filter is dropped.
const MIN_FILTERED_POOL: usize = 4;

const POSITIVE_WORDS: &[&str] = &[
    "美好", "聪明", "智慧", "光明", "光辉", "荣耀", "兴盛", "吉祥", "幸福", "安康", "健康", "优雅",
    "高雅", "杰出", "英才", "坚强", "坚韧", "成功", "胜利", "希望", "纯洁", "珍贵", "包容", "温暖",
    "才华", "品德", "灿烂", "繁荣", "快乐", "和谐",
];

/// Open, resonant finals; a syllable containing one reads as sonorous.
const SONOROUS_FINALS: &[&str] = &["ang", "eng", "ing", "ong", "an", "en", "in", "ao", "ai"];

/// Extra characters a search keyword pulls in.
const KEYWORD_GROUPS: &[(&str, &str)] = &[
    ("智慧", "智慧聪明睿"),
    ("美好", "美好雅佳优"),
    ("成功", "成功达胜凯"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CharWuxing {
    pub char: char,
    pub wuxing: Element,
    pub meaning: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameWuxing {
    pub chars_wuxing: Vec<CharWuxing>,
    pub wuxing_distribution: ElementHistogram,
    pub dominant_wuxing: Element,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub wuge: f64,
    pub wuxing_match: f64,
    pub sancai: f64,
    pub meaning: f64,
    pub phonetic: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NameEvaluation {
    pub full_name: String,
    pub given_name: String,
    pub overall_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub wuxing_analysis: NameWuxing,
    pub sancai_wuge: SancaiWuge,
    pub meaning_explanation: String,
    pub pronunciation: String,
    pub luck_level: LuckLevel,
}

impl NameEvaluation {
    pub fn total_strokes(&self) -> i32 {
        self.sancai_wuge.wuge_analysis.zong.value
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BaziNamingAnalysis {
    pub paipan: serde_json::Value,
    pub wuxing_analysis: WuxingProfile,
}

#[derive(Clone, Debug, Serialize)]
pub struct NamingOutcome {
    pub bazi_analysis: BaziNamingAnalysis,
    pub recommendations: Vec<NameEvaluation>,
    pub analysis_summary: String,
    pub naming_suggestions: String,
    pub requested_count: usize,
    /// Requested minus produced; non-zero when the pool ran dry.
    pub shortfall: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences_relaxed: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct NamingRequest {
    pub surname: String,
    pub gender: NameGender,
    pub name_length: usize,
    pub count: Option<usize>,
    pub session_seed: Option<String>,
}

impl NamingRequest {
    pub fn new(surname: impl Into<String>, gender: NameGender) -> Self {
        Self {
            surname: surname.into(),
            gender,
            name_length: 2,
            count: None,
            session_seed: None,
        }
    }

    fn validate(&self) -> NamingResult<()> {
        if self.surname.trim().is_empty() {
            return Err(NamingError::EmptySurname);
        }
        if !(1..=2).contains(&self.name_length) {
            return Err(NamingError::InvalidNameLength(self.name_length));
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT)
    }
}

/// Optional style filters for personalised generation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub cultural_level: Option<String>,
    #[serde(default)]
    pub popularity: Option<String>,
    #[serde(default, alias = "era_style")]
    pub era: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub selected_chars: Vec<String>,
    #[serde(default)]
    pub meaning_keywords: Vec<String>,
}

impl Preferences {
    fn is_empty(&self) -> bool {
        *self == Preferences::default()
    }

    fn selected(&self) -> Vec<char> {
        let mut out = Vec::new();
        for c in self.selected_chars.iter().flat_map(|s| s.chars()) {
            if !c.is_whitespace() && !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    fn matches(&self, e: &CharEntry) -> bool {
        let r = &e.record;
        let eq = |want: &Option<String>, have: &str| want.as_deref().map_or(true, |w| w == have);
        eq(&self.cultural_level, &r.cultural_level)
            && eq(&self.popularity, &r.popularity)
            && eq(&self.era, &r.era)
            && eq(&self.rarity, &r.rarity)
            && (self.meaning_keywords.is_empty()
                || self.meaning_keywords.iter().any(|k| r.meaning.contains(k.as_str())))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CharacterSearch {
    pub keyword: String,
    pub recommendations: Vec<CharEntry>,
    pub total_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharBrief {
    pub wuxing: Element,
    pub meaning: String,
    pub stroke: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharCombination {
    pub combination: String,
    pub first_char: char,
    pub second_char: char,
    pub score: i32,
    pub first_info: CharBrief,
    pub second_info: CharBrief,
}

pub fn naming_suggestions(profile: &WuxingProfile) -> String {
    let slash = |v: &[Element]| v.iter().map(|e| e.label()).collect::<Vec<_>>().join("/");
    format!(
        "建议选用{}属性的字；避免使用{}属性的字；注重名字的音韵和谐；考虑字的寓意和文化内涵。",
        slash(&profile.xiyongshen),
        slash(&profile.jishen)
    )
}

pub fn wuxing_match_score(profile: &WuxingProfile, name: &NameWuxing) -> f64 {
    let mut score: i32 = 60;
    for c in &name.chars_wuxing {
        if profile.is_favourable(c.wuxing) {
            score += 15;
        } else if profile.is_unfavourable(c.wuxing) {
            score -= 10;
        }
    }
    score.clamp(0, 100) as f64
}

pub fn meaning_score(meanings: &[&str]) -> f64 {
    let text: String = meanings.concat();
    let hits = POSITIVE_WORDS.iter().filter(|w| text.contains(*w)).count() as u32;
    (60 + 8 * hits).min(100) as f64
}

/// 60, +20 per given-name syllable whose pinyin contains a sonorous final.
pub fn phonetic_score(given: &str) -> f64 {
    let hits = given
        .chars()
        .filter_map(pinyin)
        .map(toneless)
        .filter(|syllable| SONOROUS_FINALS.iter().any(|f| syllable.contains(f)))
        .count() as u32;
    (60 + 20 * hits).min(100) as f64
}

/// The 0.4/0.35/0.25 wuge/match/sancai blend, rebalanced to 0.35/0.30/0.20
/// so the two richness terms fit in the remaining 0.15.
pub fn overall_score(b: &ScoreBreakdown) -> f64 {
    let raw = 0.35 * b.wuge + 0.30 * b.wuxing_match + 0.20 * b.sancai + 0.10 * b.meaning
        + 0.05 * b.phonetic;
    ((raw * 10.0).round_ties_even() / 10.0).clamp(0.0, 100.0)
}

fn seed_offset(seed: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let digest = Md5::digest(seed.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(head) % len as u64) as usize
}

fn dominant(h: &ElementHistogram) -> Element {
    let mut best = PROFILE_ORDER[0];
    for e in PROFILE_ORDER {
        if h.get(e) > h.get(best) {
            best = e;
        }
    }
    best
}

pub struct NameEngine {
    dict: CharDictionary,
}

impl NameEngine {
    pub fn new(dict: CharDictionary) -> Self {
        Self { dict }
    }

    pub fn dictionary(&self) -> &CharDictionary {
        &self.dict
    }

    fn strokes(&self, s: &str) -> NamingResult<Vec<u32>> {
        s.chars().map(|c| self.dict.stroke_count(c)).collect()
    }

    pub fn name_wuxing(&self, given: &str) -> NameWuxing {
        let mut dist = ElementHistogram::default();
        let chars_wuxing: Vec<CharWuxing> = given
            .chars()
            .map(|c| {
                let r = self.dict.properties(c);
                dist.add(r.wuxing);
                CharWuxing { char: c, wuxing: r.wuxing, meaning: r.meaning }
            })
            .collect();
        NameWuxing {
            chars_wuxing,
            dominant_wuxing: dominant(&dist),
            wuxing_distribution: dist,
        }
    }

    /// Scores one name against a chart's element profile.
    pub fn evaluate(
        &self,
        surname: &str,
        given: &str,
        profile: &WuxingProfile,
    ) -> NamingResult<NameEvaluation> {
        let surname = surname.trim();
        let given = given.trim();
        if surname.is_empty() {
            return Err(NamingError::EmptySurname);
        }
        let given_len = given.chars().count();
        if !(1..=2).contains(&given_len) {
            return Err(NamingError::InvalidNameLength(given_len));
        }
        let sancai_wuge = SancaiWuge::from_strokes(&self.strokes(surname)?, &self.strokes(given)?);
        let wuxing_analysis = self.name_wuxing(given);
        let meanings: Vec<&str> = wuxing_analysis
            .chars_wuxing
            .iter()
            .map(|c| c.meaning.as_str())
            .collect();
        let breakdown = ScoreBreakdown {
            wuge: sancai_wuge.overall_evaluation.score,
            wuxing_match: wuxing_match_score(profile, &wuxing_analysis),
            sancai: sancai_wuge.sancai_evaluation.luck.score() as f64,
            meaning: meaning_score(&meanings),
            phonetic: phonetic_score(given),
        };
        let overall = overall_score(&breakdown);
        let meaning_explanation = format!(
            "{}。整体寓意美好，富有文化内涵。",
            wuxing_analysis
                .chars_wuxing
                .iter()
                .map(|c| format!("'{}'字{}", c.char, c.meaning))
                .collect::<Vec<_>>()
                .join("，")
        );
        let pronunciation = given
            .chars()
            .map(|c| pinyin(c).map(str::to_string).unwrap_or_else(|| c.to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(NameEvaluation {
            full_name: format!("{surname}{given}"),
            given_name: given.to_string(),
            overall_score: overall,
            score_breakdown: breakdown,
            wuxing_analysis,
            sancai_wuge,
            meaning_explanation,
            pronunciation,
            luck_level: LuckLevel::from_score(overall),
        })
    }

    /// Favourable-element characters for `gender`, deduplicated, in
    /// dictionary order.
    fn favourable_pool(&self, profile: &WuxingProfile, gender: NameGender) -> Vec<CharEntry> {
        let mut pool: Vec<CharEntry> = Vec::new();
        for e in &profile.xiyongshen {
            for entry in self.dict.chars_by_element(*e, Some(STROKE_RANGE), gender) {
                if !pool.iter().any(|p| p.char == entry.char) {
                    pool.push(entry);
                }
            }
        }
        pool
    }

    fn candidates(chars: &[char], name_length: usize, limit: usize, must_have: &[char]) -> Vec<String> {
        let keep = |name: &str| must_have.is_empty() || name.chars().any(|c| must_have.contains(&c));
        let mut out = Vec::new();
        if name_length == 1 {
            for c in chars {
                let name = c.to_string();
                if keep(&name) {
                    out.push(name);
                }
                if out.len() >= limit {
                    break;
                }
            }
            return out;
        }
        'outer: for (i, a) in chars.iter().enumerate() {
            for b in &chars[i..] {
                if a == b {
                    continue;
                }
                let name: String = [*a, *b].iter().collect();
                if keep(&name) {
                    out.push(name);
                }
                if out.len() >= limit {
                    break 'outer;
                }
            }
        }
        out
    }

    fn rank(
        &self,
        req: &NamingRequest,
        profile: &WuxingProfile,
        chars: &[char],
        must_have: &[char],
    ) -> NamingResult<Vec<NameEvaluation>> {
        let count = req.count();
        let mut ordered = chars.to_vec();
        if let Some(seed) = &req.session_seed {
            let off = seed_offset(seed, ordered.len());
            ordered.rotate_left(off);
            debug!("[NAMING] session seed rotates pool by {}", off);
        }
        let names = Self::candidates(&ordered, req.name_length, count * 3, must_have);
        let mut evaluated = names
            .iter()
            .map(|given| self.evaluate(&req.surname, given, profile))
            .collect::<NamingResult<Vec<_>>>()?;
        evaluated.sort_by(|a, b| {
            b.overall_score
                .total_cmp(&a.overall_score)
                .then(a.total_strokes().cmp(&b.total_strokes()))
                .then_with(|| a.given_name.cmp(&b.given_name))
        });
        evaluated.truncate(count);
        Ok(evaluated)
    }

    fn outcome(
        &self,
        req: &NamingRequest,
        chart: &Chart,
        profile: WuxingProfile,
        recommendations: Vec<NameEvaluation>,
        preferences_relaxed: Option<bool>,
    ) -> NamingOutcome {
        let requested = req.count();
        info!(
            "[NAMING] {} produced {}/{} names",
            req.surname,
            recommendations.len(),
            requested
        );
        NamingOutcome {
            analysis_summary: profile.analysis_summary.clone(),
            naming_suggestions: naming_suggestions(&profile),
            bazi_analysis: BaziNamingAnalysis {
                paipan: chart.paipan(),
                wuxing_analysis: profile,
            },
            shortfall: requested.saturating_sub(recommendations.len()),
            requested_count: requested,
            recommendations,
            preferences_relaxed,
        }
    }

    pub fn generate(&self, req: &NamingRequest, chart: &Chart) -> NamingResult<NamingOutcome> {
        req.validate()?;
        let profile = WuxingProfile::from_chart(chart);
        let chars: Vec<char> = self
            .favourable_pool(&profile, req.gender)
            .iter()
            .map(|e| e.char)
            .collect();
        let recs = self.rank(req, &profile, &chars, &[])?;
        Ok(self.outcome(req, chart, profile, recs, None))
    }

    /// Like [`generate`](Self::generate) with style filters. Filters that
    /// leave fewer than four characters are dropped and reported.
    pub fn generate_personalized(
        &self,
        req: &NamingRequest,
        chart: &Chart,
        prefs: &Preferences,
    ) -> NamingResult<NamingOutcome> {
        req.validate()?;
        let profile = WuxingProfile::from_chart(chart);
        let base = self.favourable_pool(&profile, req.gender);
        let filtered: Vec<char> = base.iter().filter(|e| prefs.matches(e)).map(|e| e.char).collect();
        let relaxed = !prefs.is_empty() && filtered.len() < MIN_FILTERED_POOL;
        let mut chars = if relaxed {
            base.iter().map(|e| e.char).collect()
        } else {
            filtered
        };
        let selected = prefs.selected();
        for c in selected.iter().rev() {
            if let Some(pos) = chars.iter().position(|x| x == c) {
                chars.remove(pos);
            }
            chars.insert(0, *c);
        }
        if relaxed {
            info!("[NAMING] preferences relaxed for {}", req.surname);
        }
        let recs = self.rank(req, &profile, &chars, &selected)?;
        Ok(self.outcome(req, chart, profile, recs, Some(relaxed)))
    }

    /// Characters whose meaning contains `keyword`, or that the keyword's
    /// group lists.
    pub fn search(
        &self,
        keyword: &str,
        element: Option<Element>,
        gender: NameGender,
        count: Option<usize>,
    ) -> CharacterSearch {
        let keyword = keyword.trim();
        let group: String = KEYWORD_GROUPS
            .iter()
            .filter(|(name, _)| !keyword.is_empty() && name.contains(keyword))
            .map(|(_, chars)| *chars)
            .collect();
        let limit = count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT);
        let recommendations: Vec<CharEntry> = self
            .dict
            .iter()
            .filter(|(c, r)| {
                !keyword.is_empty()
                    && (r.meaning.contains(keyword) || keyword.contains(*c) || group.contains(*c))
            })
            .filter(|(_, r)| r.suitable_for_name && r.gender.accepts(gender))
            .filter(|(_, r)| element.map_or(true, |e| r.wuxing == e))
            .filter_map(|(c, _)| self.dict.entry(c))
            .take(limit)
            .collect();
        CharacterSearch {
            keyword: keyword.to_string(),
            total_count: recommendations.len(),
            recommendations,
        }
    }

    /// Pairs the first five characters of the first two elements.
    pub fn combinations(
        &self,
        elements: &[Element],
        gender: NameGender,
        count: Option<usize>,
    ) -> NamingResult<Vec<CharCombination>> {
        if elements.len() < 2 {
            return Err(NamingError::TooFewElements(elements.len()));
        }
        let limit = count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT);
        let first = self.dict.chars_by_element(elements[0], Some(STROKE_RANGE), gender);
        let second = self.dict.chars_by_element(elements[1], Some(STROKE_RANGE), gender);
        let brief = |e: &CharEntry| CharBrief {
            wuxing: e.record.wuxing,
            meaning: e.record.meaning.clone(),
            stroke: e.record.stroke,
        };
        let mut out = Vec::new();
        for (i, a) in first.iter().take(5).enumerate() {
            for (j, b) in second.iter().take(5).enumerate() {
                if out.len() >= limit {
                    return Ok(out);
                }
                if a.char == b.char {
                    continue;
                }
                out.push(CharCombination {
                    combination: format!("{}{}", a.char, b.char),
                    first_char: a.char,
                    second_char: b.char,
                    score: 85 - (i + j) as i32,
                    first_info: brief(a),
                    second_info: brief(b),
                });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SolarDate;
    use crate::chart::calculate_chart;

    fn chart() -> Chart {
        calculate_chart(SolarDate::new(1990, 5, 15), 14).unwrap()
    }

    fn engine() -> NameEngine {
        NameEngine::new(CharDictionary::builtin())
    }

    #[test]
    fn richness_scores_count_list_matches() {
        assert_eq!(phonetic_score("明轩"), 100.0);
        assert_eq!(phonetic_score("明李"), 80.0);
        assert_eq!(phonetic_score("李菊"), 60.0);
        assert_eq!(phonetic_score("龘"), 60.0);
        assert_eq!(meaning_score(&["明亮，聪明", "轩昂，高雅"]), 76.0);
        assert_eq!(meaning_score(&["菊花"]), 60.0);
    }

    #[test]
    fn evaluation_reports_every_component() {
        let profile = WuxingProfile::from_chart(&chart());
        let ev = engine().evaluate("王", "明轩", &profile).unwrap();
        assert_eq!(ev.full_name, "王明轩");
        assert_eq!(ev.pronunciation, "míng xuān");
        assert_eq!(ev.sancai_wuge.overall_evaluation.score, 77.0);
        // 明 is 火 and counts as favourable; 轩 is 土 and counts as neither.
        assert_eq!(ev.score_breakdown.wuxing_match, 75.0);
        assert_eq!(ev.score_breakdown.phonetic, 100.0);
        assert!((0.0..=100.0).contains(&ev.overall_score));
        assert_eq!(
            ev.meaning_explanation,
            "'明'字明亮，聪明，'轩'字轩昂，高雅。整体寓意美好，富有文化内涵。"
        );
    }

    #[test]
    fn unknown_surname_stroke_is_an_error() {
        let profile = WuxingProfile::from_chart(&chart());
        let err = engine().evaluate("龘", "明", &profile).unwrap_err();
        assert_eq!(err, NamingError::UnknownStroke('龘'));
        assert_eq!(
            engine().evaluate("王", "明轩宇", &profile).unwrap_err(),
            NamingError::InvalidNameLength(3)
        );
    }

    #[test]
    fn generation_is_sorted_and_deterministic() {
        let mut req = NamingRequest::new("李", NameGender::Male);
        req.count = Some(5);
        let a = engine().generate(&req, &chart()).unwrap();
        let b = engine().generate(&req, &chart()).unwrap();
        let names = |o: &NamingOutcome| o.recommendations.iter().map(|r| r.full_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.recommendations.len(), 5);
        assert_eq!(a.shortfall, 0);
        for w in a.recommendations.windows(2) {
            assert!(w[0].overall_score >= w[1].overall_score);
        }
        for r in &a.recommendations {
            let chars: Vec<char> = r.given_name.chars().collect();
            assert_ne!(chars[0], chars[1]);
        }
    }

    #[test]
    fn scores_stay_in_range_for_any_seed() {
        for seed in ["", "a", "session-42", "用户"] {
            let mut req = NamingRequest::new("张", NameGender::Female);
            req.session_seed = Some(seed.to_string());
            req.count = Some(50);
            let out = engine().generate(&req, &chart()).unwrap();
            assert!(out.recommendations.iter().all(|r| (0.0..=100.0).contains(&r.overall_score)));
            assert_eq!(out.requested_count, 50);
            assert_eq!(out.shortfall, 50 - out.recommendations.len());
        }
    }

    #[test]
    fn personalised_filters_relax_when_too_narrow() {
        let prefs = Preferences {
            meaning_keywords: vec!["不存在的词".into()],
            ..Default::default()
        };
        let out = engine()
            .generate_personalized(&NamingRequest::new("王", NameGender::Male), &chart(), &prefs)
            .unwrap();
        assert_eq!(out.preferences_relaxed, Some(true));
        assert!(!out.recommendations.is_empty());
    }

    #[test]
    fn selected_characters_appear_in_every_name() {
        let prefs = Preferences {
            selected_chars: vec!["晨".into()],
            ..Default::default()
        };
        let out = engine()
            .generate_personalized(&NamingRequest::new("王", NameGender::Neutral), &chart(), &prefs)
            .unwrap();
        assert!(!out.recommendations.is_empty());
        assert!(out.recommendations.iter().all(|r| r.given_name.contains('晨')));
    }

    #[test]
    fn era_style_alias_deserialises() {
        let p: Preferences = serde_json::from_str(r#"{"era_style": "modern"}"#).unwrap();
        assert_eq!(p.era.as_deref(), Some("modern"));
    }

    #[test]
    fn search_and_combinations() {
        let e = engine();
        let found = e.search("明亮", None, NameGender::Neutral, None);
        assert!(found.recommendations.iter().any(|c| c.char == '明'));
        assert_eq!(found.total_count, found.recommendations.len());
        let combos = e
            .combinations(&[Element::Wood, Element::Fire], NameGender::Neutral, Some(3))
            .unwrap();
        assert_eq!(combos.len(), 3);
        assert_eq!(combos[0].score, 85);
        assert_eq!(combos[1].score, 84);
        assert!(matches!(
            e.combinations(&[Element::Wood], NameGender::Neutral, None),
            Err(NamingError::TooFewElements(1))
        ));
    }

    #[test]
    fn suggestion_text() {
        let profile = WuxingProfile::from_chart(&chart());
        assert_eq!(
            naming_suggestions(&profile),
            "建议选用木/火属性的字；避免使用火属性的字；注重名字的音韵和谐；考虑字的寓意和文化内涵。"
        );
    }
}
