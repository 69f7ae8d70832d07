//! 命理文案: static paragraphs selected by day stem, element balance,
//! gender and age. Pure lookup and string formatting.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::chart::Gender;
use crate::ganzhi::{Element, Stem};
use crate::wuxing::ElementHistogram;

/// 日主性格
const PERSONALITY: [&str; 10] = [
    "性格直爽，有领导能力，积极向上，但有时过于固执。适合开创性工作。",
    "性格温和，善于协调，富有同情心，但有时缺乏决断力。适合服务性工作。",
    "性格热情，富有创造力，乐观开朗，但有时过于冲动。适合表现性工作。",
    "性格细腻，重视细节，有艺术天赋，但有时过于敏感。适合精细化工作。",
    "性格稳重，踏实可靠，有包容心，但有时过于保守。适合管理性工作。",
    "性格温和，善于沟通，有亲和力，但有时缺乏主见。适合协调性工作。",
    "性格坚毅，执行力强，有正义感，但有时过于严厉。适合执法性工作。",
    "性格精明，善于变通，有商业头脑，但有时过于计较。适合商业性工作。",
    "性格智慧，适应性强，有远见，但有时过于理想化。适合智力性工作。",
    "性格内敛，善于思考，有洞察力，但有时过于消极。适合研究性工作。",
];

const CAREER: [&str; 10] = [
    "适合创业、管理、林业、教育等行业。",
    "适合艺术、花卉、纺织、中介等行业。",
    "适合能源、电子、娱乐、广告等行业。",
    "适合文化、出版、照明、美容等行业。",
    "适合建筑、房地产、农业、陶瓷等行业。",
    "适合服务、食品、咨询、秘书等行业。",
    "适合金属、机械、汽车、军警等行业。",
    "适合金融、珠宝、医疗、法律等行业。",
    "适合贸易、运输、旅游、水利等行业。",
    "适合研究、化工、医药、信息等行业。",
];

/// Dominant-element suffix, indexed 木火土金水.
const CAREER_SUFFIX: [&str; 5] = [
    " 木旺适合从事教育、环保相关工作。",
    " 火旺适合从事媒体、能源相关工作。",
    " 土旺适合从事房地产、建筑相关工作。",
    " 金旺适合从事金融、科技相关工作。",
    " 水旺适合从事贸易、物流相关工作。",
];

/// Weakest-element health note, indexed 木火土金水.
const HEALTH: [&str; 5] = [
    "木气偏弱，宜注意肝胆与筋骨保养，多到户外舒展身心。",
    "火气偏弱，宜注意心血管与睡眠，保持心情开朗。",
    "土气偏弱，宜注意脾胃消化，饮食规律清淡。",
    "金气偏弱，宜注意呼吸系统与皮肤，适度运动增强体质。",
    "水气偏弱，宜注意肾脏与泌尿系统，多饮水少熬夜。",
];

/// Day-stem element wealth note, indexed 木火土金水.
const WEALTH: [&str; 5] = [
    "财运稳步上升，适合长期投资与积累，忌冒进。",
    "财运起伏较大，机会多但需控制开支，见好就收。",
    "财运平稳厚实，适合置业与稳健理财。",
    "财运来自专业与执行力，正财为主，偏财宜谨慎。",
    "财运灵活多变，善于把握流通中的机会，注意分散风险。",
];

const TODAY_FORTUNE: [&str; 5] = [
    "今日运势一般，宜静不宜动。",
    "今日运势尚可，适合处理日常事务。",
    "今日运势不错，适合推进重要计划。",
    "今日运势很好，适合开展新项目。",
    "今日运势极佳，万事亨通。",
];

pub fn personality(stem: Stem) -> &'static str {
    PERSONALITY[stem.index()]
}

pub fn wuxing_balance(h: &ElementHistogram) -> String {
    if h.spread() > 3 {
        let (max, min) = (h.max_element(), h.min_element());
        format!("五行分布不够均衡，{max}过旺，{min}偏弱。建议在生活中多接触{min}元素相关的事物。")
    } else {
        "五行分布相对均衡，整体运势平稳，各方面发展较为协调。".to_string()
    }
}

pub fn career(stem: Stem, h: &ElementHistogram) -> String {
    format!("{}{}", CAREER[stem.index()], CAREER_SUFFIX[h.max_element().index()])
}

pub fn love(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "感情方面较为主动，容易获得异性青睐。建议在感情中保持真诚，避免过于强势。",
        _ => "感情方面较为细腻，重视精神层面的交流。建议在感情中保持独立，寻找志同道合的伴侣。",
    }
}

pub fn health(h: &ElementHistogram) -> &'static str {
    HEALTH[h.min_element().index()]
}

pub fn wealth(stem: Stem) -> &'static str {
    WEALTH[stem.element().index()]
}

pub fn age_advice(age: i32) -> &'static str {
    if age < 25 {
        "年轻时期是学习和积累的重要阶段，要多接受新事物，建立良好的基础。"
    } else if age < 40 {
        "正值事业发展的黄金期，要抓住机会，勇于承担责任和挑战。"
    } else {
        "人生阅历丰富，要注重传承和分享，同时关注健康和家庭。"
    }
}

pub fn gender_advice(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "作为男性，要在承担责任的同时保持理性思考，在事业上展现担当。",
        Gender::Female => "作为女性，要在追求事业的同时保持内心的柔韧，发挥独特的魅力和智慧。",
        Gender::Unknown => "",
    }
}

fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub personality: String,
    pub wuxing_analysis: String,
    pub career: String,
    pub love: String,
    pub health: String,
    pub wealth: String,
    pub age_advice: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender_advice: String,
    pub summary: String,
}

impl Analysis {
    pub fn compose(stem: Stem, h: &ElementHistogram, gender: Gender, age: i32) -> Self {
        let personality = personality(stem).to_string();
        let wuxing_analysis = wuxing_balance(h);
        let summary = format!(
            "您的日主为{}，{}...{}...",
            stem,
            prefix(&personality, 20),
            prefix(&wuxing_analysis, 20)
        );
        Self {
            career: career(stem, h),
            love: love(gender).to_string(),
            health: health(h).to_string(),
            wealth: wealth(stem).to_string(),
            age_advice: age_advice(age).to_string(),
            gender_advice: gender_advice(gender).to_string(),
            personality,
            wuxing_analysis,
            summary,
        }
    }
}

/// 大运
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dayun {
    pub current_age: i32,
    pub dayun_period: i32,
    pub description: String,
}

impl Dayun {
    pub fn for_age(age: i32) -> Self {
        let period = age.max(0) / 10 + 1;
        Self {
            current_age: age,
            dayun_period: period,
            description: format!("当前处于第{period}个大运期，建议把握机遇，稳步发展。"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayFortune {
    pub score: u32,
    pub description: String,
    pub suggestion: String,
}

impl TodayFortune {
    /// Score 6..=10 from the calendar date alone.
    pub fn for_date(today: NaiveDate) -> Self {
        let score = (today.day() + today.month()) % 5 + 6;
        Self {
            score,
            description: TODAY_FORTUNE[(score - 6) as usize].to_string(),
            suggestion: "保持积极心态，顺应自然规律。".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_chart_gets_balanced_text() {
        let h = ElementHistogram::from_counts([1, 4, 1, 1, 1]);
        assert_eq!(wuxing_balance(&h), "五行分布相对均衡，整体运势平稳，各方面发展较为协调。");
    }

    #[test]
    fn imbalance_names_first_extremes() {
        let h = ElementHistogram::from_counts([0, 5, 1, 1, 1]);
        assert_eq!(
            wuxing_balance(&h),
            "五行分布不够均衡，火过旺，木偏弱。建议在生活中多接触木元素相关的事物。"
        );
    }

    #[test]
    fn career_appends_dominant_suffix() {
        let h = ElementHistogram::from_counts([1, 4, 1, 1, 1]);
        assert_eq!(
            career(Stem::Bing, &h),
            "适合能源、电子、娱乐、广告等行业。 火旺适合从事媒体、能源相关工作。"
        );
    }

    #[test]
    fn summary_truncates_by_characters() {
        let h = ElementHistogram::from_counts([1, 4, 1, 1, 1]);
        let a = Analysis::compose(Stem::Bing, &h, Gender::Male, 35);
        assert_eq!(
            a.summary,
            "您的日主为丙，性格热情，富有创造力，乐观开朗，但有时过...五行分布相对均衡，整体运势平稳，各方面发...",
        );
        assert_eq!(a.age_advice, age_advice(35));
        assert!(a.gender_advice.starts_with("作为男性"));
    }

    #[test]
    fn age_brackets() {
        assert!(age_advice(24).starts_with("年轻时期"));
        assert!(age_advice(25).starts_with("正值"));
        assert!(age_advice(40).starts_with("人生阅历"));
    }

    #[test]
    fn dayun_and_today_fortune() {
        let d = Dayun::for_age(35);
        assert_eq!(d.dayun_period, 4);
        assert_eq!(d.description, "当前处于第4个大运期，建议把握机遇，稳步发展。");
        let t = TodayFortune::for_date(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(t.score, 8);
        assert_eq!(t.description, "今日运势不错，适合推进重要计划。");
    }
}
