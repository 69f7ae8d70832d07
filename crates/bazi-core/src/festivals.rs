//! Traditional festival list served by the festival tab.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Festival {
    pub name: &'static str,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

const TRADITIONAL: &str = "传统节日";

const FESTIVALS: [(&str, (i32, u32, u32), &str); 5] = [
    ("春节", (2024, 2, 10), "中国最重要的传统节日"),
    ("元宵节", (2024, 2, 24), "正月十五元宵节"),
    ("清明节", (2024, 4, 5), "祭祖扫墓的节日"),
    ("端午节", (2024, 6, 10), "纪念屈原的节日"),
    ("中秋节", (2024, 9, 17), "团圆赏月的节日"),
];

pub fn festivals() -> Vec<Festival> {
    FESTIVALS
        .iter()
        .filter_map(|(name, (y, m, d), description)| {
            NaiveDate::from_ymd_opt(*y, *m, *d).map(|date| Festival {
                name,
                date,
                kind: TRADITIONAL,
                description,
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FestivalList {
    pub current_date: String,
    pub festivals: Vec<Festival>,
    pub total: usize,
}

impl FestivalList {
    pub fn as_of(today: NaiveDate) -> Self {
        let festivals = festivals();
        Self {
            current_date: today.format("%Y-%m-%d").to_string(),
            total: festivals.len(),
            festivals,
        }
    }
}
