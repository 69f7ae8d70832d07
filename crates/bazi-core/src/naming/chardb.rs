//! 字库: stroke counts, element, meaning and style tags per character.
//!
//! A built-in subset is always present. `CharDictionary::load` merges a JSON
//! dictionary (`{"杰": {"stroke": 12, "wuxing": "木", ...}}`) over it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{NamingError, NamingResult};
use crate::ganzhi::Element;

/// Gender a character suits. `Neutral` as a filter accepts everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NameGender {
    Male,
    Female,
    #[default]
    Neutral,
}

impl NameGender {
    pub fn parse(s: &str) -> NamingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(NameGender::Male),
            "female" => Ok(NameGender::Female),
            "neutral" | "unknown" | "" => Ok(NameGender::Neutral),
            other => Err(NamingError::InvalidGenderFilter(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NameGender::Male => "male",
            NameGender::Female => "female",
            NameGender::Neutral => "neutral",
        }
    }

    /// True when a character tagged `self` may be used for `filter`.
    pub fn accepts(self, filter: NameGender) -> bool {
        filter == NameGender::Neutral || self == NameGender::Neutral || self == filter
    }
}

fn default_true() -> bool {
    true
}

fn default_cultural_level() -> String {
    "modern".to_string()
}

fn default_popularity() -> String {
    "medium".to_string()
}

fn default_rarity() -> String {
    "common".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharRecord {
    pub stroke: u32,
    pub wuxing: Element,
    pub meaning: String,
    #[serde(default = "default_true")]
    pub suitable_for_name: bool,
    #[serde(default)]
    pub gender: NameGender,
    #[serde(default = "default_cultural_level")]
    pub cultural_level: String,
    #[serde(default = "default_popularity")]
    pub popularity: String,
    /// Empty means "derive from cultural_level".
    #[serde(default)]
    pub era: String,
    #[serde(default = "default_rarity")]
    pub rarity: String,
}

impl CharRecord {
    fn basic(stroke: u32, wuxing: Element, meaning: &str, suitable: bool, gender: NameGender) -> Self {
        Self {
            stroke,
            wuxing,
            meaning: meaning.to_string(),
            suitable_for_name: suitable,
            gender,
            cultural_level: "classic".to_string(),
            popularity: default_popularity(),
            era: "classical".to_string(),
            rarity: default_rarity(),
        }
    }

    /// Placeholder properties for a character the dictionary lacks.
    pub fn unknown(stroke: u32) -> Self {
        Self {
            stroke,
            wuxing: Element::Earth,
            meaning: "美好寓意".to_string(),
            suitable_for_name: true,
            gender: NameGender::Neutral,
            cultural_level: default_cultural_level(),
            popularity: default_popularity(),
            era: "modern".to_string(),
            rarity: default_rarity(),
        }
    }

    fn normalise(mut self) -> Self {
        if self.era.is_empty() {
            self.era = match self.cultural_level.as_str() {
                "classic" | "traditional" => "classical",
                "ancient" => "ancient",
                "contemporary" => "contemporary",
                _ => "modern",
            }
            .to_string();
        }
        self
    }
}

/// Character plus its record, the shape returned by lookups.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharEntry {
    pub char: char,
    #[serde(flatten)]
    pub record: CharRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DictionaryStats {
    pub total_chars: usize,
    pub by_wuxing: BTreeMap<Element, usize>,
    pub by_gender: BTreeMap<&'static str, usize>,
    pub by_era: BTreeMap<String, usize>,
    pub by_popularity: BTreeMap<String, usize>,
    pub by_cultural_level: BTreeMap<String, usize>,
}

/// Common characters and surnames (simplified stroke counts).
const STROKES: &[(char, u32)] = &[
    ('一', 1), ('二', 2), ('三', 3), ('四', 4), ('五', 5), ('六', 6), ('七', 7), ('八', 8), ('九', 9), ('十', 2),
    ('子', 3), ('丑', 4), ('寅', 11), ('卯', 5), ('辰', 7), ('巳', 3), ('午', 4), ('未', 5), ('申', 5), ('酉', 7),
    ('戌', 6), ('亥', 6), ('甲', 5), ('乙', 1), ('丙', 5), ('丁', 2), ('戊', 5), ('己', 3), ('庚', 8), ('辛', 7),
    ('壬', 4), ('癸', 9),
    ('王', 4), ('李', 7), ('张', 7), ('刘', 6), ('陈', 7), ('杨', 7), ('赵', 9), ('黄', 11), ('周', 8), ('吴', 7),
    ('徐', 10), ('孙', 6), ('胡', 9), ('朱', 6), ('高', 10), ('林', 8), ('何', 7), ('郭', 10), ('马', 3), ('罗', 8),
    ('梁', 11), ('宋', 7), ('郑', 8), ('谢', 12), ('韩', 12), ('唐', 10), ('冯', 5), ('于', 3), ('董', 12), ('萧', 11),
    ('程', 12), ('曹', 11), ('袁', 10), ('邓', 4), ('许', 6), ('傅', 12), ('沈', 7), ('曾', 12), ('彭', 12), ('吕', 6),
    ('苏', 7), ('卢', 5), ('蒋', 12), ('蔡', 14), ('贾', 10), ('魏', 17), ('薛', 16), ('叶', 5), ('余', 7),
    ('潘', 15), ('杜', 7), ('戴', 17), ('夏', 10), ('钟', 9), ('汪', 7), ('田', 5), ('任', 6), ('姜', 9), ('范', 8),
    ('方', 4), ('石', 5), ('姚', 9), ('谭', 14), ('廖', 14), ('邹', 7), ('熊', 14), ('金', 8), ('陆', 7), ('郝', 9),
    ('孔', 4), ('白', 5), ('崔', 11), ('康', 11), ('毛', 4), ('邱', 7), ('秦', 10), ('江', 6), ('史', 5), ('顾', 10),
    ('侯', 9), ('邵', 7), ('孟', 8), ('龙', 5), ('万', 3), ('段', 9), ('雷', 13), ('钱', 10), ('汤', 6), ('尹', 4),
    ('黎', 15), ('易', 8), ('常', 11), ('武', 8), ('乔', 6), ('贺', 9), ('赖', 13), ('龚', 11), ('文', 4), ('欧', 8),
    ('阳', 6), ('司', 5), ('诸', 10), ('葛', 12), ('上', 3), ('官', 8),
    ('明', 8), ('华', 6), ('强', 12), ('军', 6), ('伟', 6), ('国', 8), ('建', 8), ('民', 5), ('安', 6), ('福', 13),
    ('贵', 9), ('富', 12), ('吉', 6), ('祥', 10), ('瑞', 13), ('慧', 15), ('智', 12), ('美', 9), ('丽', 7), ('花', 7),
    ('月', 4), ('星', 9), ('雨', 8), ('雪', 11), ('云', 4), ('山', 3), ('水', 4), ('春', 9), ('秋', 9), ('冬', 5),
    ('东', 5), ('西', 6), ('南', 9), ('北', 5), ('中', 4), ('天', 4), ('地', 6), ('人', 2), ('大', 3), ('小', 3),
    ('日', 4), ('年', 6), ('时', 7), ('分', 4), ('秒', 9), ('好', 6), ('坏', 7), ('新', 13), ('旧', 5), ('长', 4),
    ('短', 4), ('低', 7), ('快', 7), ('慢', 14), ('红', 9), ('绿', 11), ('蓝', 13), ('黑', 12), ('灰', 6),
    ('紫', 11), ('粉', 10), ('棕', 12),
];

const PINYIN: &[(char, &str)] = &[
    ('杰', "jié"), ('强', "qiáng"), ('康', "kāng"), ('凯', "kǎi"), ('林', "lín"), ('森', "sēn"), ('松', "sōng"),
    ('柏', "bǎi"), ('荣', "róng"), ('楠', "nán"), ('柱', "zhù"), ('栋', "dòng"), ('梁', "liáng"), ('楷', "kǎi"),
    ('桂', "guì"), ('枫', "fēng"), ('榕', "róng"), ('槐', "huái"), ('柳', "liǔ"), ('杨', "yáng"), ('彬', "bīn"),
    ('斌', "bīn"), ('权', "quán"), ('桓', "huán"), ('柯', "kē"), ('校', "xiào"), ('桥', "qiáo"), ('梓', "zǐ"),
    ('棋', "qí"), ('棠', "táng"), ('椿', "chūn"), ('芳', "fāng"), ('花', "huā"), ('莉', "lì"), ('蕾', "lěi"),
    ('雅', "yǎ"), ('欣', "xīn"), ('梅', "méi"), ('兰', "lán"), ('菊', "jú"), ('桃', "táo"), ('李', "lǐ"),
    ('杏', "xìng"), ('樱', "yīng"), ('荷', "hé"), ('莲', "lián"), ('蓉', "róng"), ('薇', "wēi"), ('萍', "píng"),
    ('萝', "luó"), ('茜', "qiàn"), ('茉', "mò"), ('茗', "míng"), ('芸', "yún"), ('苑', "yuàn"), ('苗', "miáo"),
    ('若', "ruò"), ('茹', "rú"), ('蒂', "dì"), ('蔚', "wèi"), ('藤', "téng"), ('明', "míng"), ('炜', "wěi"),
    ('煜', "yù"), ('焱', "yàn"), ('烁', "shuò"), ('炎', "yán"), ('亮', "liàng"), ('晖', "huī"), ('辉', "huī"),
    ('阳', "yáng"), ('晨', "chén"), ('昊', "hào"), ('烨', "yè"), ('旭', "xù"), ('曦', "xī"), ('耀', "yào"),
    ('焕', "huàn"), ('灿', "càn"), ('烈', "liè"), ('炳', "bǐng"), ('焰', "yàn"), ('燃', "rán"), ('灯', "dēng"),
    ('炯', "jiǒng"), ('焊', "hàn"), ('烽', "fēng"), ('煌', "huáng"), ('熠', "yì"), ('熙', "xī"), ('腾', "téng"),
    ('晴', "qíng"), ('彤', "tóng"), ('丽', "lì"), ('妮', "nī"), ('娜', "nà"), ('婷', "tíng"), ('媛', "yuán"),
    ('嫣', "yān"), ('瑾', "jǐn"), ('璃', "lí"), ('瑶', "yáo"), ('琪', "qí"), ('珍', "zhēn"), ('珠', "zhū"),
    ('琳', "lín"), ('瑞', "ruì"), ('燕', "yàn"), ('暖', "nuǎn"), ('昕', "xīn"), ('晓', "xiǎo"), ('黎', "lí"),
    ('曙', "shǔ"), ('昱', "yù"), ('晔', "yè"), ('山', "shān"), ('岩', "yán"), ('峰', "fēng"), ('城', "chéng"),
    ('坤', "kūn"), ('培', "péi"), ('垒', "lěi"), ('壮', "zhuàng"), ('田', "tián"), ('宇', "yǔ"), ('地', "dì"),
    ('园', "yuán"), ('圆', "yuán"), ('埃', "āi"), ('堂', "táng"), ('金', "jīn"), ('银', "yín"), ('铁', "tiě"),
    ('钢', "gāng"), ('锋', "fēng"), ('锐', "ruì"), ('钊', "zhāo"), ('钦', "qīn"), ('鑫', "xīn"), ('铭', "míng"),
    ('钰', "yù"), ('铃', "líng"), ('钗', "chāi"), ('镯', "zhuó"), ('锦', "jǐn"), ('江', "jiāng"), ('河', "hé"),
    ('海', "hǎi"), ('湖', "hú"), ('波', "bō"), ('流', "liú"), ('涛', "tāo"), ('泽', "zé"), ('浩', "hào"),
    ('渊', "yuān"), ('溪', "xī"), ('雨', "yǔ"), ('雪', "xuě"), ('露', "lù"), ('霞', "xiá"), ('云', "yún"),
    ('涵', "hán"), ('沁', "qìn"), ('汐', "xī"), ('漪', "yī"), ('木', "mù"), ('竹', "zhú"), ('华', "huá"),
    ('火', "huǒ"), ('土', "tǔ"), ('水', "shuǐ"), ('文', "wén"), ('武', "wǔ"), ('轩', "xuān"), ('博', "bó"),
    ('睿', "ruì"), ('怡', "yí"),
];

pub fn pinyin(c: char) -> Option<&'static str> {
    PINYIN.iter().find(|(k, _)| *k == c).map(|(_, p)| *p)
}

/// Syllable with its tone mark removed, e.g. `xuān` -> `xuan`.
pub fn toneless(syllable: &str) -> String {
    syllable
        .chars()
        .map(|ch| match ch {
            'ā' | 'á' | 'ǎ' | 'à' => 'a',
            'ē' | 'é' | 'ě' | 'è' => 'e',
            'ī' | 'í' | 'ǐ' | 'ì' => 'i',
            'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
            'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
            'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' => 'ü',
            other => other,
        })
        .collect()
}

fn builtin() -> Vec<(char, CharRecord)> {
    use Element::*;
    use NameGender::*;
    let rows: &[(char, u32, Element, &str, bool, NameGender)] = &[
        ('木', 4, Wood, "木材，生长", true, Neutral),
        ('林', 8, Wood, "森林，茂盛", true, Neutral),
        ('森', 12, Wood, "森林，众多", true, Male),
        ('松', 8, Wood, "松树，坚韧", true, Male),
        ('柏', 9, Wood, "柏树，长青", true, Neutral),
        ('桂', 10, Wood, "桂花，芳香", true, Female),
        ('梅', 11, Wood, "梅花，坚强", true, Female),
        ('竹', 6, Wood, "竹子，高洁", true, Neutral),
        ('荣', 14, Wood, "荣耀，兴盛", true, Neutral),
        ('华', 14, Wood, "花朵，华丽", true, Neutral),
        ('火', 4, Fire, "火焰，热情", false, Neutral),
        ('炎', 8, Fire, "炎热，热烈", true, Male),
        ('明', 8, Fire, "明亮，聪明", true, Neutral),
        ('亮', 9, Fire, "明亮，清楚", true, Neutral),
        ('晖', 13, Fire, "阳光，光辉", true, Neutral),
        ('辉', 15, Fire, "光辉，灿烂", true, Neutral),
        ('阳', 12, Fire, "太阳，积极", true, Male),
        ('晨', 11, Fire, "早晨，希望", true, Neutral),
        ('昊', 8, Fire, "天空，广大", true, Male),
        ('烨', 16, Fire, "火光，明亮", true, Neutral),
        ('土', 3, Earth, "土地，厚重", false, Neutral),
        ('山', 3, Earth, "山峰，高大", true, Neutral),
        ('岩', 8, Earth, "岩石，坚固", true, Male),
        ('峰', 10, Earth, "山峰，顶尖", true, Male),
        ('城', 10, Earth, "城池，稳固", true, Neutral),
        ('坤', 8, Earth, "大地，包容", true, Neutral),
        ('培', 11, Earth, "培养，教育", true, Neutral),
        ('垒', 9, Earth, "垒筑，建设", true, Male),
        ('壮', 7, Earth, "壮大，雄伟", true, Male),
        ('田', 5, Earth, "田地，丰收", true, Neutral),
        ('金', 8, Metal, "金属，珍贵", true, Neutral),
        ('银', 14, Metal, "银色，纯洁", true, Neutral),
        ('铁', 13, Metal, "钢铁，坚强", true, Male),
        ('钢', 16, Metal, "钢铁，坚韧", true, Male),
        ('锋', 15, Metal, "锋利，锐利", true, Male),
        ('锐', 15, Metal, "锐利，敏锐", true, Neutral),
        ('钊', 10, Metal, "劝勉，鼓励", true, Male),
        ('钦', 12, Metal, "钦佩，尊敬", true, Neutral),
        ('鑫', 24, Metal, "金多，兴盛", true, Neutral),
        ('铭', 14, Metal, "铭记，纪念", true, Neutral),
        ('水', 4, Water, "水流，生命", false, Neutral),
        ('江', 7, Water, "江河，宽阔", true, Neutral),
        ('河', 9, Water, "河流，流动", true, Neutral),
        ('海', 11, Water, "海洋，宽广", true, Neutral),
        ('湖', 13, Water, "湖泊，宁静", true, Neutral),
        ('波', 9, Water, "波浪，动感", true, Neutral),
        ('流', 11, Water, "流动，顺畅", true, Neutral),
        ('溪', 14, Water, "溪流，清澈", true, Female),
        ('雨', 8, Water, "雨水，滋润", true, Neutral),
        ('雪', 11, Water, "雪花，纯洁", true, Female),
        ('文', 4, Water, "文化，文雅", true, Neutral),
        ('武', 8, Water, "武功，勇敢", true, Male),
        ('宇', 6, Earth, "宇宙，广大", true, Neutral),
        ('轩', 10, Earth, "轩昂，高雅", true, Male),
        ('博', 12, Water, "博学，广博", true, Neutral),
        ('睿', 14, Metal, "睿智，聪慧", true, Neutral),
        ('涵', 12, Water, "涵养，包容", true, Neutral),
        ('雅', 12, Wood, "雅致，优雅", true, Female),
        ('欣', 8, Wood, "欣喜，快乐", true, Female),
        ('怡', 9, Earth, "怡然，和谐", true, Female),
    ];
    rows.iter()
        .map(|&(c, stroke, e, meaning, ok, g)| (c, CharRecord::basic(stroke, e, meaning, ok, g)))
        .collect()
}

/// Ordered character dictionary. Iteration order is insertion order, which
/// keeps candidate lists deterministic.
#[derive(Clone, Debug)]
pub struct CharDictionary {
    entries: Vec<(char, CharRecord)>,
    index: HashMap<char, usize>,
}

impl Default for CharDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CharDictionary {
    pub fn builtin() -> Self {
        let mut dict = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for (c, r) in builtin() {
            dict.insert(c, r);
        }
        dict
    }

    /// Built-in subset merged with the JSON dictionary at `path`.
    pub fn load(path: impl AsRef<Path>) -> NamingResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| NamingError::Dictionary(format!("{}: {}", path.display(), e)))?;
        let mut dict = Self::builtin();
        let added = dict.merge_json(&raw)?;
        info!("[NAMING] loaded {} characters from {}", added, path.display());
        Ok(dict)
    }

    pub fn merge_json(&mut self, raw: &str) -> NamingResult<usize> {
        let parsed: BTreeMap<String, CharRecord> =
            serde_json::from_str(raw).map_err(|e| NamingError::Dictionary(e.to_string()))?;
        let mut added = 0;
        for (key, record) in parsed {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    self.insert(c, record);
                    added += 1;
                }
                _ => return Err(NamingError::Dictionary(format!("key '{key}' is not one character"))),
            }
        }
        Ok(added)
    }

    pub fn insert(&mut self, c: char, record: CharRecord) {
        let record = record.normalise();
        match self.index.get(&c) {
            Some(&i) => self.entries[i].1 = record,
            None => {
                self.index.insert(c, self.entries.len());
                self.entries.push((c, record));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, c: char) -> Option<&CharRecord> {
        self.index.get(&c).map(|&i| &self.entries[i].1)
    }

    pub fn entry(&self, c: char) -> Option<CharEntry> {
        self.get(c).map(|r| CharEntry {
            char: c,
            record: r.clone(),
            pinyin: pinyin(c),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &CharRecord)> {
        self.entries.iter().map(|(c, r)| (*c, r))
    }

    /// Stroke table first, then the dictionary. Unknown is an error.
    pub fn stroke_count(&self, c: char) -> NamingResult<u32> {
        STROKES
            .iter()
            .find(|(k, _)| *k == c)
            .map(|(_, n)| *n)
            .or_else(|| self.get(c).map(|r| r.stroke))
            .ok_or(NamingError::UnknownStroke(c))
    }

    /// Dictionary record, or a neutral placeholder for unlisted characters.
    pub fn properties(&self, c: char) -> CharRecord {
        match self.get(c) {
            Some(r) => r.clone(),
            None => CharRecord::unknown(self.stroke_count(c).unwrap_or(10)),
        }
    }

    /// Name-suitable characters of `element` within `strokes`, for `gender`.
    pub fn chars_by_element(
        &self,
        element: Element,
        strokes: Option<(u32, u32)>,
        gender: NameGender,
    ) -> Vec<CharEntry> {
        self.iter()
            .filter(|(_, r)| r.wuxing == element && r.suitable_for_name && r.gender.accepts(gender))
            .filter(|(_, r)| strokes.map_or(true, |(lo, hi)| (lo..=hi).contains(&r.stroke)))
            .map(|(c, r)| CharEntry {
                char: c,
                record: r.clone(),
                pinyin: pinyin(c),
            })
            .collect()
    }

    pub fn stats(&self) -> DictionaryStats {
        let mut stats = DictionaryStats {
            total_chars: self.len(),
            by_wuxing: Element::ALL.into_iter().map(|e| (e, 0)).collect(),
            by_gender: BTreeMap::new(),
            by_era: BTreeMap::new(),
            by_popularity: BTreeMap::new(),
            by_cultural_level: BTreeMap::new(),
        };
        for (_, r) in self.iter() {
            *stats.by_wuxing.entry(r.wuxing).or_default() += 1;
            *stats.by_gender.entry(r.gender.as_str()).or_default() += 1;
            *stats.by_era.entry(r.era.clone()).or_default() += 1;
            *stats.by_popularity.entry(r.popularity.clone()).or_default() += 1;
            *stats.by_cultural_level.entry(r.cultural_level.clone()).or_default() += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_table_wins_over_dictionary() {
        let d = CharDictionary::builtin();
        // 华 is 14 in the dictionary but 6 in the stroke table.
        assert_eq!(d.stroke_count('华').unwrap(), 6);
        assert_eq!(d.stroke_count('鑫').unwrap(), 24);
        assert_eq!(d.stroke_count('龘'), Err(NamingError::UnknownStroke('龘')));
    }

    #[test]
    fn gender_filter_keeps_neutral_characters() {
        let d = CharDictionary::builtin();
        let female: Vec<char> = d
            .chars_by_element(Element::Wood, Some((3, 20)), NameGender::Female)
            .iter()
            .map(|e| e.char)
            .collect();
        assert!(female.contains(&'梅'));
        assert!(female.contains(&'林'));
        assert!(!female.contains(&'森'));
        let fire = d.chars_by_element(Element::Fire, None, NameGender::Neutral);
        assert!(fire.iter().all(|e| e.char != '火'));
    }

    #[test]
    fn json_merge_overrides_and_derives_era() {
        let mut d = CharDictionary::builtin();
        let before = d.len();
        let added = d
            .merge_json(r#"{"杰": {"stroke": 12, "wuxing": "木", "meaning": "杰出，英才", "gender": "male", "cultural_level": "modern"},
                            "林": {"stroke": 8, "wuxing": "木", "meaning": "森林，茂盛", "gender": "male", "cultural_level": "classic"}}"#)
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(d.len(), before + 1);
        assert_eq!(d.get('林').unwrap().gender, NameGender::Male);
        assert_eq!(d.get('林').unwrap().era, "classical");
        assert_eq!(d.get('杰').unwrap().era, "modern");
        assert_eq!(d.get('杰').unwrap().popularity, "medium");
    }

    #[test]
    fn malformed_dictionary_is_rejected() {
        let mut d = CharDictionary::builtin();
        assert!(matches!(d.merge_json("[1,2]"), Err(NamingError::Dictionary(_))));
        assert!(d
            .merge_json(r#"{"两字": {"stroke": 1, "wuxing": "木", "meaning": "x"}}"#)
            .is_err());
    }

    #[test]
    fn tone_marks_are_stripped() {
        assert_eq!(toneless("míng"), "ming");
        assert_eq!(toneless("xuān"), "xuan");
        assert_eq!(toneless("lǜ"), "lü");
        assert_eq!(toneless("ma"), "ma");
        assert_eq!(pinyin('轩'), Some("xuān"));
    }

    #[test]
    fn stats_cover_every_entry() {
        let d = CharDictionary::builtin();
        let s = d.stats();
        assert_eq!(s.by_wuxing.values().sum::<usize>(), d.len());
        assert_eq!(s.by_gender.values().sum::<usize>(), d.len());
    }
}
