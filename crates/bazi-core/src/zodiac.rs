//! 生肖配对: five static 12×12 score tables, a weighted overall score and
//! the text that goes with it.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ZodiacError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

use Zodiac::*;

impl Zodiac {
    pub const ALL: [Zodiac; 12] = [
        Rat, Ox, Tiger, Rabbit, Dragon, Snake, Horse, Goat, Monkey, Rooster, Dog, Pig,
    ];
    const LABELS: [&'static str; 12] = [
        "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    pub fn from_label(s: &str) -> Result<Self, ZodiacError> {
        let s = s.trim();
        Self::LABELS
            .iter()
            .position(|l| *l == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| ZodiacError::UnknownAnimal(s.to_string()))
    }

    /// Animal of a year; 1900 is a 鼠 year.
    pub fn for_year(year: i32) -> Self {
        Self::ALL[(year - 1900).rem_euclid(12) as usize]
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Zodiac {
    type Err = ZodiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Serialize for Zodiac {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 感情匹配度, row = first animal.
const EMOTION: [[u8; 12]; 12] = [
    [70, 95, 70, 65, 90, 72, 45, 50, 88, 60, 68, 75], // 鼠
    [95, 72, 65, 70, 75, 92, 48, 40, 68, 90, 55, 85], // 牛
    [70, 65, 68, 72, 58, 45, 89, 75, 42, 68, 87, 94], // 虎
    [65, 70, 72, 70, 47, 75, 68, 88, 70, 43, 93, 86], // 兔
    [90, 75, 58, 47, 75, 80, 72, 55, 85, 96, 40, 70], // 龙
    [72, 92, 45, 75, 80, 72, 60, 68, 94, 88, 65, 41], // 蛇
    [45, 48, 89, 68, 72, 60, 70, 95, 70, 65, 86, 75], // 马
    [50, 40, 75, 88, 55, 68, 95, 68, 70, 65, 72, 85], // 羊
    [88, 68, 42, 70, 85, 94, 70, 70, 72, 72, 75, 46], // 猴
    [60, 90, 68, 43, 96, 88, 65, 65, 72, 70, 44, 70], // 鸡
    [68, 55, 87, 93, 40, 65, 86, 72, 75, 44, 72, 80], // 狗
    [75, 85, 94, 86, 70, 41, 75, 85, 46, 70, 80, 75], // 猪
];

/// 生活习惯, row = first animal.
const LIFESTYLE: [[u8; 12]; 12] = [
    [75, 85, 70, 68, 88, 75, 58, 65, 92, 72, 72, 78], // 鼠
    [85, 80, 65, 75, 78, 90, 55, 52, 70, 88, 68, 82], // 牛
    [70, 65, 70, 75, 65, 58, 85, 78, 55, 68, 82, 88], // 虎
    [68, 75, 75, 75, 58, 78, 70, 84, 72, 54, 86, 81], // 兔
    [88, 78, 65, 58, 78, 82, 75, 65, 80, 90, 48, 72], // 龙
    [75, 90, 58, 78, 82, 78, 68, 70, 87, 85, 68, 52], // 蛇
    [58, 55, 85, 70, 75, 68, 75, 89, 72, 68, 80, 78], // 马
    [65, 52, 78, 84, 65, 70, 89, 75, 72, 68, 75, 81], // 羊
    [92, 70, 55, 72, 80, 87, 72, 72, 78, 75, 78, 58], // 猴
    [72, 88, 68, 54, 90, 85, 68, 68, 75, 75, 56, 72], // 鸡
    [72, 68, 82, 86, 48, 68, 80, 75, 78, 56, 78, 85], // 狗
    [78, 82, 88, 81, 72, 52, 78, 81, 58, 72, 85, 80], // 猪
];

/// 事业协调度; same-animal pairs score 70.
const CAREER: [[u8; 12]; 12] = [
    [70, 92, 75, 68, 88, 72, 55, 62, 85, 70, 75, 80], // 鼠
    [92, 70, 68, 72, 78, 90, 58, 50, 70, 88, 65, 82], // 牛
    [75, 68, 70, 70, 65, 55, 86, 72, 48, 62, 85, 90], // 虎
    [68, 72, 70, 70, 58, 72, 68, 85, 65, 52, 88, 86], // 兔
    [88, 78, 65, 58, 70, 78, 70, 62, 82, 95, 45, 72], // 龙
    [72, 90, 55, 72, 78, 70, 65, 68, 92, 86, 60, 48], // 蛇
    [55, 58, 86, 68, 70, 65, 70, 90, 72, 68, 83, 75], // 马
    [62, 50, 72, 85, 62, 68, 90, 70, 68, 65, 70, 84], // 羊
    [85, 70, 48, 65, 82, 92, 72, 68, 70, 75, 72, 58], // 猴
    [70, 88, 62, 52, 95, 86, 68, 65, 75, 70, 52, 68], // 鸡
    [75, 65, 85, 88, 45, 60, 83, 70, 72, 52, 70, 82], // 狗
    [80, 82, 90, 86, 72, 48, 75, 84, 58, 68, 82, 70], // 猪
];

/// 沟通默契度; same-animal pairs score 70.
const COMMUNICATION: [[u8; 12]; 12] = [
    [70, 88, 72, 68, 85, 75, 58, 65, 90, 70, 75, 78], // 鼠
    [88, 70, 65, 75, 78, 88, 55, 52, 72, 85, 68, 80], // 牛
    [72, 65, 70, 72, 68, 58, 83, 75, 52, 65, 82, 86], // 虎
    [68, 75, 72, 70, 62, 75, 70, 82, 68, 55, 85, 83], // 兔
    [85, 78, 68, 62, 70, 80, 72, 65, 78, 92, 48, 70], // 龙
    [75, 88, 58, 75, 80, 70, 68, 70, 88, 83, 62, 52], // 蛇
    [58, 55, 83, 70, 72, 68, 70, 86, 70, 65, 80, 72], // 马
    [65, 52, 75, 82, 65, 70, 86, 70, 70, 68, 72, 81], // 羊
    [90, 72, 52, 68, 78, 88, 70, 70, 70, 78, 75, 62], // 猴
    [70, 85, 65, 55, 92, 83, 65, 68, 78, 70, 55, 70], // 鸡
    [75, 68, 82, 85, 48, 62, 80, 72, 75, 55, 70, 79], // 狗
    [78, 80, 86, 83, 70, 52, 72, 81, 62, 70, 79, 70], // 猪
];

/// active, smart, social, stable on a 1-10 scale.
const TRAITS: [[u8; 4]; 12] = [
    [9, 9, 8, 6],
    [5, 7, 6, 9],
    [9, 8, 8, 5],
    [6, 8, 7, 8],
    [8, 9, 9, 6],
    [6, 9, 6, 8],
    [9, 7, 9, 5],
    [6, 7, 7, 8],
    [8, 9, 9, 6],
    [7, 8, 7, 8],
    [7, 7, 8, 9],
    [6, 6, 8, 8],
];

/// Trait difference that scores highest: moderate complement.
const OPTIMAL_TRAIT_DIFF: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Anecdote {
    pub name: Cow<'static, str>,
    pub story: Cow<'static, str>,
    pub traits: Cow<'static, str>,
}

const fn anecdote(name: &'static str, story: &'static str, traits: &'static str) -> Anecdote {
    Anecdote {
        name: Cow::Borrowed(name),
        story: Cow::Borrowed(story),
        traits: Cow::Borrowed(traits),
    }
}

/// Famous couples, keyed by unordered pair.
const ANECDOTES: &[(Zodiac, Zodiac, &[Anecdote])] = &[
    (Rat, Ox, &[anecdote("钱学森 & 蒋英", "科学家与音乐家的完美结合，理性与感性的平衡", "互补合作，成就彼此"), anecdote("梁思成 & 林徽因", "建筑学家夫妇，学术与生活的双重伴侣", "志同道合，相互成就")]),
    (Rat, Tiger, &[anecdote("鲁迅 & 许广平", "文学巨匠与忠实伴侣，师生情缘成就一段佳话", "志同道合，文学情缘")]),
    (Rat, Rabbit, &[anecdote("胡适 & 江冬秀", "学者与贤妻的传统与现代结合", "相互包容，传统美德")]),
    (Rat, Dragon, &[anecdote("茅盾 & 孔德沚", "文学家的美满姻缘，才女配才子", "文学理想，生活和谐")]),
    (Rat, Snake, &[anecdote("费孝通 & 王同惠", "社会学家的学者爱情，共同的学术追求", "学术伴侣，理想相同")]),
    (Rat, Horse, &[anecdote("冰心 & 吴文藻", "文学家与社会学家的跨界爱情", "才华互补，温馨家庭")]),
    (Rat, Goat, &[anecdote("叶圣陶 & 胡墨林", "教育家的温馨家庭，文学与生活的完美结合", "温馨恬淡，相敬如宾")]),
    (Rat, Monkey, &[anecdote("齐白石 & 胡宝珠", "大画家与年轻妻子的忘年恋，艺术与青春的碰撞", "艺术浪漫，忘年之恋")]),
    (Rat, Rooster, &[anecdote("翦伯赞 & 戴淑婉", "历史学家夫妇，共同的史学理想", "学术情深，志同道合")]),
    (Rat, Dog, &[anecdote("沈从文 & 张兆和", "文学大师的浪漫追求，三姐张兆和的爱情传奇", "浪漫文学，细水长流")]),
    (Rat, Pig, &[anecdote("曹禺 & 方瑞", "戏剧大师的第二次婚姻，艺术与生活的重新开始", "戏剧人生，重新开始")]),
    (Ox, Tiger, &[anecdote("侯德榜 & 张清如", "化学家与贤内助，科学与家庭的平衡", "科学严谨，家庭和睦")]),
    (Ox, Rabbit, &[anecdote("竺可桢 & 陈汲", "地理学家与医生夫妇，科学与医学的结合", "科学理性，相互理解")]),
    (Ox, Dragon, &[anecdote("马寅初 & 张桂君", "经济学家的学者家庭，学术与品格的典范", "学者风范，品格高尚")]),
    (Ox, Snake, &[anecdote("丰子恺 & 卢璋", "画家的温馨家庭，艺术与生活的完美融合", "艺术与生活，温馨恬淡")]),
    (Ox, Horse, &[anecdote("李四光 & 许淑彬", "地质学家与音乐家，科学与艺术的完美结合", "科学艺术，互补和谐")]),
    (Ox, Goat, &[anecdote("梁启超 & 李蕙仙", "思想家与贤妻的传统家庭，学者与家庭的平衡", "传统美德，相敬如宾")]),
    (Ox, Monkey, &[anecdote("严复 & 王氏", "翻译家的传统家庭，西学与中学的融合", "学贯中西，家庭和睦")]),
    (Ox, Rooster, &[anecdote("顾维钧 & 黄蕙兰", "外交家与名媛的上海滩传奇", "外交风采，社交名流")]),
    (Ox, Dog, &[anecdote("陈嘉庚 & 张宝果", "实业家与贤妻的创业传奇", "实业报国，贤内助力")]),
    (Ox, Pig, &[anecdote("华罗庚 & 吴筱元", "数学家与贤内助的典范，专注学术与持家", "勤勉踏实，相互支撑"), anecdote("季羡林 & 彭德华", "国学大师的温馨家庭，学者的朴实生活", "学者风范，家庭和睦")]),
    (Tiger, Rabbit, &[anecdote("陈独秀 & 高大众", "革命家与贤妻的革命岁月", "革命理想，患难与共")]),
    (Tiger, Dragon, &[anecdote("蔡元培 & 黄仲玉", "教育家与夫人的学者家庭", "教育理想，学者风范")]),
    (Tiger, Snake, &[anecdote("徐悲鸿 & 廖静文", "画家与学生的师生恋，艺术与青春的碰撞", "艺术浪漫，师生情深")]),
    (Tiger, Horse, &[anecdote("聂耳 & 袁春晖", "音乐家的短暂而美好的爱情", "音乐浪漫，青春年华")]),
    (Tiger, Goat, &[anecdote("傅雷 & 朱梅馥", "翻译家夫妇的文学家庭，艺术与生活的完美结合", "文学艺术，相濡以沫")]),
    (Tiger, Monkey, &[anecdote("闻一多 & 高孝贞", "诗人学者的传统与现代结合", "诗人气质，传统美德")]),
    (Tiger, Rooster, &[anecdote("刘白羽 & 汪翠云", "作家与编辑的文学伴侣", "文学情缘，编辑伴侣")]),
    (Tiger, Dog, &[anecdote("田汉 & 安娥", "戏剧家与词作家的艺术伴侣", "戏剧人生，艺术伴侣")]),
    (Tiger, Pig, &[anecdote("周恩来 & 邓颖超", "革命伴侣，风雨同舟数十载", "忠诚坚定，患难与共"), anecdote("朱德 & 康克清", "将军与战士的革命情缘", "志向一致，共同奋斗")]),
    (Rabbit, Dragon, &[anecdote("巴金 & 萧珊", "文学大师的温暖家庭，萧珊的默默支持成就了巴金", "文学理想，温馨生活")]),
    (Rabbit, Snake, &[anecdote("老舍 & 胡絜青", "作家与画家的艺术人生，文学与绘画的完美结合", "艺术共鸣，相得益彰")]),
    (Rabbit, Horse, &[anecdote("朱自清 & 陈竹隐", "散文家的第二段婚姻，文学与家庭的重新开始", "文学温馨，重新开始")]),
    (Rabbit, Goat, &[anecdote("郁达夫 & 王映霞", "作家与美女的浪漫爱情，杭州西湖边的文学传奇", "文学浪漫，西湖情缘")]),
    (Rabbit, Monkey, &[anecdote("夏衍 & 陈波儿", "剧作家与演员的戏剧人生", "戏剧情缘，艺术伴侣")]),
    (Rabbit, Rooster, &[anecdote("贺敬之 & 柯岩", "诗人夫妇的文学传奇，共同的诗歌理想", "诗歌情缘，文学伴侣")]),
    (Rabbit, Dog, &[anecdote("钱钟书 & 杨绛", "文学伉俪，才华横溢的学者夫妇", "才华相配，琴瑟和鸣")]),
    (Rabbit, Pig, &[anecdote("萧红 & 萧军", "东北作家夫妇的文学传奇，才华横溢的文学伴侣", "文学才华，东北风情")]),
    (Dragon, Snake, &[anecdote("郭沫若 & 于立群", "文学家与戏剧家的文化姻缘", "文化共鸣，创作伴侣")]),
    (Dragon, Horse, &[anecdote("矛盾 & 孔德沚", "现实主义作家的文学家庭", "现实主义，文学理想")]),
    (Dragon, Goat, &[anecdote("吴晗 & 袁震", "历史学家的学者家庭", "史学研究，学者风范")]),
    (Dragon, Monkey, &[anecdote("叶挺 & 李秀文", "军事家与贤妻的革命岁月", "革命军人，贤内助力")]),
    (Dragon, Rooster, &[anecdote("巴金 & 萧珊", "文学大师的温暖家庭", "文学理想，温馨生活")]),
    (Dragon, Dog, &[anecdote("陶行知 & 吴树琴", "教育家的教育理想家庭", "教育理想，平民情怀")]),
    (Dragon, Pig, &[anecdote("李宗仁 & 郭德洁", "将军与夫人的传奇人生", "将军风范，夫人贤德")]),
    (Snake, Horse, &[anecdote("钱三强 & 何泽慧", "物理学家夫妇，科学与爱情的完美结合", "科学伴侣，核物理")]),
    (Snake, Goat, &[anecdote("丁玲 & 胡也频", "女作家的革命爱情，文学与革命的结合", "革命文学，女性先锋")]),
    (Snake, Monkey, &[anecdote("张爱玲 & 胡兰成", "才女与才子的传奇爱情", "才华横溢，惺惺相惜")]),
    (Snake, Rooster, &[anecdote("艾青 & 高瑛", "诗人的诗意人生", "诗歌理想，艺术人生")]),
    (Snake, Dog, &[anecdote("冯友兰 & 任载坤", "哲学家的理性家庭", "哲学理性，学者家庭")]),
    (Snake, Pig, &[anecdote("赵丹 & 黄宗英", "演员夫妇的艺术人生", "表演艺术，银幕情缘")]),
    (Horse, Goat, &[anecdote("徐志摩 & 陆小曼", "诗人与才女的浪漫传说", "浪漫情怀，艺术追求")]),
    (Horse, Monkey, &[anecdote("启功 & 章宝琛", "书法家的传统文化家庭", "书法艺术，传统文化")]),
    (Horse, Rooster, &[anecdote("萧乾 & 文洁若", "作家与翻译家的文学伴侣", "文学翻译，国际视野")]),
    (Horse, Dog, &[anecdote("程砚秋 & 果素瑛", "京剧大师的梨园传奇", "京剧艺术，梨园情缘")]),
    (Horse, Pig, &[anecdote("黄永玉 & 张梅溪", "画家的艺术人生", "绘画艺术，湘西风情")]),
    (Goat, Monkey, &[anecdote("臧克家 & 郑笃恪", "诗人的诗意生活", "诗歌人生，乡土情怀")]),
    (Goat, Rooster, &[anecdote("曹聚仁 & 邓珂云", "作家的文学家庭", "文学创作，港台情缘")]),
    (Goat, Dog, &[anecdote("梅兰芳 & 福芝芳", "京剧大师的梨园佳话", "京剧艺术，大师风范")]),
    (Goat, Pig, &[anecdote("于右任 & 高仲林", "书法家的传统家庭", "书法艺术，传统风范")]),
    (Monkey, Rooster, &[anecdote("侯宝林 & 王雅兰", "相声大师的艺术家庭", "相声艺术，幽默人生")]),
    (Monkey, Dog, &[anecdote("马三立 & 于秀珍", "相声艺术家的传统家庭", "相声传统，津门风情")]),
    (Monkey, Pig, &[anecdote("华君武 & 张琏", "漫画家的幽默人生", "漫画艺术，幽默智慧")]),
    (Rooster, Dog, &[anecdote("常香玉 & 陈宪章", "豫剧大师的戏曲人生", "豫剧艺术，戏曲传承")]),
    (Rooster, Pig, &[anecdote("马连良 & 夏淑琴", "京剧大师的梨园传奇", "京剧大师，梨园世家")]),
    (Dog, Pig, &[anecdote("罗家伦 & 张维桢", "教育家的学者家庭", "教育理想，学者风范")]),
    (Rat, Rat, &[anecdote("胡蝶 & 潘有声", "电影明星的银幕情缘", "银幕佳偶，电影传奇")]),
    (Ox, Ox, &[anecdote("谢晋 & 徐大雯", "导演的电影人生", "电影艺术，导演风采")]),
    (Tiger, Tiger, &[anecdote("柳亚子 & 郑佩宜", "诗人的革命情怀", "革命诗人，文学理想")]),
    (Rabbit, Rabbit, &[anecdote("张大千 & 徐雯波", "画家的艺术人生", "绘画大师，艺术风采")]),
    (Dragon, Dragon, &[anecdote("梁漱溟 & 黄靖贤", "哲学家的理想家庭", "哲学思辨，乡村建设")]),
    (Snake, Snake, &[anecdote("林语堂 & 廖翠凤", "文学家的东西文化融合", "文化融合，幽默智慧")]),
    (Horse, Horse, &[anecdote("张学良 & 于凤至", "少帅的传奇人生", "少帅风采，历史传奇")]),
    (Goat, Goat, &[anecdote("刘海粟 & 夏伊乔", "画家的艺术追求", "绘画艺术，西画先驱")]),
    (Monkey, Monkey, &[anecdote("赵元任 & 杨步伟", "语言学家的学者家庭", "语言学术，幽默风趣")]),
    (Rooster, Rooster, &[anecdote("王实甫 & 李清照", "(虚构示例)文学才子佳人", "文学才华，诗词传承")]),
    (Dog, Dog, &[anecdote("许地山 & 周俟松", "作家的文学理想", "文学创作，南洋风情")]),
    (Pig, Pig, &[anecdote("林徽因父母", "建筑世家的文化传承", "建筑文化，家族传承")]),
];

/// Weighted dimension scores, each 0-100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PairScores {
    pub emotion: u32,
    pub personality: u32,
    pub career: u32,
    pub lifestyle: u32,
    pub communication: u32,
    pub overall: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Tier {
    #[serde(rename = "天作之合")]
    Perfect,
    #[serde(rename = "非常匹配")]
    Excellent,
    #[serde(rename = "较好匹配")]
    Good,
    #[serde(rename = "一般匹配")]
    Fair,
    #[serde(rename = "需要努力")]
    Effort,
}

impl Tier {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Tier::Perfect,
            80..=89 => Tier::Excellent,
            70..=79 => Tier::Good,
            60..=69 => Tier::Fair,
            _ => Tier::Effort,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Perfect => "天作之合",
            Tier::Excellent => "非常匹配",
            Tier::Good => "较好匹配",
            Tier::Fair => "一般匹配",
            Tier::Effort => "需要努力",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Tier::Perfect => "💕",
            Tier::Excellent => "😍",
            Tier::Good => "😊",
            Tier::Fair => "🙂",
            Tier::Effort => "😐",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Compatibility {
    pub zodiac_pair: String,
    pub male_zodiac: Zodiac,
    pub female_zodiac: Zodiac,
    pub overall_score: u32,
    pub compatibility_level: Tier,
    pub emoji: &'static str,
    pub scores: PairScores,
    pub analysis: String,
    pub advantages: String,
    pub challenges: String,
    pub suggestions: String,
    pub famous_couples: Vec<Anecdote>,
    pub calculation_method: &'static str,
    pub dimensions: BTreeMap<&'static str, String>,
}

fn personality_score(a: Zodiac, b: Zodiac) -> u32 {
    let (ta, tb) = (TRAITS[a.index()], TRAITS[b.index()]);
    let total: f64 = ta
        .iter()
        .zip(tb.iter())
        .map(|(x, y)| {
            let diff = (*x as f64 - *y as f64).abs();
            (100.0 - (diff - OPTIMAL_TRAIT_DIFF).abs() * 15.0).max(0.0)
        })
        .sum();
    (total / 4.0).round_ties_even() as u32
}

pub fn pair_scores(a: Zodiac, b: Zodiac) -> PairScores {
    let (i, j) = (a.index(), b.index());
    let emotion = EMOTION[i][j] as u32;
    let personality = personality_score(a, b);
    let career = CAREER[i][j] as u32;
    let lifestyle = LIFESTYLE[i][j] as u32;
    let communication = COMMUNICATION[i][j] as u32;
    let weighted = 0.30 * emotion as f64
        + 0.25 * personality as f64
        + 0.20 * career as f64
        + 0.15 * lifestyle as f64
        + 0.10 * communication as f64;
    PairScores {
        emotion,
        personality,
        career,
        lifestyle,
        communication,
        overall: weighted.round_ties_even() as u32,
    }
}

/// Anecdotes for the unordered pair, or one templated line.
pub fn famous_couples(a: Zodiac, b: Zodiac) -> Vec<Anecdote> {
    couples_in(ANECDOTES, a, b)
}

fn couples_in(table: &[(Zodiac, Zodiac, &[Anecdote])], a: Zodiac, b: Zodiac) -> Vec<Anecdote> {
    table
        .iter()
        .find(|(x, y, _)| (*x, *y) == (a, b) || (*x, *y) == (b, a))
        .map(|(_, _, list)| list.to_vec())
        .unwrap_or_else(|| {
            vec![Anecdote {
                name: Cow::Borrowed("传说中的佳偶"),
                story: Cow::Owned(format!("{a}和{b}的配对在历史上也有不少佳话")),
                traits: Cow::Borrowed("相互理解，共同成长"),
            }]
        })
}

fn analysis_text(a: Zodiac, b: Zodiac, tier: Tier) -> String {
    match tier {
        Tier::Perfect => format!("{a}和{b}是传说中的完美配对，各方面都非常和谐。感情深厚，性格互补，事业上能够相互支持，生活习惯协调，沟通默契。这样的配对堪称天作之合，是众人羡慕的神仙伴侣。"),
        Tier::Excellent => format!("{a}和{b}的配对非常理想，彼此之间有着很强的吸引力和互补性。在大部分方面都能够和谐相处，偶尔的小分歧反而能增进彼此的了解。这是一对让人看好的佳偶。"),
        Tier::Good => format!("{a}和{b}的配对整体来说是比较合适的，虽然可能在某些方面需要磨合，但只要相互理解和包容，就能建立稳定幸福的关系。时间会让这份感情更加深厚。"),
        Tier::Fair => format!("{a}和{b}的配对属于中等水平，需要双方都付出更多的努力来维护这段关系。通过加强沟通和相互了解，完全有可能发展出美好的感情。"),
        Tier::Effort => format!("{a}和{b}的配对面临一些挑战，但这并不意味着不可能。真正的爱情能够克服一切困难，只要双方都愿意为对方改变和努力，同样可以收获幸福。"),
    }
}

fn sentence(parts: Vec<&str>) -> String {
    format!("{}。", parts.join("；"))
}

fn advantages(s: &PairScores) -> String {
    let checks = [
        (s.emotion, "情感基础深厚，容易产生共鸣"),
        (s.personality, "性格互补性强，能够相互成就"),
        (s.career, "事业发展协调，能够共同进步"),
        (s.lifestyle, "生活习惯相近，日常相处和谐"),
        (s.communication, "沟通顺畅，很少产生误解"),
    ];
    let found: Vec<&str> = checks.iter().filter(|(v, _)| *v >= 80).map(|(_, t)| *t).collect();
    if found.is_empty() {
        sentence(vec!["彼此吸引力强", "有共同话题", "相处轻松愉快"])
    } else {
        sentence(found)
    }
}

fn challenges(s: &PairScores) -> String {
    let checks = [
        (s.emotion, "需要加强情感交流，培养共同兴趣"),
        (s.personality, "性格差异较大，需要更多理解和包容"),
        (s.career, "事业规划可能存在分歧，需要协调统一"),
        (s.lifestyle, "生活习惯差异需要磨合"),
        (s.communication, "沟通方式需要调整，避免误解"),
    ];
    let found: Vec<&str> = checks.iter().filter(|(v, _)| *v < 70).map(|(_, t)| *t).collect();
    if found.is_empty() {
        sentence(vec!["保持现有的和谐状态", "继续加深彼此了解"])
    } else {
        sentence(found)
    }
}

fn suggestions(overall: u32) -> String {
    let mut out = match overall {
        85.. => vec!["珍惜这份难得的缘分", "共同规划美好未来", "保持开放的沟通"],
        75..=84 => vec!["继续加深相互了解", "在差异中寻找互补", "培养共同爱好"],
        65..=74 => vec!["多花时间相处", "学会换位思考", "建立有效的沟通机制"],
        _ => vec!["需要更多耐心和理解", "寻找共同点", "专注于对方的优点"],
    };
    out.push("记住爱情需要双方的努力");
    sentence(out)
}

pub fn compatibility(male: Zodiac, female: Zodiac) -> Compatibility {
    let scores = pair_scores(male, female);
    let tier = Tier::from_score(scores.overall);
    let dimensions = BTreeMap::from([
        ("感情匹配度", format!("{}分 (权重30%)", scores.emotion)),
        ("性格互补度", format!("{}分 (权重25%)", scores.personality)),
        ("事业协调度", format!("{}分 (权重20%)", scores.career)),
        ("生活习惯", format!("{}分 (权重15%)", scores.lifestyle)),
        ("沟通默契度", format!("{}分 (权重10%)", scores.communication)),
    ]);
    Compatibility {
        zodiac_pair: format!("{male}{female}"),
        male_zodiac: male,
        female_zodiac: female,
        overall_score: scores.overall,
        compatibility_level: tier,
        emoji: tier.emoji(),
        analysis: analysis_text(male, female, tier),
        advantages: advantages(&scores),
        challenges: challenges(&scores),
        suggestions: suggestions(scores.overall),
        famous_couples: famous_couples(male, female),
        calculation_method: "多维度评分体系",
        dimensions,
        scores,
    }
}

/// Label-level entry point; both labels must be one of the twelve animals.
pub fn match_labels(male: &str, female: &str) -> Result<Compatibility, ZodiacError> {
    Ok(compatibility(Zodiac::from_label(male)?, Zodiac::from_label(female)?))
}

/// Pair tables must be symmetric and every score within 0-100.
pub fn validate_tables() -> Result<(), String> {
    for (name, table) in [
        ("emotion", &EMOTION),
        ("lifestyle", &LIFESTYLE),
        ("career", &CAREER),
        ("communication", &COMMUNICATION),
    ] {
        for i in 0..12 {
            for j in 0..12 {
                if table[i][j] > 100 || table[i][j] != table[j][i] {
                    return Err(format!("{name} table inconsistent at ({i}, {j})"));
                }
            }
        }
    }
    for (i, z) in Zodiac::ALL.iter().enumerate() {
        if z.index() != i || Zodiac::from_label(z.label()).ok() != Some(*z) {
            return Err(format!("zodiac table out of order at {i}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ox_pig_golden_value() {
        let c = match_labels("牛", "猪").unwrap();
        assert_eq!(
            c.scores,
            PairScores {
                emotion: 85,
                personality: 81,
                career: 82,
                lifestyle: 82,
                communication: 80,
                overall: 82
            }
        );
        assert_eq!(c.compatibility_level, Tier::Excellent);
        assert_eq!(c.emoji, "😍");
        assert_eq!(c.famous_couples.len(), 2);
        assert_eq!(c.famous_couples[0].name, "华罗庚 & 吴筱元");
    }

    #[test]
    fn personality_rounds_half_to_even() {
        // Identical traits: four scores of 62.5.
        assert_eq!(personality_score(Rat, Rat), 62);
        assert_eq!(pair_scores(Rat, Rat).overall, 69);
    }

    #[test]
    fn pair_order_only_changes_labels() {
        let a = compatibility(Dragon, Rooster);
        let b = compatibility(Rooster, Dragon);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.overall_score, 92);
        assert_eq!(a.compatibility_level.label(), "天作之合");
        assert_eq!(a.zodiac_pair, "龙鸡");
        assert_eq!(b.zodiac_pair, "鸡龙");
    }

    #[test]
    fn low_scores_list_challenges() {
        let c = compatibility(Horse, Rat);
        assert_eq!(c.overall_score, 58);
        assert_eq!(c.compatibility_level, Tier::Effort);
        assert!(c.challenges.starts_with("需要加强情感交流"));
        assert!(c.suggestions.ends_with("记住爱情需要双方的努力。"));
        assert_eq!(c.advantages, "彼此吸引力强；有共同话题；相处轻松愉快。");
    }

    #[test]
    fn every_pair_has_anecdotes() {
        assert_eq!(ANECDOTES.len(), 78);
        for a in Zodiac::ALL {
            for b in Zodiac::ALL {
                assert!(
                    ANECDOTES
                        .iter()
                        .any(|(x, y, _)| (*x, *y) == (a, b) || (*x, *y) == (b, a)),
                    "no anecdote for {a}{b}"
                );
            }
        }
        let c = compatibility(Rooster, Rooster);
        assert_eq!(c.famous_couples.len(), 1);
        assert_eq!(c.famous_couples[0].name, "王实甫 & 李清照");
    }

    #[test]
    fn unlisted_pair_uses_template() {
        let table: &[(Zodiac, Zodiac, &[Anecdote])] =
            &[(Rat, Ox, &[anecdote("钱学森 & 蒋英", "", "")])];
        assert_eq!(couples_in(table, Ox, Rat)[0].name, "钱学森 & 蒋英");
        let c = couples_in(table, Rooster, Dog);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].name, "传说中的佳偶");
        assert_eq!(c[0].story, "鸡和狗的配对在历史上也有不少佳话");
    }

    #[test]
    fn invalid_label_is_rejected() {
        assert_eq!(
            match_labels("猫", "鼠").unwrap_err(),
            ZodiacError::UnknownAnimal("猫".into())
        );
        assert!(match_labels("鼠", "").is_err());
    }

    #[test]
    fn tables_are_consistent() {
        validate_tables().unwrap();
        assert_eq!(Zodiac::for_year(1990), Horse);
        assert_eq!(Zodiac::for_year(2024), Dragon);
    }
}
