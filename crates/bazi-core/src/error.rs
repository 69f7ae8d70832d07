//! Error types for the BaZi core.

use thiserror::Error;

pub type CalculationResult<T> = Result<T, CalculationError>;
pub type CacheResult<T> = Result<T, CacheError>;
pub type NamingResult<T> = Result<T, NamingError>;
pub type BaziResult<T> = Result<T, BaziError>;

/// Invalid birth input or a chart that cannot be computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("年份应在{min}-{max}之间，收到{year}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("月份应在1-12之间，收到{0}")]
    MonthOutOfRange(u32),
    #[error("日期应在1-{max}之间，收到{day}")]
    DayOutOfRange { day: u32, max: u32 },
    #[error("小时应在0-23之间，收到{0}")]
    HourOutOfRange(u32),
    #[error("日期不存在: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("性别应为male、female或unknown，收到'{0}'")]
    InvalidGender(String),
    #[error("日历类型应为solar或lunar，收到'{0}'")]
    InvalidCalendarType(String),
    #[error("无效的干支字符: '{0}'")]
    InvalidGanZhi(String),
    #[error("日期格式应为YYYY-MM-DD，收到'{0}'")]
    MalformedDate(String),
    #[error("八字数据缺少日柱")]
    MissingDayPillar,
}

/// Flat-file cache failures. Callers treat these as a cache miss.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("max_age_days must be within 0-{max}, got {days}")]
    InvalidMaxAge { days: i64, max: i64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("姓氏不能为空")]
    EmptySurname,
    #[error("名字长度应为1或2，收到{0}")]
    InvalidNameLength(usize),
    #[error("无法确定汉字'{0}'的笔画数")]
    UnknownStroke(char),
    #[error("五行属性必须是金、木、水、火、土之一，收到'{0}'")]
    UnknownElement(String),
    #[error("字组合至少需要两个五行属性，收到{0}个")]
    TooFewElements(usize),
    #[error("性别参数必须是male、female或neutral，收到'{0}'")]
    InvalidGenderFilter(String),
    #[error("字库加载失败: {0}")]
    Dictionary(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZodiacError {
    #[error("无效的生肖：{0}")]
    UnknownAnimal(String),
}

/// Umbrella error used at the service boundary.
#[derive(Error, Debug)]
pub enum BaziError {
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Zodiac(#[from] ZodiacError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl BaziError {
    /// True when the caller sent bad input (maps to HTTP 400).
    pub fn is_client_error(&self) -> bool {
        match self {
            BaziError::Calculation(_) | BaziError::Zodiac(_) => true,
            BaziError::Naming(e) => !matches!(e, NamingError::Dictionary(_)),
            _ => false,
        }
    }
}
