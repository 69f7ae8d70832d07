//! Four-pillar calculator.
//!
//! Year, month, day and hour pillars are pure modulo arithmetic over the
//! sexagenary cycle:
//!
//! - year: `(year - 4) mod 10 / mod 12`
//! - month: solar-term threshold picks the effective month, 五虎遁 picks the stem
//! - day: days since 1900-01-01 plus [`DAY_CYCLE_OFFSET`], mod 60
//! - hour: two-hour branch, 五鼠遁 picks the stem
//!
//! Lunar input is converted through a [`LunarCalendar`] first. Any invalid
//! input is a [`CalculationError`]; nothing falls back to a default chart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::{
    check_year, CalendarType, LunarCalendar, LunarDate, SolarDate, SOLAR_TERM_THRESHOLDS,
};
use crate::error::{CalculationError, CalculationResult};
use crate::ganzhi::{Branch, Pillar, Stem};

/// 1900-01-01 sits at index 36 (庚子) of the cycle.
pub const DAY_CYCLE_OFFSET: i64 = 36;

/// 五虎遁: first month stem for each year stem.
const FIVE_TIGER: [usize; 10] = [2, 4, 6, 8, 0, 2, 4, 6, 8, 0];

/// 五鼠遁: 子-hour stem for each day stem.
const FIVE_RAT: [usize; 10] = [0, 2, 4, 6, 8, 0, 2, 4, 6, 8];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

impl FromStr for Gender {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "unknown" => Ok(Gender::Unknown),
            other => Err(CalculationError::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalised birth data. Field order is the cache-key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub gender: Gender,
    pub calendar_type: CalendarType,
}

impl BirthInput {
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        gender: Gender,
        calendar_type: CalendarType,
    ) -> Self {
        Self { year, month, day, hour, gender, calendar_type }
    }

    /// Builds from raw request strings, lowercasing and trimming them.
    pub fn parse(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        gender: &str,
        calendar_type: &str,
    ) -> CalculationResult<Self> {
        let input = Self::new(year, month, day, hour, gender.parse()?, calendar_type.parse()?);
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalculationResult<()> {
        check_year(self.year)?;
        if self.hour > 23 {
            return Err(CalculationError::HourOutOfRange(self.hour));
        }
        match self.calendar_type {
            CalendarType::Solar => {
                SolarDate::new(self.year, self.month, self.day).to_naive()?;
            }
            CalendarType::Lunar => {
                LunarDate::new(self.year, self.month, self.day, false).validate()?;
            }
        }
        Ok(())
    }
}

/// 四柱
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Chart {
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// 日主
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// `{"年柱": {"天干", "地支"}, ...}` layout.
    pub fn paipan(&self) -> serde_json::Value {
        let col = |p: Pillar| serde_json::json!({ "天干": p.stem.label(), "地支": p.branch.label() });
        serde_json::json!({
            "年柱": col(self.year),
            "月柱": col(self.month),
            "日柱": col(self.day),
            "时柱": col(self.hour),
        })
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthPillar {
    pub pillar: Pillar,
    /// Gregorian month after the solar-term shift.
    pub effective_month: u32,
    pub solar_term: &'static str,
}

impl MonthPillar {
    pub fn jieqi_info(&self) -> String {
        format!("根据{}确定月柱", self.solar_term)
    }
}

pub fn year_pillar(year: i32) -> Pillar {
    let i = (year - 4).rem_euclid(60) as usize;
    Pillar::from_cycle_index(i)
}

pub fn month_pillar(month: u32, day: u32, year_stem: Stem) -> CalculationResult<MonthPillar> {
    let (threshold, term) = *SOLAR_TERM_THRESHOLDS
        .get((month as usize).wrapping_sub(1))
        .ok_or(CalculationError::MonthOutOfRange(month))?;
    let effective = if day < threshold {
        if month > 1 { month - 1 } else { 12 }
    } else {
        month
    };
    let branch = Branch::from_index((effective as usize + 1) % 12);
    let stem = Stem::from_index(FIVE_TIGER[year_stem.index()] + effective as usize - 1);
    Ok(MonthPillar {
        pillar: Pillar::new(stem, branch),
        effective_month: effective,
        solar_term: term,
    })
}

pub fn day_cycle_index(date: NaiveDate) -> usize {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    let days = date.signed_duration_since(epoch).num_days();
    (days + DAY_CYCLE_OFFSET).rem_euclid(60) as usize
}

pub fn day_pillar(date: NaiveDate) -> Pillar {
    Pillar::from_cycle_index(day_cycle_index(date))
}

pub fn hour_pillar(day_stem: Stem, hour: u32) -> CalculationResult<Pillar> {
    let branch = Branch::from_hour(hour)?;
    let stem = Stem::from_index(FIVE_RAT[day_stem.index()] + branch.index());
    Ok(Pillar::new(stem, branch))
}

/// Chart for a Gregorian date.
pub fn calculate_chart(date: SolarDate, hour: u32) -> CalculationResult<Chart> {
    check_year(date.year)?;
    let naive = date.to_naive()?;
    let year = year_pillar(date.year);
    let month = month_pillar(date.month, date.day, year.stem)?;
    let day = day_pillar(naive);
    let hour = hour_pillar(day.stem, hour)?;
    Ok(Chart { year, month: month.pillar, day, hour })
}

/// Chart plus the calendar bookkeeping the report needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOutcome {
    pub chart: Chart,
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub month: MonthPillar,
    pub calendar_type: CalendarType,
}

impl ChartOutcome {
    pub fn conversion_note(&self) -> String {
        let other = match self.calendar_type {
            CalendarType::Solar => (self.lunar.year, self.lunar.month, self.lunar.day),
            CalendarType::Lunar => (self.solar.year, self.solar.month, self.solar.day),
        };
        let target = match self.calendar_type {
            CalendarType::Solar => CalendarType::Lunar,
            CalendarType::Lunar => CalendarType::Solar,
        };
        format!(
            "输入{}日期，对应{}为{}年{}月{}日",
            self.calendar_type.label(),
            target.label(),
            other.0,
            other.1,
            other.2
        )
    }
}

/// Resolves the calendar type and computes the chart.
pub fn compute(input: &BirthInput, lunar: &dyn LunarCalendar) -> CalculationResult<ChartOutcome> {
    input.validate()?;
    let (solar, lunar_date) = match input.calendar_type {
        CalendarType::Solar => {
            let solar = SolarDate::new(input.year, input.month, input.day);
            (solar, lunar.solar_to_lunar(solar)?)
        }
        CalendarType::Lunar => {
            let l = LunarDate::new(input.year, input.month, input.day, false);
            (lunar.lunar_to_solar(l)?, l)
        }
    };
    let chart = calculate_chart(solar, input.hour)?;
    let month = month_pillar(solar.month, solar.day, chart.year.stem)?;
    Ok(ChartOutcome {
        chart,
        solar,
        lunar: lunar_date,
        month,
        calendar_type: input.calendar_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ApproximateLunarCalendar;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reference_chart_1990_05_15() {
        let chart = calculate_chart(SolarDate::new(1990, 5, 15), 14).unwrap();
        assert_eq!(chart.to_string(), "庚午 壬午 丙午 乙未");
        assert_eq!(chart.day_master(), Stem::Bing);
    }

    #[test]
    fn day_cycle_epoch() {
        assert_eq!(day_cycle_index(date(1900, 1, 1)), 36);
        assert_eq!(day_pillar(date(1900, 1, 1)).to_string(), "庚子");
        assert_eq!(day_pillar(date(1900, 1, 2)).to_string(), "辛丑");
        assert_eq!(day_pillar(date(2000, 1, 1)).to_string(), "甲申");
    }

    #[test]
    fn month_before_solar_term_uses_previous_month() {
        let before = month_pillar(5, 5, Stem::Geng).unwrap();
        assert_eq!(before.effective_month, 4);
        let after = month_pillar(5, 6, Stem::Geng).unwrap();
        assert_eq!(after.effective_month, 5);
        assert_eq!(after.pillar.to_string(), "壬午");
        let jan = month_pillar(1, 1, Stem::Jia).unwrap();
        assert_eq!(jan.effective_month, 12);
        assert_eq!(jan.jieqi_info(), "根据立春确定月柱");
    }

    #[test]
    fn hour_pillar_follows_five_rat() {
        assert_eq!(hour_pillar(Stem::Jia, 0).unwrap().to_string(), "甲子");
        assert_eq!(hour_pillar(Stem::Jia, 23).unwrap().to_string(), "甲子");
        assert_eq!(hour_pillar(Stem::Bing, 14).unwrap().to_string(), "乙未");
        assert!(hour_pillar(Stem::Jia, 24).is_err());
    }

    #[test]
    fn invalid_dates_are_errors() {
        assert!(matches!(
            calculate_chart(SolarDate::new(2023, 2, 30), 0),
            Err(CalculationError::InvalidDate { .. })
        ));
        assert!(matches!(
            calculate_chart(SolarDate::new(1899, 12, 31), 0),
            Err(CalculationError::YearOutOfRange { .. })
        ));
        assert!(calculate_chart(SolarDate::new(2023, 13, 1), 0).is_err());
    }

    #[test]
    fn birth_input_normalises_strings() {
        let input = BirthInput::parse(1990, 5, 15, 14, " Male ", "SOLAR").unwrap();
        assert_eq!(input.gender, Gender::Male);
        assert_eq!(input.calendar_type, CalendarType::Solar);
        assert!(BirthInput::parse(1990, 5, 15, 14, "other", "solar").is_err());
        assert!(BirthInput::parse(1990, 5, 15, 14, "male", "julian").is_err());
    }

    #[test]
    fn lunar_input_is_converted_before_charting() {
        let input = BirthInput::new(1990, 4, 30, 14, Gender::Female, CalendarType::Lunar);
        let out = compute(&input, &ApproximateLunarCalendar).unwrap();
        assert_eq!(out.solar, SolarDate::new(1990, 5, 15));
        assert_eq!(out.chart.to_string(), "庚午 壬午 丙午 乙未");
        assert_eq!(out.conversion_note(), "输入农历日期，对应公历为1990年5月15日");
    }

    #[test]
    fn solar_note_reports_lunar_date() {
        let input = BirthInput::new(1990, 5, 15, 14, Gender::Male, CalendarType::Solar);
        let out = compute(&input, &ApproximateLunarCalendar).unwrap();
        assert_eq!(out.conversion_note(), "输入公历日期，对应农历为1990年4月30日");
        assert_eq!(out.month.solar_term, "芒种");
    }
}
