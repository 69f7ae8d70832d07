//! Calendar types, the simplified solar-term table and lunar/solar conversion.
//!
//! Precise lunar conversion needs an ephemeris table; the only implementation
//! here is the ±15-day approximation, kept behind [`LunarCalendar`] so a real
//! almanac can be swapped in.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalculationError;

pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Solar,
    Lunar,
}

impl CalendarType {
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarType::Solar => "solar",
            CalendarType::Lunar => "lunar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CalendarType::Solar => "公历",
            CalendarType::Lunar => "农历",
        }
    }
}

impl FromStr for CalendarType {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solar" => Ok(CalendarType::Solar),
            "lunar" => Ok(CalendarType::Lunar),
            other => Err(CalculationError::InvalidCalendarType(other.to_string())),
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 公历日期
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Checks range and that the day exists in that month.
    pub fn to_naive(self) -> Result<NaiveDate, CalculationError> {
        if !(1..=12).contains(&self.month) {
            return Err(CalculationError::MonthOutOfRange(self.month));
        }
        if !(1..=31).contains(&self.day) {
            return Err(CalculationError::DayOutOfRange { day: self.day, max: 31 });
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(
            CalculationError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            },
        )
    }
}

impl From<NaiveDate> for SolarDate {
    fn from(d: NaiveDate) -> Self {
        Self::new(d.year(), d.month(), d.day())
    }
}

/// 农历日期
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub leap: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, leap: bool) -> Self {
        Self { year, month, day, leap }
    }

    pub fn validate(&self) -> Result<(), CalculationError> {
        check_year(self.year)?;
        if !(1..=12).contains(&self.month) {
            return Err(CalculationError::MonthOutOfRange(self.month));
        }
        if !(1..=30).contains(&self.day) {
            return Err(CalculationError::DayOutOfRange { day: self.day, max: 30 });
        }
        Ok(())
    }
}

pub fn check_year(year: i32) -> Result<(), CalculationError> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Ok(())
    } else {
        Err(CalculationError::YearOutOfRange {
            year,
            min: YEAR_MIN,
            max: YEAR_MAX,
        })
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Lunar/solar conversion seam.
pub trait LunarCalendar: Send + Sync {
    fn solar_to_lunar(&self, date: SolarDate) -> Result<LunarDate, CalculationError>;
    fn lunar_to_solar(&self, date: LunarDate) -> Result<SolarDate, CalculationError>;
    /// Short identifier reported alongside conversions.
    fn method(&self) -> &'static str;
}

/// The ±15-day approximation used when no almanac is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproximateLunarCalendar;

impl LunarCalendar for ApproximateLunarCalendar {
    fn solar_to_lunar(&self, date: SolarDate) -> Result<LunarDate, CalculationError> {
        date.to_naive()?;
        let (year, month) = if date.month > 1 {
            (date.year, date.month - 1)
        } else {
            (date.year - 1, 12)
        };
        let day = if date.day > 15 { date.day - 15 } else { date.day + 15 };
        Ok(LunarDate::new(year, month, day, false))
    }

    fn lunar_to_solar(&self, date: LunarDate) -> Result<SolarDate, CalculationError> {
        date.validate()?;
        let (year, month) = if date.month < 12 {
            (date.year, date.month + 1)
        } else {
            (date.year + 1, 1)
        };
        let day = if date.day < 15 {
            (date.day + 15).min(28)
        } else {
            date.day.saturating_sub(15).max(1)
        };
        Ok(SolarDate::new(year, month, day.min(days_in_month(year, month))))
    }

    fn method(&self) -> &'static str {
        "approximate"
    }
}

/// 节: the day of each Gregorian month on which the BaZi month turns.
/// Index 0 is January.
pub const SOLAR_TERM_THRESHOLDS: [(u32, &str); 12] = [
    (4, "立春"),
    (5, "惊蛰"),
    (5, "清明"),
    (5, "立夏"),
    (6, "芒种"),
    (7, "小暑"),
    (7, "立秋"),
    (8, "白露"),
    (8, "寒露"),
    (8, "立冬"),
    (7, "大雪"),
    (6, "小寒"),
];

/// Twenty-four terms by average date, used by the daily fortune.
/// Per month: (day, term) for the two terms that start in it.
pub const SOLAR_TERMS_BY_MONTH: [[(u32, &str); 2]; 12] = [
    [(6, "小寒"), (20, "大寒")],
    [(4, "立春"), (19, "雨水")],
    [(6, "惊蛰"), (21, "春分")],
    [(5, "清明"), (20, "谷雨")],
    [(6, "立夏"), (21, "小满")],
    [(6, "芒种"), (21, "夏至")],
    [(7, "小暑"), (23, "大暑")],
    [(8, "立秋"), (23, "处暑")],
    [(8, "白露"), (23, "秋分")],
    [(8, "寒露"), (23, "霜降")],
    [(7, "立冬"), (22, "小雪")],
    [(7, "大雪"), (22, "冬至")],
];

/// Term in effect on `date`; before the month's first term the previous
/// month's second term still applies.
pub fn current_solar_term(date: NaiveDate) -> &'static str {
    let m = date.month0() as usize;
    let terms = SOLAR_TERMS_BY_MONTH[m];
    if date.day() >= terms[1].0 {
        terms[1].1
    } else if date.day() >= terms[0].0 {
        terms[0].1
    } else {
        SOLAR_TERMS_BY_MONTH[(m + 11) % 12][1].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_type_parses_case_insensitively() {
        assert_eq!(" Lunar ".parse::<CalendarType>().unwrap(), CalendarType::Lunar);
        assert!("gregorian".parse::<CalendarType>().is_err());
    }

    #[test]
    fn solar_to_lunar_shifts_month_and_day() {
        let cal = ApproximateLunarCalendar;
        let l = cal.solar_to_lunar(SolarDate::new(1990, 5, 15)).unwrap();
        assert_eq!(l, LunarDate::new(1990, 4, 30, false));
        let l = cal.solar_to_lunar(SolarDate::new(2000, 1, 20)).unwrap();
        assert_eq!(l, LunarDate::new(1999, 12, 5, false));
    }

    #[test]
    fn lunar_to_solar_clamps_to_month_length() {
        let cal = ApproximateLunarCalendar;
        let s = cal.lunar_to_solar(LunarDate::new(2023, 1, 14, false)).unwrap();
        assert_eq!(s, SolarDate::new(2023, 2, 28));
        let s = cal.lunar_to_solar(LunarDate::new(2023, 12, 20, false)).unwrap();
        assert_eq!(s, SolarDate::new(2024, 1, 5));
        let s = cal.lunar_to_solar(LunarDate::new(2023, 3, 15, false)).unwrap();
        assert_eq!(s, SolarDate::new(2023, 4, 1));
    }

    #[test]
    fn conversions_reject_bad_input() {
        let cal = ApproximateLunarCalendar;
        assert!(cal.solar_to_lunar(SolarDate::new(2023, 2, 30)).is_err());
        assert!(cal.lunar_to_solar(LunarDate::new(2023, 1, 31, false)).is_err());
        assert!(cal.lunar_to_solar(LunarDate::new(1800, 1, 1, false)).is_err());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn solar_term_lookup_wraps_to_previous_month() {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        assert_eq!(current_solar_term(d(1, 3)), "冬至");
        assert_eq!(current_solar_term(d(2, 4)), "立春");
        assert_eq!(current_solar_term(d(6, 21)), "夏至");
        assert_eq!(current_solar_term(d(10, 16)), "寒露");
    }
}
