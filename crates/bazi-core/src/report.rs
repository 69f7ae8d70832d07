//! Full BaZi report and the cached, deterministic service in front of it.

use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{format_timestamp, input_hash, ResultCache};
use crate::calendar::{ApproximateLunarCalendar, CalendarType, LunarCalendar, LunarDate, SolarDate};
use crate::chart::{compute, BirthInput, Chart};
use crate::error::{BaziResult, CalculationResult};
use crate::narrative::{Analysis, Dayun, TodayFortune};
use crate::wuxing::ElementHistogram;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaziReport {
    pub bazi: Chart,
    pub paipan: Value,
    pub wuxing: ElementHistogram,
    pub analysis: Analysis,
    pub dayun: Dayun,
    pub today_fortune: TodayFortune,
    pub lunar_info: LunarDate,
    pub solar_info: SolarDate,
    pub calendar_type: CalendarType,
    pub conversion_note: String,
    pub jieqi_info: String,
    pub is_deterministic: bool,
    pub calculation_timestamp: String,
    pub input_hash: String,
}

/// Builds the report as of `now`; age and today's fortune depend on it.
pub fn build_report(
    input: &BirthInput,
    lunar: &dyn LunarCalendar,
    now: NaiveDateTime,
) -> CalculationResult<BaziReport> {
    let outcome = compute(input, lunar)?;
    let chart = outcome.chart;
    let wuxing = ElementHistogram::from_chart(&chart);
    let today = now.date();
    let age = today.year() - outcome.solar.year;
    Ok(BaziReport {
        paipan: chart.paipan(),
        analysis: Analysis::compose(chart.day_master(), &wuxing, input.gender, age),
        dayun: Dayun::for_age(age),
        today_fortune: TodayFortune::for_date(today),
        lunar_info: outcome.lunar,
        solar_info: outcome.solar,
        calendar_type: input.calendar_type,
        conversion_note: outcome.conversion_note(),
        jieqi_info: outcome.month.jieqi_info(),
        is_deterministic: true,
        calculation_timestamp: format_timestamp(now),
        input_hash: input_hash(input),
        bazi: chart,
        wuxing,
    })
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Cache-fronted calculator. Identical input always yields the same chart.
pub struct BaziService {
    cache: Option<ResultCache>,
    lunar: Box<dyn LunarCalendar>,
    clock: fn() -> NaiveDateTime,
}

impl BaziService {
    pub fn new(cache: Option<ResultCache>) -> Self {
        Self {
            cache,
            lunar: Box::new(ApproximateLunarCalendar),
            clock: local_now,
        }
    }

    pub fn with_lunar_calendar(mut self, lunar: Box<dyn LunarCalendar>) -> Self {
        self.lunar = lunar;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache(&self) -> Option<&ResultCache> {
        self.cache.as_ref()
    }

    pub fn lunar_calendar(&self) -> &dyn LunarCalendar {
        self.lunar.as_ref()
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// Uncached report.
    pub fn report(&self, input: &BirthInput) -> CalculationResult<BaziReport> {
        build_report(input, self.lunar.as_ref(), self.now())
    }

    /// Cached report as JSON. A cache hit is returned unchanged.
    pub fn calculate(&self, input: &BirthInput) -> BaziResult<Value> {
        input.validate()?;
        let now = self.now();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.load_at(input, now) {
                return Ok(hit);
            }
        }
        let report = build_report(input, self.lunar.as_ref(), now)?;
        let value = serde_json::to_value(&report)?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save_at(input, &value, now) {
                warn!("[CACHE] save failed for {}: {}", report.input_hash, e);
            }
        }
        Ok(value)
    }

    /// Recomputes `iterations` times with the cache entry dropped each time
    /// and compares bazi, wuxing and analysis.
    pub fn verify_consistency(&self, input: &BirthInput, iterations: usize) -> BaziResult<bool> {
        let mut first: Option<Value> = None;
        for _ in 0..iterations {
            if let Some(cache) = &self.cache {
                cache.invalidate(input)?;
            }
            let result = self.calculate(input)?;
            match &first {
                None => first = Some(result),
                Some(f) => {
                    for field in ["bazi", "wuxing", "analysis"] {
                        if f.get(field) != result.get(field) {
                            warn!("[SYSTEM] field {} differs between runs", field);
                            return Ok(false);
                        }
                    }
                }
            }
        }
        info!("[SYSTEM] {} runs consistent", iterations);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Gender;

    fn fixed_now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sample() -> BirthInput {
        BirthInput::new(1990, 5, 15, 14, Gender::Male, CalendarType::Solar)
    }

    #[test]
    fn report_fields_for_reference_input() {
        let r = build_report(&sample(), &ApproximateLunarCalendar, fixed_now()).unwrap();
        assert_eq!(r.bazi.to_string(), "庚午 壬午 丙午 乙未");
        assert_eq!(r.wuxing.total(), 8);
        assert_eq!(r.dayun.current_age, 35);
        assert_eq!(r.today_fortune.score, 8);
        assert_eq!(r.paipan["日柱"]["天干"], "丙");
        assert_eq!(r.input_hash, "b0b3b8bc7ab20ad7ae62bbbfec38a128");
        assert_eq!(r.jieqi_info, "根据芒种确定月柱");
    }

    #[test]
    fn report_serialises_pillars_as_strings() {
        let r = build_report(&sample(), &ApproximateLunarCalendar, fixed_now()).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["bazi"]["year"], "庚午");
        assert_eq!(v["wuxing"]["火"], 4);
        assert_eq!(v["calendar_type"], "solar");
        assert_eq!(v["lunar_info"]["leap"], false);
    }

    #[test]
    fn uncached_service_is_consistent() {
        let svc = BaziService::new(None).with_clock(fixed_now);
        assert!(svc.verify_consistency(&sample(), 3).unwrap());
    }

    #[test]
    fn invalid_input_is_rejected_before_cache() {
        let svc = BaziService::new(None);
        let bad = BirthInput::new(2023, 2, 30, 0, Gender::Male, CalendarType::Solar);
        assert!(svc.calculate(&bad).unwrap_err().is_client_error());
    }
}
