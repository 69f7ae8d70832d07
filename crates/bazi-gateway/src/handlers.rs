use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    Json,
};
use bazi_core::cache::MAX_AGE_LIMIT_DAYS;
use bazi_core::festivals::FestivalList;
use bazi_core::fortune::{self, MemberInput, PersonalBazi, DEFAULT_AGE};
use bazi_core::zodiac;
use bazi_core::{BirthInput, LunarDate, SolarDate};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::{optional_json, respond, respond_with, timestamp, ApiError, ApiResult, SharedState};

const DISCLAIMER: &str = "本结果基于传统八字理论计算，仅供娱乐参考，不可作为人生决策依据";

/// (method, path, purpose) for `/docs`.
const ROUTES: &[(&str, &str, &str)] = &[
    ("GET", "/", "服务状态"),
    ("GET", "/health", "健康检查"),
    ("GET", "/docs", "接口列表"),
    ("POST", "/api/v1/calculate-bazi", "八字排盘与分析"),
    ("POST", "/api/v1/lunar-to-solar", "农历转公历"),
    ("POST", "/api/v1/solar-to-lunar", "公历转农历"),
    ("POST", "/api/v1/naming/generate-names", "起名推荐"),
    ("POST", "/api/v1/naming/evaluate-name", "名字评估"),
    ("POST", "/api/v1/naming/personalized-generate", "个性化起名"),
    ("POST", "/api/v1/naming/search-characters", "按寓意搜索汉字"),
    ("POST", "/api/v1/naming/character-combinations", "五行字组合"),
    ("GET", "/api/v1/naming/database-stats", "字库统计"),
    ("GET", "/api/v1/naming/wuxing-chars", "按五行查询汉字"),
    ("GET", "/api/v1/naming/char-info/{char}", "单字信息"),
    ("POST", "/api/v1/zodiac-matching", "生肖配对"),
    ("POST", "/api/v1/daily-fortune", "每日运势"),
    ("POST", "/api/v1/daily-fortune/batch", "家庭成员运势"),
    ("GET", "/api/v1/festivals", "节日列表"),
    ("GET", "/api/v1/tab-icons/config", "图标配置"),
    ("GET", "/api/v1/tab-icons/themes/available", "图标主题"),
    ("POST", "/api/v1/tab-icons/batch-download", "图标下载链接"),
    ("GET", "/api/v1/tab-icons/{name}", "Tab图标"),
    ("GET", "/api/v1/cache/stats", "缓存统计"),
    ("POST", "/api/v1/cache/clear-expired", "清理过期缓存"),
];

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) async fn root() -> Json<Value> {
    Json(json!({
        "message": "八字运势小程序 API 服务正常运行",
        "status": "healthy",
        "version": bazi_core::version(),
        "timestamp": timestamp(),
    }))
}

pub(crate) async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "environment": state.config.environment,
        "version": bazi_core::version(),
        "cache_enabled": state.service.cache().is_some(),
        "timestamp": timestamp(),
    }))
}

pub(crate) async fn docs(State(state): State<SharedState>) -> Json<Value> {
    let routes: Vec<Value> = ROUTES
        .iter()
        .map(|(method, path, purpose)| json!({ "method": method, "path": path, "description": purpose }))
        .collect();
    Json(json!({
        "title": state.config.app_name,
        "version": bazi_core::version(),
        "routes": routes,
    }))
}

fn default_hour() -> u32 {
    12
}

fn default_gender() -> String {
    "male".to_string()
}

fn default_calendar() -> String {
    "solar".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct BirthData {
    year: i32,
    month: u32,
    day: u32,
    #[serde(default = "default_hour")]
    hour: u32,
    #[serde(default = "default_gender")]
    gender: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_calendar", alias = "calendarType")]
    calendar_type: String,
}

impl BirthData {
    fn check_ranges(&self) -> ApiResult<()> {
        let current = Local::now().year();
        if !(1900..=current).contains(&self.year) {
            return Err(ApiError::bad_request(format!(
                "出生年份不在有效范围内(1900-{current})"
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(ApiError::bad_request("月份必须在1-12之间"));
        }
        if !(1..=31).contains(&self.day) {
            return Err(ApiError::bad_request("日期必须在1-31之间"));
        }
        if self.hour > 23 {
            return Err(ApiError::bad_request("小时必须在0-23之间"));
        }
        Ok(())
    }
}

pub(crate) async fn calculate_bazi(
    State(state): State<SharedState>,
    payload: Result<Json<BirthData>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(birth) = payload?;
    birth.check_ranges()?;
    let input = BirthInput::parse(
        birth.year,
        birth.month,
        birth.day,
        birth.hour,
        &birth.gender,
        &birth.calendar_type,
    )?;

    let worker = state.clone();
    let mut result = tokio::task::spawn_blocking(move || worker.service.calculate(&input)).await??;

    let name = birth
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("匿名用户");
    if let Value::Object(map) = &mut result {
        map.insert(
            "user_info".to_string(),
            json!({
                "name": name,
                "birth_date": format!("{}-{:02}-{:02}", birth.year, birth.month, birth.day),
                "birth_time": format!("{:02}:00", birth.hour),
                "gender": input.gender,
            }),
        );
    }
    respond_with(result, &[("disclaimer", DISCLAIMER)])
}

#[derive(Debug, Deserialize)]
pub(crate) struct LunarConvert {
    year: i32,
    month: u32,
    day: u32,
    #[serde(default)]
    leap: bool,
}

pub(crate) async fn lunar_to_solar(
    State(state): State<SharedState>,
    payload: Result<Json<LunarConvert>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;
    let current = Local::now().year();
    if !(1900..=current + 1).contains(&req.year) {
        return Err(ApiError::bad_request("农历年份不在有效范围内"));
    }
    let lunar = LunarDate::new(req.year, req.month, req.day, req.leap);
    let calendar = state.service.lunar_calendar();
    let solar = calendar.lunar_to_solar(lunar)?;
    respond(json!({
        "solar_date": solar,
        "lunar_date": lunar,
        "method": calendar.method(),
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SolarConvert {
    year: i32,
    month: u32,
    day: u32,
}

pub(crate) async fn solar_to_lunar(
    State(state): State<SharedState>,
    payload: Result<Json<SolarConvert>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;
    let solar = SolarDate::new(req.year, req.month, req.day);
    let calendar = state.service.lunar_calendar();
    let lunar = calendar.solar_to_lunar(solar)?;
    respond(json!({
        "lunar_date": lunar,
        "solar_date": solar,
        "method": calendar.method(),
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZodiacRequest {
    #[serde(alias = "zodiac1")]
    male_zodiac: String,
    #[serde(alias = "zodiac2")]
    female_zodiac: String,
}

pub(crate) async fn zodiac_matching(
    payload: Result<Json<ZodiacRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;
    let report = zodiac::match_labels(req.male_zodiac.trim(), req.female_zodiac.trim())?;
    info!("[ZODIAC] {} scored {}", report.zodiac_pair, report.overall_score);
    respond(report)
}

fn target_date(raw: Option<&str>) -> ApiResult<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(fortune::parse_date(s)?),
        None => Ok(today()),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyFortuneRequest {
    #[serde(default)]
    bazi_data: PersonalBazi,
    #[serde(default)]
    target_date: Option<String>,
    #[serde(default)]
    user_age: Option<u32>,
}

pub(crate) async fn daily_fortune(
    payload: Result<Json<DailyFortuneRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;
    let date = target_date(req.target_date.as_deref())?;
    let day_master = req.bazi_data.day_master()?;
    let fortune = fortune::daily_fortune(day_master, date, req.user_age.unwrap_or(DEFAULT_AGE));
    respond(fortune)
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchFortuneRequest {
    #[serde(default)]
    members: Vec<MemberInput>,
    #[serde(default)]
    target_date: Option<String>,
}

pub(crate) async fn daily_fortune_batch(
    payload: Result<Json<BatchFortuneRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;
    let date = target_date(req.target_date.as_deref())?;
    respond(fortune::batch_fortune(&req.members, date))
}

pub(crate) async fn festivals() -> ApiResult<Json<Value>> {
    respond(FestivalList::as_of(today()))
}

pub(crate) async fn cache_stats(State(state): State<SharedState>) -> ApiResult<Json<Value>> {
    if state.service.cache().is_none() {
        return Err(ApiError::bad_request("缓存未启用"));
    }
    let worker = state.clone();
    let stats = tokio::task::spawn_blocking(move || match worker.service.cache() {
        Some(cache) => cache.stats().map(Some),
        None => Ok(None),
    })
    .await?
    .map_err(|e| ApiError::internal(format!("读取缓存统计失败: {e}")))?;
    respond(stats)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClearExpired {
    #[serde(default)]
    max_age_days: Option<i64>,
}

pub(crate) async fn clear_expired(
    State(state): State<SharedState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let req: ClearExpired = optional_json(&body)?.unwrap_or_default();
    let days = req.max_age_days.unwrap_or(state.config.cache_cleanup_days);
    if days < 0 {
        return Err(ApiError::bad_request("max_age_days不能为负数"));
    }
    if days > MAX_AGE_LIMIT_DAYS {
        return Err(ApiError::bad_request(format!(
            "max_age_days不能超过{MAX_AGE_LIMIT_DAYS}"
        )));
    }
    if state.service.cache().is_none() {
        return Err(ApiError::bad_request("缓存未启用"));
    }
    let worker = state.clone();
    let removed = tokio::task::spawn_blocking(move || match worker.service.cache() {
        Some(cache) => cache.clear_expired(days),
        None => Ok(0),
    })
    .await?
    .map_err(|e| ApiError::internal(format!("清理缓存失败: {e}")))?;
    info!("[CACHE] removed {} entries older than {} days", removed, days);
    respond(json!({ "removed": removed, "max_age_days": days }))
}
