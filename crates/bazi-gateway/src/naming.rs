//! `/api/v1/naming/*` routes.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use bazi_core::chart::compute;
use bazi_core::naming::{NamingRequest, Preferences};
use bazi_core::{BirthInput, Chart, Element, Gender, NameGender, NamingError, WuxingProfile};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{respond, respond_with, ApiError, ApiResult, SharedState};

const EVALUATION_DISCLAIMER: &str = "名字评估基于传统五行理论和姓名学计算，仅供娱乐参考";

fn default_hour() -> u32 {
    12
}

fn default_calendar() -> String {
    "solar".to_string()
}

fn default_length() -> usize {
    2
}

fn default_gender() -> String {
    "neutral".to_string()
}

fn parse_element(label: &str) -> Result<Element, NamingError> {
    let label = label.trim();
    Element::from_label(label).ok_or_else(|| NamingError::UnknownElement(label.to_string()))
}

fn parse_gender(raw: Option<&str>) -> Result<NameGender, NamingError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NameGender::parse(s),
        None => Ok(NameGender::Neutral),
    }
}

/// Chart used to weigh candidate names. Gender does not affect the pillars.
fn birth_chart(
    state: &SharedState,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    calendar_type: &str,
) -> ApiResult<Chart> {
    let input = BirthInput::new(year, month, day, hour, Gender::Unknown, calendar_type.parse()?);
    Ok(compute(&input, state.service.lunar_calendar())?.chart)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamingBody {
    surname: String,
    gender: String,
    birth_year: i32,
    birth_month: u32,
    birth_day: u32,
    #[serde(default = "default_hour")]
    birth_hour: u32,
    #[serde(default = "default_calendar")]
    calendar_type: String,
    #[serde(default = "default_length")]
    name_length: usize,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    session_seed: Option<String>,
}

impl NamingBody {
    fn request(&self) -> Result<NamingRequest, NamingError> {
        let mut req = NamingRequest::new(self.surname.trim(), NameGender::parse(&self.gender)?);
        req.name_length = self.name_length;
        req.count = self.count;
        req.session_seed = self.session_seed.clone();
        Ok(req)
    }

    fn chart(&self, state: &SharedState) -> ApiResult<Chart> {
        birth_chart(
            state,
            self.birth_year,
            self.birth_month,
            self.birth_day,
            self.birth_hour,
            &self.calendar_type,
        )
    }
}

pub(crate) async fn generate_names(
    State(state): State<SharedState>,
    payload: Result<Json<NamingBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    let req = body.request()?;
    let chart = body.chart(&state)?;
    respond(state.names.generate(&req, &chart)?)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonalizedBody {
    #[serde(flatten)]
    base: NamingBody,
    #[serde(default)]
    cultural_level: Option<String>,
    #[serde(default)]
    popularity: Option<String>,
    #[serde(default)]
    era_style: Option<String>,
    #[serde(default)]
    rarity: Option<String>,
    #[serde(default)]
    selected_chars: Option<Vec<String>>,
    #[serde(default)]
    meaning_keywords: Option<Vec<String>>,
    #[serde(default)]
    preferences: Option<Preferences>,
}

impl PersonalizedBody {
    /// The nested `preferences` object wins over top-level fields.
    fn preferences(&self) -> Preferences {
        let mut prefs = self.preferences.clone().unwrap_or_default();
        prefs.cultural_level = prefs.cultural_level.or_else(|| self.cultural_level.clone());
        prefs.popularity = prefs.popularity.or_else(|| self.popularity.clone());
        prefs.era = prefs.era.or_else(|| self.era_style.clone());
        prefs.rarity = prefs.rarity.or_else(|| self.rarity.clone());
        if prefs.selected_chars.is_empty() {
            prefs.selected_chars = self.selected_chars.clone().unwrap_or_default();
        }
        if prefs.meaning_keywords.is_empty() {
            prefs.meaning_keywords = self.meaning_keywords.clone().unwrap_or_default();
        }
        prefs
    }
}

pub(crate) async fn personalized_generate(
    State(state): State<SharedState>,
    payload: Result<Json<PersonalizedBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    let req = body.base.request()?;
    let chart = body.base.chart(&state)?;
    let prefs = body.preferences();
    respond(state.names.generate_personalized(&req, &chart, &prefs)?)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateBody {
    surname: String,
    given_name: String,
    #[serde(default = "default_gender")]
    gender: String,
    #[serde(alias = "year")]
    birth_year: i32,
    #[serde(alias = "month")]
    birth_month: u32,
    #[serde(alias = "day")]
    birth_day: u32,
    #[serde(default = "default_hour", alias = "hour")]
    birth_hour: u32,
    #[serde(default = "default_calendar")]
    calendar_type: String,
}

pub(crate) async fn evaluate_name(
    State(state): State<SharedState>,
    payload: Result<Json<EvaluateBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    let surname = body.surname.trim();
    let given = body.given_name.trim();
    if surname.is_empty() || given.is_empty() {
        return Err(ApiError::bad_request("姓氏和名字不能为空"));
    }
    if surname.chars().count() > 3 || given.chars().count() > 2 {
        return Err(ApiError::bad_request("姓氏不能超过3个字，名字不能超过2个字"));
    }
    let gender = parse_gender(Some(&body.gender))?;
    let chart = birth_chart(
        &state,
        body.birth_year,
        body.birth_month,
        body.birth_day,
        body.birth_hour,
        &body.calendar_type,
    )?;
    let profile = WuxingProfile::from_chart(&chart);
    let evaluation = state.names.evaluate(surname, given, &profile)?;
    respond_with(
        json!({
            "evaluation": evaluation,
            "bazi_analysis": profile,
            "input_info": {
                "full_name": format!("{surname}{given}"),
                "gender": gender,
                "birth_date": format!("{}-{:02}-{:02}", body.birth_year, body.birth_month, body.birth_day),
            },
        }),
        &[("disclaimer", EVALUATION_DISCLAIMER)],
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody {
    keyword: String,
    #[serde(default)]
    wuxing: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

pub(crate) async fn search_characters(
    State(state): State<SharedState>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    if body.keyword.trim().is_empty() {
        return Err(ApiError::bad_request("搜索关键词不能为空"));
    }
    let element = body.wuxing.as_deref().map(parse_element).transpose()?;
    let gender = parse_gender(body.gender.as_deref())?;
    respond(state.names.search(&body.keyword, element, gender, body.count))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CombinationBody {
    wuxing_list: Vec<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

pub(crate) async fn character_combinations(
    State(state): State<SharedState>,
    payload: Result<Json<CombinationBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    let elements = body
        .wuxing_list
        .iter()
        .map(|w| parse_element(w))
        .collect::<Result<Vec<_>, _>>()?;
    let gender = parse_gender(body.gender.as_deref())?;
    let recommendations = state.names.combinations(&elements, gender, body.count)?;
    respond(json!({
        "wuxing_list": elements,
        "total_count": recommendations.len(),
        "recommendations": recommendations,
    }))
}

pub(crate) async fn database_stats(State(state): State<SharedState>) -> ApiResult<Json<Value>> {
    respond(state.names.dictionary().stats())
}

#[derive(Debug, Deserialize)]
pub(crate) struct WuxingQuery {
    #[serde(default)]
    wuxing: Option<String>,
    #[serde(default)]
    gender: Option<String>,
}

pub(crate) async fn wuxing_chars(
    State(state): State<SharedState>,
    query: Result<Query<WuxingQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(q) = query?;
    let element = parse_element(q.wuxing.as_deref().unwrap_or("木"))?;
    let gender = parse_gender(q.gender.as_deref())?;
    let chars = state.names.dictionary().chars_by_element(element, None, gender);
    respond(json!({
        "wuxing": element,
        "gender": gender,
        "count": chars.len(),
        "chars": chars,
    }))
}

pub(crate) async fn char_info(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(raw) = path?;
    let mut chars = raw.trim().chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(ApiError::bad_request("请提供一个有效的汉字")),
    };
    match state.names.dictionary().entry(c) {
        Some(info) => respond(json!({ "char": c, "info": info })),
        None => Err(ApiError::not_found(format!("字库中没有'{c}'"))),
    }
}
