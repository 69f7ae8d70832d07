//! BaZi mini-program gateway: routing, CORS, request logging and the JSON
//! envelope shared by every endpoint. `main.rs` only loads config and serves.

mod handlers;
mod icons;
mod naming;

use axum::{
    body::{Body, Bytes},
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bazi_core::cache::format_timestamp;
use bazi_core::{
    BaziConfig, BaziError, BaziResult, BaziService, CalculationError, CharDictionary, NameEngine,
    NamingError, ResultCache, ZodiacError,
};
use chrono::Local;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Built once at start-up and shared by every handler.
pub struct AppState {
    pub config: BaziConfig,
    pub service: BaziService,
    pub names: NameEngine,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Opens the cache and the character dictionary named by `config`.
    /// A cache directory that cannot be created disables caching.
    pub fn from_config(config: BaziConfig) -> BaziResult<Self> {
        let cache = if config.cache_enabled {
            match ResultCache::open(Some(&config.cache_dir), config.cache_max_age_days) {
                Ok(cache) => {
                    info!("[CACHE] using {}", cache.dir().display());
                    Some(cache)
                }
                Err(e) => {
                    warn!("[CACHE] disabled, cannot open {}: {}", config.cache_dir.display(), e);
                    None
                }
            }
        } else {
            None
        };
        let dict = match &config.character_db_path {
            Some(path) => CharDictionary::load(path)?,
            None => CharDictionary::builtin(),
        };
        info!("[NAMING] dictionary ready with {} characters", dict.len());
        Ok(Self {
            service: BaziService::new(cache),
            names: NameEngine::new(dict),
            config,
        })
    }
}

pub fn build_app(state: SharedState) -> Router {
    let cors = if state.config.cors_allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/docs", get(handlers::docs))
        .route("/api/v1/calculate-bazi", post(handlers::calculate_bazi))
        .route("/api/v1/lunar-to-solar", post(handlers::lunar_to_solar))
        .route("/api/v1/solar-to-lunar", post(handlers::solar_to_lunar))
        .route("/api/v1/naming/generate-names", post(naming::generate_names))
        .route("/api/v1/naming/evaluate-name", post(naming::evaluate_name))
        .route("/api/v1/naming/personalized-generate", post(naming::personalized_generate))
        .route("/api/v1/naming/search-characters", post(naming::search_characters))
        .route("/api/v1/naming/character-combinations", post(naming::character_combinations))
        .route("/api/v1/naming/database-stats", get(naming::database_stats))
        .route("/api/v1/naming/wuxing-chars", get(naming::wuxing_chars))
        .route("/api/v1/naming/char-info/:char", get(naming::char_info))
        .route("/api/v1/zodiac-matching", post(handlers::zodiac_matching))
        .route("/api/v1/daily-fortune", post(handlers::daily_fortune))
        .route("/api/v1/daily-fortune/batch", post(handlers::daily_fortune_batch))
        .route("/api/v1/festivals", get(handlers::festivals))
        .route("/api/v1/tab-icons/config", get(icons::icon_config))
        .route("/api/v1/tab-icons/themes/available", get(icons::themes))
        .route("/api/v1/tab-icons/batch-download", post(icons::batch_download))
        .route("/api/v1/tab-icons/:name", get(icons::icon))
        .route("/api/v1/cache/stats", get(handlers::cache_stats))
        .route("/api/v1/cache/clear-expired", post(handlers::clear_expired))
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(log_traffic))
}

async fn log_traffic(request: Request<Body>, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let mut response = next.run(request).await;
    info!(
        "[HTTP] {} {} {} -> {} ({} ms)",
        id,
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

pub(crate) fn timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

/// `{success, data, timestamp}`.
pub(crate) fn respond<T: Serialize>(data: T) -> ApiResult<Json<Value>> {
    respond_with(data, &[])
}

/// Envelope plus extra top-level fields such as a disclaimer.
pub(crate) fn respond_with<T: Serialize>(data: T, extra: &[(&str, &str)]) -> ApiResult<Json<Value>> {
    let data = serde_json::to_value(data).map_err(BaziError::from)?;
    let mut body = json!({
        "success": true,
        "data": data,
        "timestamp": timestamp(),
    });
    if let Value::Object(map) = &mut body {
        for (k, v) in extra {
            map.insert((*k).to_string(), Value::from(*v));
        }
    }
    Ok(Json(body))
}

/// Parses a JSON body that may be omitted entirely.
pub(crate) fn optional_json<T: DeserializeOwned>(body: &Bytes) -> ApiResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::bad_request(format!("请求数据格式错误: {e}")))
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Rendered as `{"error": message}`.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("[SYSTEM] {}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<BaziError> for ApiError {
    fn from(e: BaziError) -> Self {
        if e.is_client_error() {
            Self::bad_request(e.to_string())
        } else {
            Self::internal(e.to_string())
        }
    }
}

impl From<CalculationError> for ApiError {
    fn from(e: CalculationError) -> Self {
        BaziError::from(e).into()
    }
}

impl From<NamingError> for ApiError {
    fn from(e: NamingError) -> Self {
        BaziError::from(e).into()
    }
}

impl From<ZodiacError> for ApiError {
    fn from(e: ZodiacError) -> Self {
        BaziError::from(e).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(format!("请求数据格式错误: {}", e.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::bad_request(format!("查询参数错误: {}", e.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::internal(format!("后台任务失败: {e}"))
    }
}
