//! Tab-bar icons. PNGs are pre-rendered into `icon_dir` as
//! `{name}_{style}.png`; this module only catalogues and serves them.

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::{optional_json, respond, ApiError, ApiResult, SharedState};

const BASE_URL: &str = "/api/v1/tab-icons";
const ICON_SIZE: &str = "40x40";
const CACHE_SECONDS: u32 = 3600;
const STYLES: [&str; 2] = ["normal", "selected"];

#[derive(Clone, Copy, Debug, Serialize)]
struct IconSpec {
    #[serde(skip)]
    key: &'static str,
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    description: &'static str,
}

const ICONS: [IconSpec; 5] = [
    IconSpec { key: "bazi", name: "八字测算", kind: "taiji", description: "太极八卦图标" },
    IconSpec { key: "naming", name: "智能起名", kind: "baby_star", description: "婴儿+星星图标" },
    IconSpec { key: "festival", name: "节日列表", kind: "calendar", description: "日历图标" },
    IconSpec { key: "zodiac", name: "生肖配对", kind: "heart", description: "心形图标" },
    IconSpec { key: "profile", name: "个人中心", kind: "user", description: "用户图标" },
];

#[derive(Clone, Copy, Debug, Serialize)]
struct Colors {
    normal: &'static str,
    selected: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
struct Theme {
    name: &'static str,
    display_name: &'static str,
    colors: Colors,
    description: &'static str,
}

const DEFAULT_COLORS: Colors = Colors { normal: "#666666", selected: "#C8860D" };

const THEMES: [Theme; 4] = [
    Theme {
        name: "default",
        display_name: "默认主题",
        colors: DEFAULT_COLORS,
        description: "经典金色主题，适合传统文化应用",
    },
    Theme {
        name: "dark",
        display_name: "深色主题",
        colors: Colors { normal: "#888888", selected: "#FFD700" },
        description: "深色模式适配主题",
    },
    Theme {
        name: "spring",
        display_name: "春节主题",
        colors: Colors { normal: "#8B4513", selected: "#FF6B6B" },
        description: "春节红色喜庆主题",
    },
    Theme {
        name: "autumn",
        display_name: "秋季主题",
        colors: Colors { normal: "#A0522D", selected: "#FF8C00" },
        description: "秋季橙色温暖主题",
    },
];

fn icon_keys() -> Vec<&'static str> {
    ICONS.iter().map(|i| i.key).collect()
}

pub(crate) async fn icon_config() -> ApiResult<Json<Value>> {
    let icons: Map<String, Value> = ICONS
        .iter()
        .map(|i| (i.key.to_string(), json!(i)))
        .collect();
    respond(json!({
        "version": "1.0.0",
        "icon_size": ICON_SIZE,
        "default_colors": DEFAULT_COLORS,
        "icons": icons,
        "styles": STYLES,
        "supported_formats": ["PNG"],
    }))
}

pub(crate) async fn themes() -> ApiResult<Json<Value>> {
    respond(json!({
        "themes": THEMES,
        "default_theme": "default",
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThemeRequest {
    #[serde(default)]
    normal_color: Option<String>,
    #[serde(default)]
    selected_color: Option<String>,
    #[serde(default)]
    theme_name: Option<String>,
}

/// Download links for every icon/style pair.
pub(crate) async fn batch_download(body: Bytes) -> ApiResult<Json<Value>> {
    let theme: Option<ThemeRequest> = optional_json(&body)?;
    let normal = theme
        .as_ref()
        .and_then(|t| t.normal_color.clone())
        .unwrap_or_else(|| DEFAULT_COLORS.normal.to_string());
    let selected = theme
        .as_ref()
        .and_then(|t| t.selected_color.clone())
        .unwrap_or_else(|| DEFAULT_COLORS.selected.to_string());
    let theme_name = theme
        .as_ref()
        .and_then(|t| t.theme_name.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut icons = Map::new();
    for spec in &ICONS {
        let mut styles = Map::new();
        for style in STYLES {
            let color = if style == "selected" { &selected } else { &normal };
            styles.insert(
                style.to_string(),
                json!({
                    "url": format!("{BASE_URL}/{}?style={style}", spec.key),
                    "filename": format!("{}_{style}.png", spec.key),
                    "color": color,
                }),
            );
        }
        icons.insert(spec.key.to_string(), Value::Object(styles));
    }
    respond(json!({
        "icons": icons,
        "theme": { "name": theme_name, "colors": { "normal": normal, "selected": selected } },
        "config": { "icon_size": ICON_SIZE, "format": "PNG", "cache_duration": CACHE_SECONDS },
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct IconQuery {
    #[serde(default)]
    style: Option<String>,
}

pub(crate) async fn icon(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<IconQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Path(name) = path?;
    let Query(q) = query?;
    let spec = ICONS.iter().find(|i| i.key == name).ok_or_else(|| {
        ApiError::bad_request(format!("不支持的图标类型，支持的类型: {:?}", icon_keys()))
    })?;
    let style = q.style.as_deref().unwrap_or("normal");
    if !STYLES.contains(&style) {
        return Err(ApiError::bad_request(format!(
            "不支持的样式，支持的样式: {:?}",
            STYLES
        )));
    }

    let filename = format!("{}_{style}.png", spec.key);
    let file = state.config.icon_dir.join(&filename);
    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("[ICONS] missing {}", file.display());
            return Err(ApiError::not_found(format!("图标文件不存在: {filename}")));
        }
        Err(e) => return Err(ApiError::internal(format!("读取图标失败: {e}"))),
    };
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CACHE_CONTROL, format!("public, max-age={CACHE_SECONDS}")),
            (header::CONTENT_DISPOSITION, format!("inline; filename=\"{filename}\"")),
        ],
        bytes,
    )
        .into_response())
}
