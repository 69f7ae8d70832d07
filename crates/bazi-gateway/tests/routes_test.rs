//! Routes exercised through the router built by `build_app`:
//! - status, health and docs
//! - calculate-bazi success, caching and input validation
//! - naming, zodiac, fortune and festival envelopes
//! - tab icons served from the configured directory
//! - cache maintenance endpoints

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bazi_core::BaziConfig;
use bazi_gateway::{build_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app(dir: &TempDir) -> Router {
    let config = BaziConfig {
        cache_dir: dir.path().join("cache"),
        icon_dir: dir.path().join("icons"),
        ..BaziConfig::default()
    };
    build_app(Arc::new(AppState::from_config(config).unwrap()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

#[tokio::test]
async fn health_and_docs() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = get(app(&dir), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["environment"], "development");

    let (status, json) = get(app(&dir), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "八字运势小程序 API 服务正常运行");

    let (_, json) = get(app(&dir), "/docs").await;
    assert!(json["routes"].as_array().unwrap().len() > 20);
}

#[tokio::test]
async fn calculate_bazi_reference_chart() {
    let dir = tempfile::tempdir().unwrap();
    let body = json!({"year": 1990, "month": 5, "day": 15, "hour": 14, "gender": "male"});
    let (status, json) = post(app(&dir), "/api/v1/calculate-bazi", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    for pillar in ["year", "month", "day", "hour"] {
        assert_eq!(data["bazi"][pillar].as_str().unwrap().chars().count(), 2);
    }
    assert_eq!(data["bazi"]["day"], "丙午");
    let total: u64 = data["wuxing"].as_object().unwrap().values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 8);
    assert_eq!(data["user_info"]["name"], "匿名用户");
    assert_eq!(data["user_info"]["birth_date"], "1990-05-15");
    assert_eq!(data["user_info"]["birth_time"], "14:00");
    assert!(json["disclaimer"].as_str().unwrap().contains("仅供娱乐参考"));

    let cached = std::fs::read_dir(dir.path().join("cache")).unwrap().count();
    assert_eq!(cached, 1);
    let (status, again) = post(app(&dir), "/api/v1/calculate-bazi", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["data"]["bazi"], data["bazi"]);
}

#[tokio::test]
async fn calculate_bazi_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    for body in [
        json!({"year": 1990, "month": 5, "day": 15, "hour": 24}),
        json!({"year": 1899, "month": 5, "day": 15}),
        json!({"year": 1990, "month": 13, "day": 15}),
        json!({"year": 1990, "month": 2, "day": 30}),
        json!({"year": 1990, "month": 5, "day": 15, "gender": "robot"}),
        json!({"month": 5, "day": 15}),
    ] {
        let (status, json) = post(app(&dir), "/api/v1/calculate-bazi", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(json["error"].is_string(), "{body}");
    }
}

#[tokio::test]
async fn calendar_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = post(
        app(&dir),
        "/api/v1/lunar-to-solar",
        json!({"year": 1990, "month": 4, "day": 21}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["lunar_date"]["leap"], false);
    assert_eq!(json["data"]["method"], "approximate");

    let (status, _) = post(app(&dir), "/api/v1/solar-to-lunar", json!({"year": 1990, "month": 2, "day": 30})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn naming_routes() {
    let dir = tempfile::tempdir().unwrap();
    let birth = json!({
        "surname": "王", "gender": "male",
        "birth_year": 1990, "birth_month": 5, "birth_day": 15, "birth_hour": 14,
        "count": 5
    });
    let (status, json) = post(app(&dir), "/api/v1/naming/generate-names", birth).await;
    assert_eq!(status, StatusCode::OK);
    for rec in json["data"]["recommendations"].as_array().unwrap() {
        let score = rec["overall_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
    }

    let (status, json) = post(
        app(&dir),
        "/api/v1/naming/evaluate-name",
        json!({"surname": "王", "given_name": "明轩", "gender": "male",
               "birth_year": 1990, "birth_month": 5, "birth_day": 15}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["evaluation"]["full_name"], "王明轩");
    assert_eq!(json["data"]["input_info"]["birth_date"], "1990-05-15");

    let (status, _) = post(
        app(&dir),
        "/api/v1/naming/character-combinations",
        json!({"wuxing_list": ["木"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = get(app(&dir), "/api/v1/naming/wuxing-chars?wuxing=%E6%B0%B4&gender=female").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["wuxing"], "水");
    assert_eq!(json["data"]["count"], json["data"]["chars"].as_array().unwrap().len());

    let (status, _) = get(app(&dir), "/api/v1/naming/wuxing-chars?wuxing=%E9%A3%8E").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = get(app(&dir), "/api/v1/naming/database-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["total_chars"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn zodiac_matching() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = post(
        app(&dir),
        "/api/v1/zodiac-matching",
        json!({"male_zodiac": "牛", "female_zodiac": "猪"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["overall_score"], 82);

    let (status, json) = post(app(&dir), "/api/v1/zodiac-matching", json!({"zodiac1": "猫", "zodiac2": "猪"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains('猫'));
}

#[tokio::test]
async fn daily_fortune_and_festivals() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = post(
        app(&dir),
        "/api/v1/daily-fortune",
        json!({"bazi_data": {"day_pillar": "丙午"}, "target_date": "1900-01-31"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["overall_score"], 3.5);

    let (status, _) = post(
        app(&dir),
        "/api/v1/daily-fortune",
        json!({"bazi_data": {"day_pillar": "丙午"}, "target_date": "31/01/1900"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = post(
        app(&dir),
        "/api/v1/daily-fortune/batch",
        json!({"members": [
            {"id": "1", "name": "爸爸", "bazi_data": {"day": "丙午"}},
            {"id": "2", "name": "未知", "bazi_data": {}}
        ], "target_date": "1900-01-31"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_members"], 2);
    assert_eq!(json["data"]["family_overview"]["active_members"], 1);

    let (status, json) = get(app(&dir), "/api/v1/festivals").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 5);
}

#[tokio::test]
async fn tab_icons() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("icons")).unwrap();
    std::fs::write(dir.path().join("icons/bazi_selected.png"), b"\x89PNG").unwrap();

    let req = Request::builder()
        .uri("/api/v1/tab-icons/bazi?style=selected")
        .body(Body::empty())
        .unwrap();
    let res = app(&dir).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert_eq!(res.headers()["cache-control"], "public, max-age=3600");
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNG");

    let (status, _) = get(app(&dir), "/api/v1/tab-icons/bazi").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(app(&dir), "/api/v1/tab-icons/weather").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(app(&dir), "/api/v1/tab-icons/bazi?style=bold").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = get(app(&dir), "/api/v1/tab-icons/config").await;
    assert_eq!(json["data"]["default_colors"]["selected"], "#C8860D");
    assert_eq!(json["data"]["icons"]["zodiac"]["type"], "heart");
    let (_, json) = get(app(&dir), "/api/v1/tab-icons/themes/available").await;
    assert_eq!(json["data"]["themes"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn cache_maintenance() {
    let dir = tempfile::tempdir().unwrap();
    post(app(&dir), "/api/v1/calculate-bazi", json!({"year": 1985, "month": 1, "day": 2})).await;
    let (status, json) = get(app(&dir), "/api/v1/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_files"], 1);

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/cache/clear-expired")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app(&dir), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["removed"], 0);
    assert_eq!(json["data"]["max_age_days"], 30);

    for days in [100_000_000i64, -1] {
        let (status, json) =
            post(app(&dir), "/api/v1/cache/clear-expired", json!({ "max_age_days": days })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("max_age_days"));
    }
    let (_, json) = get(app(&dir), "/api/v1/cache/stats").await;
    assert_eq!(json["data"]["total_files"], 1);
}

#[tokio::test]
async fn extended_dictionary_is_merged() {
    let dir = tempfile::tempdir().unwrap();
    let builtin = {
        let (_, json) = get(app(&dir), "/api/v1/naming/database-stats").await;
        json["data"]["total_chars"].as_u64().unwrap()
    };
    let config = BaziConfig {
        cache_enabled: false,
        character_db_path: Some(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/characters.json"),
        ),
        ..BaziConfig::default()
    };
    let extended = build_app(Arc::new(AppState::from_config(config).unwrap()));
    let (_, json) = get(extended, "/api/v1/naming/database-stats").await;
    assert!(json["data"]["total_chars"].as_u64().unwrap() >= builtin);

    let (status, json) = get(app(&dir), "/api/v1/naming/char-info/%E6%98%8E").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["char"], "明");
    let (status, _) = get(app(&dir), "/api/v1/naming/char-info/ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = BaziConfig {
        cache_enabled: false,
        character_db_path: Some(dir.path().join("absent.json")),
        ..BaziConfig::default()
    };
    assert!(AppState::from_config(missing).is_err());
}
