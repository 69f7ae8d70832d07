//! Result cache against a real directory:
//! - save then load returns the stored result unchanged
//! - an entry back-dated past the max age loads as None and is deleted
//! - corrupt files are treated as misses and removed
//! - clear_expired and stats count what is on disk
//! - age windows outside 0..=MAX_AGE_LIMIT_DAYS are errors, not panics
//! - the service serves a second identical request from the cache

use bazi_core::cache::{cache_key, MAX_AGE_LIMIT_DAYS};
use bazi_core::{BaziService, BirthInput, CacheError, CalendarType, Gender, ResultCache};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::json;
use std::fs;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn input() -> BirthInput {
    BirthInput::new(1990, 5, 15, 14, Gender::Male, CalendarType::Solar)
}

#[test]
fn round_trip_returns_stored_result() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(Some(dir.path()), 365).unwrap();
    let result = json!({"bazi": {"year": "庚午"}, "n": [1, 2, 3]});
    cache.save_at(&input(), &result, now()).unwrap();
    assert_eq!(cache.load_at(&input(), now()), Some(result));
    assert!(cache
        .path_for(&input())
        .ends_with("bazi_b0b3b8bc7ab20ad7ae62bbbfec38a128.json"));
    assert_eq!(cache_key(&input()), "bazi_b0b3b8bc7ab20ad7ae62bbbfec38a128");
}

#[test]
fn back_dated_entry_is_a_miss_and_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(Some(dir.path()), 365).unwrap();
    let old = now() - Duration::days(366);
    cache.save_at(&input(), &json!({"x": 1}), old).unwrap();
    assert!(cache.path_for(&input()).exists());
    assert_eq!(cache.load_at(&input(), now()), None);
    assert!(!cache.path_for(&input()).exists());
}

#[test]
fn corrupt_entry_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(Some(dir.path()), 365).unwrap();
    fs::write(cache.path_for(&input()), b"{not json").unwrap();
    assert_eq!(cache.load_at(&input(), now()), None);
    assert!(!cache.path_for(&input()).exists());
}

#[test]
fn clear_expired_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(Some(dir.path()), 365).unwrap();
    let fresh = input();
    let stale = BirthInput::new(1985, 1, 2, 3, Gender::Female, CalendarType::Solar);
    cache.save_at(&fresh, &json!({"a": 1}), now()).unwrap();
    cache
        .save_at(&stale, &json!({"b": 2}), now() - Duration::days(400))
        .unwrap();

    let stats = cache.stats_at(now()).unwrap();
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.valid_count, 1);
    assert_eq!(stats.expired_count, 1);

    assert_eq!(cache.clear_expired_at(30, now()).unwrap(), 1);
    assert!(cache.path_for(&fresh).exists());
    assert!(!cache.path_for(&stale).exists());
}

#[test]
fn oversized_age_window_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(Some(dir.path()), 365).unwrap();
    cache.save_at(&input(), &json!({"a": 1}), now()).unwrap();

    for days in [100_000_000, i64::MAX, -1] {
        assert!(matches!(
            cache.clear_expired_at(days, now()),
            Err(CacheError::InvalidMaxAge { .. })
        ));
    }
    assert!(cache.path_for(&input()).exists());
    assert_eq!(cache.clear_expired_at(MAX_AGE_LIMIT_DAYS, now()).unwrap(), 0);

    assert!(matches!(
        ResultCache::open(Some(dir.path()), 100_000_000),
        Err(CacheError::InvalidMaxAge { days: 100_000_000, .. })
    ));
}

#[test]
fn service_serves_repeat_requests_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(Some(dir.path()), 365).unwrap();
    let svc = BaziService::new(Some(cache)).with_clock(now);
    let first = svc.calculate(&input()).unwrap();
    assert!(svc.cache().unwrap().path_for(&input()).exists());
    let second = svc.calculate(&input()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first["bazi"]["day"], "丙午");
    assert!(svc.verify_consistency(&input(), 3).unwrap());
}
