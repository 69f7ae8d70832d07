//! Flat-file result cache: one `bazi_<md5>.json` per normalised birth input.
//!
//! The key is the md5 of the input serialised with sorted keys and `", "` /
//! `": "` separators, so files written by older deployments still hit.
//! Corrupt, incomplete or stale entries are deleted on read and reported as a
//! miss. No locking; concurrent writers race and the last one wins.

use chrono::{Local, NaiveDateTime, TimeDelta};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::chart::BirthInput;
use crate::error::{CacheError, CacheResult};

pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_MAX_AGE_DAYS: i64 = 365;
/// Upper bound for any age window, about a century.
pub const MAX_AGE_LIMIT_DAYS: i64 = 36_500;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const REQUIRED_KEYS: [&str; 4] = ["input", "result", "timestamp", "cache_key"];

/// md5 over the canonical JSON form of the input.
pub fn input_hash(input: &BirthInput) -> String {
    let canonical = format!(
        r#"{{"calendar_type": "{}", "day": {}, "gender": "{}", "hour": {}, "month": {}, "year": {}}}"#,
        input.calendar_type.as_str(),
        input.day,
        input.gender.as_str(),
        input.hour,
        input.month,
        input.year,
    );
    hex::encode(Md5::digest(canonical.as_bytes()))
}

pub fn cache_key(input: &BirthInput) -> String {
    format!("bazi_{}", input_hash(input))
}

fn age_window(days: i64) -> CacheResult<TimeDelta> {
    let invalid = CacheError::InvalidMaxAge { days, max: MAX_AGE_LIMIT_DAYS };
    if !(0..=MAX_AGE_LIMIT_DAYS).contains(&days) {
        return Err(invalid);
    }
    TimeDelta::try_days(days).ok_or(invalid)
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub input: BirthInput,
    pub result: Value,
    pub timestamp: String,
    pub cache_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_files: usize,
    pub valid_count: usize,
    pub expired_count: usize,
    pub total_size_mb: f64,
    pub cache_directory: String,
}

pub struct ResultCache {
    dir: PathBuf,
    max_age: TimeDelta,
}

impl ResultCache {
    /// Opens (and creates) the cache directory. `max_age_days` must be
    /// within `0..=MAX_AGE_LIMIT_DAYS`.
    pub fn open(dir: Option<impl AsRef<Path>>, max_age_days: i64) -> CacheResult<Self> {
        let max_age = age_window(max_age_days)?;
        let dir = dir
            .map(|d| d.as_ref().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_age })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, input: &BirthInput) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(input)))
    }

    pub fn save(&self, input: &BirthInput, result: &Value) -> CacheResult<()> {
        self.save_at(input, result, Local::now().naive_local())
    }

    pub fn save_at(&self, input: &BirthInput, result: &Value, now: NaiveDateTime) -> CacheResult<()> {
        let entry = CacheEntry {
            input: *input,
            result: result.clone(),
            timestamp: format_timestamp(now),
            cache_key: cache_key(input),
        };
        let path = self.path_for(input);
        fs::write(&path, serde_json::to_vec_pretty(&entry)?)?;
        debug!("[CACHE] saved {}", entry.cache_key);
        Ok(())
    }

    pub fn load(&self, input: &BirthInput) -> Option<Value> {
        self.load_at(input, Local::now().naive_local())
    }

    /// Hit returns the stored result untouched. Anything unusable is removed.
    pub fn load_at(&self, input: &BirthInput, now: NaiveDateTime) -> Option<Value> {
        let path = self.path_for(input);
        if !path.exists() {
            return None;
        }
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("[CACHE] read failed for {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice::<Value>(&raw) {
            Ok(mut entry) if self.is_valid(&entry, now) => {
                debug!("[CACHE] hit {}", cache_key(input));
                entry.get_mut("result").map(Value::take)
            }
            Ok(_) => {
                warn!("[CACHE] dropping stale or incomplete entry {}", path.display());
                remove(&path);
                None
            }
            Err(e) => {
                warn!("[CACHE] dropping corrupt entry {}: {}", path.display(), e);
                remove(&path);
                None
            }
        }
    }

    pub fn invalidate(&self, input: &BirthInput) -> CacheResult<bool> {
        let path = self.path_for(input);
        if path.exists() {
            fs::remove_file(path)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn is_valid(&self, entry: &Value, now: NaiveDateTime) -> bool {
        if !REQUIRED_KEYS.iter().all(|k| entry.get(k).is_some()) {
            return false;
        }
        match entry_time(entry) {
            Some(ts) => now - ts <= self.max_age,
            None => false,
        }
    }

    pub fn clear_expired(&self, max_age_days: i64) -> CacheResult<usize> {
        self.clear_expired_at(max_age_days, Local::now().naive_local())
    }

    /// Deletes entries older than `max_age_days` and any that fail to parse.
    pub fn clear_expired_at(&self, max_age_days: i64, now: NaiveDateTime) -> CacheResult<usize> {
        let window = age_window(max_age_days)?;
        let cutoff = now
            .checked_sub_signed(window)
            .ok_or(CacheError::InvalidMaxAge { days: max_age_days, max: MAX_AGE_LIMIT_DAYS })?;
        let mut cleared = 0;
        for path in self.entry_files()? {
            let fresh = fs::read(&path)
                .ok()
                .and_then(|raw| serde_json::from_slice::<Value>(&raw).ok())
                .and_then(|v| entry_time(&v))
                .is_some_and(|ts| ts >= cutoff);
            if !fresh {
                fs::remove_file(&path)?;
                cleared += 1;
            }
        }
        info!("[CACHE] cleared {} expired entries", cleared);
        Ok(cleared)
    }

    pub fn stats(&self) -> CacheResult<CacheStats> {
        self.stats_at(Local::now().naive_local())
    }

    pub fn stats_at(&self, now: NaiveDateTime) -> CacheResult<CacheStats> {
        let files = self.entry_files()?;
        let mut total_size = 0u64;
        let mut valid_count = 0;
        for path in &files {
            total_size += fs::metadata(path)?.len();
            let valid = fs::read(path)
                .ok()
                .and_then(|raw| serde_json::from_slice::<Value>(&raw).ok())
                .is_some_and(|v| self.is_valid(&v, now));
            if valid {
                valid_count += 1;
            }
        }
        let mb = total_size as f64 / (1024.0 * 1024.0);
        Ok(CacheStats {
            total_files: files.len(),
            valid_count,
            expired_count: files.len() - valid_count,
            total_size_mb: (mb * 100.0).round() / 100.0,
            cache_directory: self.dir.display().to_string(),
        })
    }

    fn entry_files(&self) -> CacheResult<Vec<PathBuf>> {
        let mut out = Vec::new();
        for dirent in fs::read_dir(&self.dir)? {
            let path = dirent?.path();
            let is_entry = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("bazi_") && n.ends_with(".json"));
            if is_entry {
                out.push(path);
            }
        }
        out.sort();
        Ok(out)
    }
}

fn entry_time(entry: &Value) -> Option<NaiveDateTime> {
    entry
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<NaiveDateTime>().ok())
}

fn remove(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("[CACHE] could not delete {}: {}", path.display(), e);
    }
}
