//! Service configuration. Precedence: env `BAZI_CONFIG` path >
//! `config/bazi.toml` > built-in defaults, then `BAZI__*` environment
//! overrides on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::{DEFAULT_CACHE_DIR, DEFAULT_MAX_AGE_DAYS};

pub const DEFAULT_CONFIG_PATH: &str = "config/bazi.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaziConfig {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    /// Reported by `/health`.
    pub environment: String,
    pub cache_enabled: bool,
    pub cache_dir: PathBuf,
    pub cache_max_age_days: i64,
    /// Age used by `/api/v1/cache/clear-expired` when the request names none.
    pub cache_cleanup_days: i64,
    /// Extra character dictionary merged over the built-in one.
    #[serde(default)]
    pub character_db_path: Option<PathBuf>,
    pub icon_dir: PathBuf,
    pub cors_allow_any: bool,
}

impl Default for BaziConfig {
    fn default() -> Self {
        Self {
            app_name: "八字运势小程序 API".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8001,
            environment: "development".to_string(),
            cache_enabled: true,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_max_age_days: DEFAULT_MAX_AGE_DAYS,
            cache_cleanup_days: 30,
            character_db_path: None,
            icon_dir: PathBuf::from("static/icons"),
            cors_allow_any: true,
        }
    }
}

impl BaziConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("BAZI_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Defaults, then `path` if it exists, then `BAZI__*` variables.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let d = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", d.app_name)?
            .set_default("host", d.host)?
            .set_default("port", d.port as i64)?
            .set_default("environment", d.environment)?
            .set_default("cache_enabled", d.cache_enabled)?
            .set_default("cache_dir", DEFAULT_CACHE_DIR)?
            .set_default("cache_max_age_days", d.cache_max_age_days)?
            .set_default("cache_cleanup_days", d.cache_cleanup_days)?
            .set_default("icon_dir", "static/icons")?
            .set_default("cors_allow_any", d.cors_allow_any)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(config::Environment::with_prefix("BAZI").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BaziConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.port, 8001);
        assert_eq!(cfg.cache_dir, PathBuf::from("cache"));
        assert_eq!(cfg.cache_max_age_days, 365);
        assert!(cfg.character_db_path.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazi.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "port = 9100\ncache_enabled = false\nenvironment = \"production\"").unwrap();
        let cfg = BaziConfig::load_from(&path).unwrap();
        assert_eq!(cfg.port, 9100);
        assert!(!cfg.cache_enabled);
        assert_eq!(cfg.environment, "production");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9100");
    }
}
