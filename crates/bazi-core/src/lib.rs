//! BaZi core: shared calculators for the mini-program backend.
//! Pillars, five-element analysis, naming, zodiac matching, daily fortune
//! and the flat-file result cache.

pub mod cache;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod error;
pub mod festivals;
pub mod fortune;
pub mod ganzhi;
pub mod naming;
pub mod narrative;
pub mod report;
pub mod wuxing;
pub mod zodiac;

pub use cache::{CacheStats, ResultCache};
pub use calendar::{ApproximateLunarCalendar, CalendarType, LunarCalendar, LunarDate, SolarDate};
pub use chart::{calculate_chart, BirthInput, Chart, Gender};
pub use config::BaziConfig;
pub use error::{BaziError, BaziResult, CacheError, CalculationError, NamingError, ZodiacError};
pub use ganzhi::{Branch, Element, Pillar, Stem};
pub use naming::{CharDictionary, NameEngine, NameGender};
pub use report::{BaziReport, BaziService};
pub use wuxing::{ElementHistogram, WuxingProfile};
pub use zodiac::{Compatibility, Zodiac};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Start-up check over every static table.
pub fn validate_tables() -> Result<(), String> {
    ganzhi::validate_tables()?;
    zodiac::validate_tables()
}
