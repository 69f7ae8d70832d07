//! 智能起名: character dictionary, 五格/三才 numerology and the name
//! generator built on both.

pub mod chardb;
pub mod generator;
pub mod numerology;

pub use chardb::{CharDictionary, CharEntry, CharRecord, DictionaryStats, NameGender};
pub use generator::{
    naming_suggestions, CharCombination, CharacterSearch, NameEngine, NameEvaluation, NamingOutcome,
    NamingRequest, Preferences,
};
pub use numerology::{LuckLevel, SancaiWuge};
