//! Naming and zodiac matching end to end:
//! - every generated name scores within [0, 100] and is unique
//! - recommendations are sorted best first
//! - zodiac compatibility is symmetric in its dimension scores
//! - the 牛/猪 pairing lands on its fixed total

use bazi_core::naming::NamingRequest;
use bazi_core::zodiac::{compatibility, match_labels, pair_scores, Tier};
use bazi_core::{calculate_chart, CharDictionary, NameEngine, NameGender, SolarDate, Zodiac};
use std::collections::HashSet;

#[test]
fn generated_names_are_bounded_unique_and_sorted() {
    let engine = NameEngine::new(CharDictionary::builtin());
    let chart = calculate_chart(SolarDate::new(2024, 3, 10), 8).unwrap();
    for gender in [NameGender::Male, NameGender::Female] {
        let mut req = NamingRequest::new("李", gender);
        req.count = Some(20);
        let out = engine.generate(&req, &chart).unwrap();
        assert!(!out.recommendations.is_empty());
        assert_eq!(out.recommendations.len() + out.shortfall, out.requested_count);

        let mut seen = HashSet::new();
        for rec in &out.recommendations {
            assert!((0.0..=100.0).contains(&rec.overall_score), "{}", rec.full_name);
            assert!(rec.full_name.starts_with('李'));
            assert!(seen.insert(rec.full_name.clone()), "duplicate {}", rec.full_name);
        }
        for pair in out.recommendations.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
    }
}

#[test]
fn single_character_names() {
    let engine = NameEngine::new(CharDictionary::builtin());
    let chart = calculate_chart(SolarDate::new(1990, 5, 15), 14).unwrap();
    let mut req = NamingRequest::new("王", NameGender::Neutral);
    req.name_length = 1;
    let out = engine.generate(&req, &chart).unwrap();
    for rec in &out.recommendations {
        assert_eq!(rec.given_name.chars().count(), 1);
    }
}

#[test]
fn dimension_scores_are_symmetric() {
    for a in Zodiac::ALL {
        for b in Zodiac::ALL {
            assert_eq!(pair_scores(a, b), pair_scores(b, a), "{a}/{b}");
        }
    }
}

#[test]
fn ox_and_pig() {
    let c = compatibility(Zodiac::Ox, Zodiac::Pig);
    assert_eq!(c.overall_score, 82);
    assert_eq!(Tier::from_score(c.overall_score), Tier::Excellent);
    assert_eq!(match_labels("牛", "猪").unwrap().overall_score, 82);
    assert!(match_labels("猫", "猪").is_err());
}
