//! Integration tests for difficulty, tier and path vocabulary.

use arealogic_foundation::{Difficulty, PathKind, RefillKind, Tier};

// =============================================================================
// Difficulty
// =============================================================================

#[test]
fn difficulty_keywords_roundtrip() {
    for difficulty in Difficulty::ALL {
        assert_eq!(Difficulty::from_keyword(difficulty.keyword()), Some(difficulty));
    }
    assert_eq!(Difficulty::from_keyword("hard"), None);
}

#[test]
fn difficulty_levels() {
    let levels: Vec<u8> = Difficulty::ALL.iter().map(|d| d.level()).collect();
    assert_eq!(levels, vec![0, 1, 3, 5]);
    assert!(Difficulty::Moki < Difficulty::Unsafe);
}

// =============================================================================
// Tiers
// =============================================================================

#[test]
fn seven_tiers_in_output_order() {
    let names: Vec<_> = Tier::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "moki",
            "gorlek",
            "gorlek_glitched",
            "kii",
            "kii_glitched",
            "unsafe",
            "unsafe_glitched",
        ]
    );
    for (i, tier) in Tier::ALL.iter().enumerate() {
        assert_eq!(tier.index(), i);
    }
}

#[test]
fn glitched_moki_goes_to_gorlek_glitched() {
    assert_eq!(Tier::new(Difficulty::Moki, true), Tier::GorlekGlitched);
    assert_eq!(Tier::new(Difficulty::Gorlek, true), Tier::GorlekGlitched);
    assert_eq!(Tier::new(Difficulty::Kii, true), Tier::KiiGlitched);
    assert_eq!(Tier::new(Difficulty::Unsafe, false), Tier::Unsafe);
}

#[test]
fn tier_parts() {
    let tier = Tier::new(Difficulty::Kii, true);
    assert_eq!(tier.difficulty(), Difficulty::Kii);
    assert!(tier.is_glitched());
    assert!(!Tier::Moki.is_glitched());
}

// =============================================================================
// Paths and refills
// =============================================================================

#[test]
fn path_kinds() {
    for word in ["conn", "state", "pickup", "refill", "quest", "door"] {
        let kind = PathKind::from_keyword(word).unwrap();
        assert_eq!(kind.keyword(), word);
    }
    assert_eq!(PathKind::from_keyword("nospawn"), None);
    assert!(PathKind::Connection.crosses_areas());
    assert!(PathKind::Door.crosses_areas());
    assert!(!PathKind::State.crosses_areas());
}

#[test]
fn refill_kind_codes() {
    assert_eq!(RefillKind::default(), RefillKind::None);
    assert_eq!(RefillKind::Checkpoint.code(), 1);
    assert_eq!(RefillKind::Full.code(), 2);
}
