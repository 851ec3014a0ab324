//! Requirement splitting, AND-list parsing and OR-chain expansion.

use arealogic_foundation::{Difficulty, ErrorKind};
use arealogic_language::vocabulary::classify;
use arealogic_language::{
    Atom, AtomClass, CostEntry, CostKind, CountedResource, Encounter, EnergyWeapon, ExpansionPlan,
    Fact, WeaponCharge, combat_cost, expand, parse_and, split_requirement,
};

fn atoms(tokens: &[&str]) -> Vec<Atom> {
    tokens.iter().map(|t| Atom::parse(t)).collect()
}

// =============================================================================
// Splitting
// =============================================================================

#[test]
fn clauses_split_into_conjuncts_and_chains() {
    let expr = split_requirement("Bash,  DoubleJump , Glide OR Dash, free").unwrap();
    assert_eq!(expr.conjuncts, atoms(&["Bash", "DoubleJump", "free"]));
    assert_eq!(expr.disjunctions, vec![atoms(&["Glide", "Dash"])]);
}

#[test]
fn three_chains_are_rejected() {
    let err = split_requirement("A OR B, C OR D, E OR F").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TooManyDisjunctions { found: 3, max: 2 }
    ));
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn classification_priority() {
    let class = |t: &str| classify(&Atom::parse(t)).unwrap();
    assert!(class("WaveDash").is_glitch());
    assert!(class("SentryJump=2").is_glitch());
    assert_eq!(class("Bash"), AtomClass::Capability);
    assert_eq!(class("Bow=2"), AtomClass::EnergyCharge(EnergyWeapon::Bow));
    assert!(class("Damage=10").is_resource());
    assert_eq!(
        class("Keystone=4"),
        AtomClass::Counted(CountedResource::Keystone)
    );
    assert_eq!(class("MarshSpawn.CaveOpen"), AtomClass::Event);
}

#[test]
fn unknown_counted_resource() {
    let err = classify(&Atom::parse("Gem=2")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCountedResource(_)));
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn combat_multipliers_and_refills() {
    let cost = combat_cost(Encounter::Combat, "2xMantis+EnergyRefill+Skeeto").unwrap();
    assert_eq!(
        cost.entries,
        vec![
            CostEntry::new(32.0, CostKind::Combat),
            CostEntry::new(32.0, CostKind::Combat),
            CostEntry::new(0.0, CostKind::Refill),
            CostEntry::new(20.0, CostKind::Combat),
        ]
    );
    assert_eq!(cost.hazards.len(), 1);
}

#[test]
fn boss_and_wall_payloads() {
    let boss = combat_cost(Encounter::Boss, "600").unwrap();
    assert_eq!(boss.entries, vec![CostEntry::new(600.0, CostKind::Boss)]);
    let err = combat_cost(Encounter::BreakWall, "thick").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPayload { .. }));
}

// =============================================================================
// AND-lists
// =============================================================================

#[test]
fn and_list_collects_every_kind() {
    let result = parse_and(
        &atoms(&[
            "Bash",
            "Keystone=2",
            "Combat=Bat",
            "Bow=2",
            "Damage=15",
            "HowlsDen.Flag",
        ]),
        Difficulty::Gorlek,
    )
    .unwrap();

    assert_eq!(result.capabilities, vec!["Bash"]);
    assert!(result.facts.contains(&Fact::Count {
        resource: CountedResource::Keystone,
        amount: 2
    }));
    assert!(result.facts.contains(&Fact::Event("Combat.Bat".into())));
    assert!(result.facts.contains(&Fact::Event("HowlsDen.Flag".into())));
    assert_eq!(result.damage, vec![15.0]);
    assert_eq!(
        result.charges,
        vec![WeaponCharge { weapon: EnergyWeapon::Bow, charges: 2 }]
    );
    assert!(!result.glitched);
}

#[test]
fn damage_needs_a_payload() {
    let err = parse_and(&atoms(&["Damage"]), Difficulty::Moki).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPayload { .. }));
}

// =============================================================================
// OR-chains
// =============================================================================

#[test]
fn zero_chains_give_one_variant() {
    let variants = expand(&[]).unwrap();
    assert_eq!(variants.len(), 1);
    assert!(!variants[0].forced_glitch);
}

#[test]
fn one_chain_one_variant_per_glitch_plus_buckets() {
    let chain = atoms(&["Glide", "Dash", "WaveDash", "GlideJump", "Bow=1", "Damage=5"]);
    let variants = expand(&[chain]).unwrap();
    assert_eq!(variants.len(), 4);
    assert_eq!(variants.iter().filter(|v| v.forced_glitch).count(), 2);
    assert_eq!(variants[2].any_skills, vec![atoms(&["Glide", "Dash"])]);
    assert_eq!(variants[3].any_resources, atoms(&["Bow=1", "Damage=5"]));
}

#[test]
fn single_option_chain_goes_inside_either_way() {
    let big = atoms(&["Glide", "Dash", "Launch"]);
    let small = atoms(&["Bash"]);
    for chains in [vec![big.clone(), small.clone()], vec![small.clone(), big.clone()]] {
        let plan = ExpansionPlan::new(&chains).unwrap();
        assert_eq!(plan.outer.unwrap().skills, big);
        assert_eq!(plan.inner.unwrap().skills, small);
        assert_eq!(expand(&chains).unwrap().len(), 1);
    }
}
