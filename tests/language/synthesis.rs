//! End-to-end rule synthesis through the compiler.

use arealogic_foundation::{Difficulty, RefillKind, Tier};
use arealogic_language::{CompiledLogic, Predicate, compile};

fn rules(logic: &CompiledLogic, tier: Tier) -> Vec<String> {
    logic.rules.tier(tier).iter().map(ToString::to_string).collect()
}

// =============================================================================
// Single edges
// =============================================================================

#[test]
fn crossing_connection_checks_the_target_area() {
    let logic = compile("anchor A.Start:\n  conn B.Anchor:\n    gorlek: Bash\n").unwrap();

    assert_eq!(logic.rules.len(), 1);
    let rule = &logic.rules.tier(Tier::Gorlek)[0];
    assert_eq!(
        rule.predicate,
        Predicate::all(vec![
            Predicate::HasCapability("Bash".into()),
            Predicate::AreaEntry { area: "B".into(), difficulty: Difficulty::Gorlek },
        ])
    );
    assert!(!rule.predicate.has_cost());
    assert_eq!(logic.entrances.names(), ["A.Start -> B.Anchor"]);
}

#[test]
fn plain_requirement_is_one_rule() {
    let logic =
        compile("anchor A.Start:\n  state A.Flag:\n    moki: Bash, DoubleJump\n").unwrap();
    assert_eq!(
        rules(&logic, Tier::Moki),
        ["A.Start -> A.Flag: all(has(Bash), has(Double Jump))"]
    );
}

#[test]
fn glitched_moki_lands_in_gorlek_glitched() {
    let logic = compile("anchor A.Start:\n  pickup A.Ore:\n    moki: WaveDash\n").unwrap();
    assert!(logic.rules.tier(Tier::Moki).is_empty());
    assert_eq!(
        rules(&logic, Tier::GorlekGlitched),
        ["A.Start -> A.Ore: technique(WaveDash)"]
    );
}

#[test]
fn or_chain_splits_into_variants() {
    let source = "\
anchor A.Start:
  conn A.End:
    unsafe: Bash, Glide OR Dash OR SentryJump OR Bow=2
";
    let logic = compile(source).unwrap();
    assert_eq!(logic.rules.tier(Tier::Unsafe).len(), 2);
    assert_eq!(logic.rules.tier(Tier::UnsafeGlitched).len(), 1);
    assert!(
        logic
            .rules_for("A.Start", "A.End")
            .all(|r| r.predicate.requires_capability("Bash"))
    );
    assert_eq!(logic.entrances.len(), 1);
}

#[test]
fn resource_options_merge_with_the_base_cost() {
    let source = "\
anchor A.Start:
  conn A.End:
    kii, Combat=Mantis:
      Bow=1 OR Damage=10
";
    let logic = compile(source).unwrap();
    let kii = rules(&logic, Tier::Kii);
    assert_eq!(kii.len(), 1);
    assert_eq!(
        kii[0],
        "A.Start -> A.End: any(cost[[32, \"Combat\"], 1xBow; kii], \
         cost[10 damage, [32, \"Combat\"]; kii])"
    );
}

// =============================================================================
// Tables
// =============================================================================

const REFILLS: &str = "\
anchor MarshSpawn.Main:
  refill Energy=2
  refill Energy=5
  refill Full
  refill Checkpoint
anchor MarshSpawn.Cave:
  conn MarshSpawn.Main: free
";

#[test]
fn refills_keep_the_first_declaration() {
    let logic = compile(REFILLS).unwrap();
    let entry = logic.refills.get("MarshSpawn.Main").unwrap();
    assert_eq!(entry.energy, Some(2));
    assert_eq!(entry.health, None);
    assert_eq!(entry.kind, RefillKind::Full);
    assert_eq!(
        logic.refill_events.names(),
        [
            "Energy.MarshSpawn.Main",
            "Full.MarshSpawn.Main",
            "Checkpoint.MarshSpawn.Main"
        ]
    );
    // every anchor gets an entry, even without refills
    assert_eq!(logic.refills.len(), 2);
    assert_eq!(logic.refills.get("MarshSpawn.Cave").and_then(|r| r.energy), None);
}

#[test]
fn refill_paths_are_free_edges() {
    let logic = compile(REFILLS).unwrap();
    assert!(
        logic
            .rules_for("MarshSpawn.Main", "Energy.MarshSpawn.Main")
            .all(|r| r.predicate.is_free())
    );
    assert!(logic.entrances.contains("MarshSpawn.Main -> Full.MarshSpawn.Main"));
}

const DOORS: &str = "\
anchor A.Main:
  door A.Door:
    id: 3
    target: B.Door
    enter:
      moki: free
      gorlek: Bash
";

#[test]
fn doors_register_once_with_helper_edges() {
    let logic = compile(DOORS).unwrap();

    assert_eq!(logic.doors.id("A.Door"), Some(3));
    assert_eq!(logic.doors.vanilla, [("A.Door".to_string(), "B.Door".to_string())]);
    assert_eq!(
        logic.entrances.names(),
        ["A.Main -> A.Door", "A.Door -> A.Main", "A.Door -> B.Door"]
    );
    assert!(
        logic
            .rules_for("A.Main", "A.Door")
            .chain(logic.rules_for("A.Door", "A.Main"))
            .all(|r| r.tier == Tier::Moki && r.predicate.is_free())
    );
    assert_eq!(logic.rules.tier(Tier::Moki).len(), 3);
    assert_eq!(logic.rules.tier(Tier::Gorlek).len(), 1);
}

#[test]
fn door_edges_check_the_target_area() {
    let logic = compile(DOORS).unwrap();
    let door_rules: Vec<String> = logic
        .rules_for("A.Door", "B.Door")
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        door_rules,
        [
            "A.Door -> B.Door: area(B, moki)",
            "A.Door -> B.Door: all(has(Bash), area(B, gorlek))"
        ]
    );
    // helper edges stay inside the owning area
    assert!(
        logic
            .rules_for("A.Main", "A.Door")
            .all(|r| r.predicate.area_entries().is_empty())
    );
}

#[test]
fn same_area_doors_skip_the_area_check() {
    let source = DOORS.replace("B.Door", "A.Inner");
    let logic = compile(&source).unwrap();
    let rule = logic.rules_for("A.Door", "A.Inner").next().unwrap();
    assert!(rule.predicate.is_free());
}

#[test]
fn entrances_stay_unique() {
    let source = "\
anchor A.Main:
  conn B.Main:
    moki: Bash
    gorlek: Dash
    kii: Glide OR Launch
anchor B.Main:
  conn A.Main: free
  conn A.Main:
    unsafe: free
";
    let logic = compile(source).unwrap();
    assert_eq!(logic.entrances.names(), ["A.Main -> B.Main", "B.Main -> A.Main"]);
    assert_eq!(logic.rules.len(), 5);
}
