//! Compile, trace, export, and report one document.

use arealogic_debug::{Tracer, TracerConfig};
use arealogic_foundation::{Difficulty, Tier};
use arealogic_language::{AreaTable, CompileOptions, compile_with_sink};
use arealogic_runtime::{
    LogicBundle, from_bytes, load_from_file, render_dump, resolve_area_entries, save_to_file,
    to_bytes,
};

const SOURCE: &str = "\
# Marsh to Woods
anchor MarshSpawn.Main at -722, -4190:
  refill Checkpoint
  conn WoodsMain.Entry:
    moki: Bash
    gorlek, Combat=Mantis:
      Bow=1 OR Damage=10
  door MarshSpawn.Door:
    id: 4
    target: WoodsMain.Door
    enter:
      moki: free

anchor WoodsMain.Entry:
  conn MarshSpawn.Main: free
";

fn traced() -> (LogicBundle, Tracer) {
    let tracer = Tracer::new(TracerConfig::new().enabled());
    let (logic, tracer) = compile_with_sink(SOURCE, CompileOptions::default(), tracer).unwrap();
    (LogicBundle::new(logic, AreaTable::default()), tracer)
}

#[test]
fn rules_land_in_their_tiers() {
    let (bundle, _) = traced();
    let rules = &bundle.logic.rules;

    assert_eq!(rules.len(), 7);
    assert_eq!(rules.tier(Tier::Moki).len(), 6);
    assert_eq!(rules.tier(Tier::Gorlek).len(), 1);
    assert!(rules.tier(Tier::Gorlek)[0].predicate.has_cost());
    assert_eq!(bundle.logic.doors.id("MarshSpawn.Door"), Some(4));
}

#[test]
fn tracer_sees_every_stage() {
    let (bundle, tracer) = traced();
    let stats = tracer.stats();

    assert_eq!(stats.count("anchor_entered"), 2);
    assert_eq!(stats.count("refill_recorded"), 1);
    assert_eq!(stats.count("door_registered"), 1);
    // door helper edges are not reported as emitted rules
    assert_eq!(stats.count("rule_emitted") + 2, bundle.logic.rules.len());
    assert_eq!(stats.first_line, Some(2));
    assert!(tracer.dump().contains("DOOR #4"));
}

#[test]
fn bundle_survives_export() {
    let (bundle, _) = traced();

    let restored = from_bytes(&to_bytes(&bundle).unwrap()).unwrap();
    assert_eq!(restored, bundle);

    let path = std::env::temp_dir().join("arealogic_pipeline_bundle.msgpack");
    save_to_file(&bundle, &path).unwrap();
    assert_eq!(load_from_file(&path).unwrap(), bundle);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn area_checks_resolve_against_the_table() {
    let (bundle, _) = traced();
    let checks: Vec<(String, Difficulty)> = resolve_area_entries(&bundle)
        .unwrap()
        .into_iter()
        .map(|c| (c.area, c.difficulty))
        .collect();

    assert_eq!(
        checks,
        [
            ("WoodsMain".to_string(), Difficulty::Moki),
            ("MarshSpawn".to_string(), Difficulty::Moki),
            ("WoodsMain".to_string(), Difficulty::Gorlek),
        ]
    );
}

#[test]
fn dump_after_reload() {
    let (bundle, _) = traced();
    let restored = from_bytes(&to_bytes(&bundle).unwrap()).unwrap();
    let text = render_dump(&restored).unwrap();

    assert!(text.contains("=== Rules (7) ==="));
    assert!(text.contains("[moki] 6 rules"));
    assert!(text.contains("  #4 MarshSpawn.Door -> WoodsMain.Door"));
    assert!(text.contains("  WoodsMain at moki: 40 health, Regenerate"));
    assert!(text.contains("  WoodsMain at gorlek: Regenerate"));
    assert!(text.contains("  MarshSpawn at moki: free"));
}
