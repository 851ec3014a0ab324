//! Property tests over generated area documents.

use arealogic_debug::{Tracer, TracerConfig};
use arealogic_language::area::area_of;
use arealogic_language::{AreaTable, CompileOptions, compile, compile_with_sink};
use arealogic_runtime::{LogicBundle, from_bytes, render_dump, to_bytes};
use proptest::prelude::*;

const AREAS: &[&str] = &["MarshSpawn", "WoodsMain", "HowlsDen", "EastHollow"];
const DIFFICULTIES: &[&str] = &["moki", "gorlek", "kii", "unsafe"];
const REQUIREMENTS: &[&str] = &[
    "free",
    "Bash",
    "Bash, DoubleJump",
    "Glide OR Dash",
    "WaveDash",
    "Combat=Mantis",
    "Bow=1 OR Damage=10",
    "SentryJump=2",
    "Keystone=2",
    "Launch OR GlideJump, Bash OR Spear=1",
];

/// One connection: target anchor, and `(difficulty, requirement)` lines.
type Conn = (usize, Vec<(usize, usize)>);

fn node(index: usize) -> String {
    format!("{}.A{index}", AREAS[index % AREAS.len()])
}

fn render(anchors: &[Vec<Conn>]) -> String {
    let mut source = String::new();
    for (i, conns) in anchors.iter().enumerate() {
        source.push_str(&format!("anchor {}:\n", node(i)));
        for (target, lines) in conns {
            source.push_str(&format!("  conn {}:\n", node(target % anchors.len())));
            for (difficulty, requirement) in lines {
                source.push_str(&format!(
                    "    {}: {}\n",
                    DIFFICULTIES[*difficulty], REQUIREMENTS[*requirement]
                ));
            }
        }
    }
    source
}

fn document() -> impl Strategy<Value = String> {
    let line = (0..DIFFICULTIES.len(), 0..REQUIREMENTS.len());
    let conn = (0usize..8, prop::collection::vec(line, 1..4));
    prop::collection::vec(prop::collection::vec(conn, 0..4), 1..6)
        .prop_map(|anchors| render(&anchors))
}

proptest! {
    /// Compiling the same document twice gives the same output.
    #[test]
    fn compilation_is_deterministic(source in document()) {
        prop_assert_eq!(compile(&source).unwrap(), compile(&source).unwrap());
    }

    /// Every rule's edge is registered exactly once as an entrance.
    #[test]
    fn entrances_cover_rules(source in document()) {
        let logic = compile(&source).unwrap();
        let names = logic.entrances.names();
        for rule in logic.rules.iter() {
            prop_assert!(logic.entrances.contains(&rule.edge_name()));
        }
        let mut unique = names.to_vec();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), names.len());
    }

    /// Rules crossing into another area check entry into that area.
    #[test]
    fn crossings_check_the_target_area(source in document()) {
        let logic = compile(&source).unwrap();
        for rule in logic.rules.iter() {
            let target = area_of(&rule.to);
            let entries = rule.predicate.area_entries();
            if target != area_of(&rule.from) {
                prop_assert!(entries.iter().any(|(area, _)| Some(*area) == target));
            } else {
                prop_assert!(entries.is_empty());
            }
        }
    }

    /// Without doors every rule is reported to the tracer.
    #[test]
    fn traced_rule_count_matches(source in document()) {
        let tracer = Tracer::new(TracerConfig::new().enabled().with_buffer_size(100_000));
        let (logic, tracer) =
            compile_with_sink(&source, CompileOptions::default(), tracer).unwrap();
        prop_assert_eq!(tracer.stats().count("rule_emitted"), logic.rules.len());
    }

    /// Exported bundles load back unchanged and can be dumped.
    #[test]
    fn exported_bundles_reload(source in document()) {
        let bundle = LogicBundle::new(compile(&source).unwrap(), AreaTable::default());
        let restored = from_bytes(&to_bytes(&bundle).unwrap()).unwrap();
        prop_assert!(render_dump(&restored).is_ok());
        prop_assert_eq!(restored, bundle);
    }
}
