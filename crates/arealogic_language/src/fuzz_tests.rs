//! Property tests for the structurer, parser and expander.
//!
//! These tests use property-based testing to verify that compilation never
//! panics on any input and that the documented expansion invariants hold.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use arealogic_foundation::Difficulty;
    use proptest::prelude::*;

    use crate::options::CompileOptions;
    use crate::{
        Atom, Line, LineStructurer, OrBuckets, RefillTable, RefillToken, compile, expand,
        parse_and,
    };

    // ==========================================================================
    // Generators
    // ==========================================================================

    /// Strategy for generating completely random strings.
    fn arbitrary_string() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<char>(), 0..500).prop_map(|chars| chars.into_iter().collect())
    }

    fn skill_atom() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Bash".to_string()),
            Just("DoubleJump".to_string()),
            Just("Glide".to_string()),
            Just("Dash".to_string()),
            Just("Launch".to_string()),
            Just("MarshSpawn.CaveOpen".to_string()),
        ]
    }

    fn glitch_atom() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("WaveDash".to_string()),
            Just("GlideJump".to_string()),
            Just("SentryJump=1".to_string()),
            Just("ShurikenBreak=2".to_string()),
        ]
    }

    fn resource_atom() -> impl Strategy<Value = String> {
        prop_oneof![
            (1u32..5).prop_map(|n| format!("Bow={n}")),
            (1u32..50).prop_map(|n| format!("Damage={n}")),
            (1u32..4).prop_map(|n| format!("Combat={n}xMantis")),
            Just("Combat=Skeeto+Bat".to_string()),
            (1u32..400).prop_map(|n| format!("BreakWall={n}")),
        ]
    }

    fn any_atom() -> impl Strategy<Value = String> {
        prop_oneof![
            skill_atom(),
            glitch_atom(),
            resource_atom(),
            Just("Keystone=2".to_string()),
            Just("free".to_string()),
        ]
    }

    /// Strategy for area-like documents built from the real vocabulary.
    fn area_like_document() -> impl Strategy<Value = String> {
        let requirement =
            prop::collection::vec(any_atom(), 0..4).prop_map(|atoms| atoms.join(", "));
        let target = prop_oneof![
            Just("A.One".to_string()),
            Just("A.Two".to_string()),
            Just("B.One".to_string()),
        ];
        let difficulty = prop_oneof![
            Just("moki"),
            Just("gorlek"),
            Just("kii"),
            Just("unsafe"),
        ];
        let path = (target, difficulty, requirement).prop_map(|(target, difficulty, requirement)| {
            if requirement.is_empty() {
                format!("  conn {target}: free\n")
            } else {
                format!("  conn {target}:\n    {difficulty}: {requirement}\n")
            }
        });
        prop::collection::vec(path, 0..12)
            .prop_map(|paths| format!("anchor A.Start at 0, 0:\n{}", paths.concat()))
    }

    // ==========================================================================
    // Structurer
    // ==========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Structurer never panics on arbitrary input.
        #[test]
        fn structurer_never_panics(input in arbitrary_string()) {
            for line in LineStructurer::new(&input, CompileOptions::default()) {
                let _ = line;
            }
        }

        /// Compiler never panics on arbitrary input.
        #[test]
        fn compiler_never_panics(input in arbitrary_string()) {
            let _ = compile(&input);
        }

        /// Depth is half the leading spaces, rounded up, up to the maximum.
        #[test]
        fn depth_formula(spaces in 0usize..16) {
            let raw = format!("{}word", " ".repeat(spaces));
            let depth = (spaces + 1) / 2;
            let result = Line::structure(1, &raw, &CompileOptions::default());
            if depth <= 5 {
                let line = result.unwrap().unwrap();
                prop_assert_eq!(line.depth, depth);
                prop_assert_eq!(line.text, "word");
            } else {
                prop_assert!(result.is_err());
            }
        }
    }

    // ==========================================================================
    // Compilation
    // ==========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Generated documents compile and never register an entrance twice.
        #[test]
        fn entrance_registry_never_duplicates(doc in area_like_document()) {
            let logic = compile(&doc).unwrap();
            let unique: HashSet<_> = logic.entrances.names().iter().collect();
            prop_assert_eq!(unique.len(), logic.entrances.len());
            for rule in logic.rules.iter() {
                prop_assert!(logic.entrances.contains(&rule.edge_name()));
            }
        }

        /// Parsing an AND-list twice gives the same result.
        #[test]
        fn and_parsing_is_idempotent(
            atoms in prop::collection::vec(any_atom(), 0..6),
            level in 0usize..4,
        ) {
            let atoms: Vec<Atom> = atoms.iter().map(|a| Atom::parse(a)).collect();
            let difficulty = Difficulty::ALL[level];
            let first = parse_and(&atoms, difficulty).unwrap();
            let second = parse_and(&atoms, difficulty).unwrap();
            prop_assert_eq!(first, second);
        }

        /// One chain yields one variant per glitch plus one per non-empty
        /// skill or resource bucket.
        #[test]
        fn one_chain_variant_count(
            skills in prop::collection::vec(skill_atom(), 0..3),
            glitches in prop::collection::vec(glitch_atom(), 0..3),
            resources in prop::collection::vec(resource_atom(), 0..3),
        ) {
            let chain: Vec<Atom> = skills
                .iter()
                .chain(&glitches)
                .chain(&resources)
                .map(|a| Atom::parse(a))
                .collect();
            prop_assume!(!chain.is_empty());

            let buckets = OrBuckets::partition(&chain).unwrap();
            prop_assert_eq!(buckets.glitches.len(), glitches.len());

            let variants = expand(&[chain]).unwrap();
            let expected = glitches.len()
                + usize::from(!skills.is_empty())
                + usize::from(!resources.is_empty());
            prop_assert_eq!(variants.len(), expected);
            prop_assert_eq!(
                variants.iter().filter(|v| v.forced_glitch).count(),
                glitches.len()
            );
        }

        /// A repeated refill declaration never changes the table.
        #[test]
        fn refill_first_write_wins(amount in 0u32..10, again in 0u32..10) {
            let mut table = RefillTable::new();
            prop_assert!(table.apply("A", RefillToken::Energy(amount)));
            let before = table.clone();
            prop_assert!(!table.apply("A", RefillToken::Energy(again)));
            prop_assert_eq!(table, before);
        }
    }
}
