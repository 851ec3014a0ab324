//! Line structuring and accumulator grammar through the public compiler.

use arealogic_foundation::{ErrorKind, Tier};
use arealogic_language::{
    CompileEvent, CompileOptions, LineStructurer, compile, compile_with_sink,
};

// =============================================================================
// Line Structurer
// =============================================================================

#[test]
fn comments_and_blank_lines_are_dropped() {
    let source = "# header\n\nanchor A:   # trailing\n  conn B: free\n";
    let lines = LineStructurer::structure_all(source, CompileOptions::default()).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].number, 3);
    assert_eq!(lines[0].text, "anchor A:");
    assert_eq!(lines[1].depth, 1);
}

#[test]
fn odd_indentation_rounds_up() {
    let lines =
        LineStructurer::structure_all("anchor A:\n   conn B: free\n", CompileOptions::default())
            .unwrap();
    assert_eq!(lines[1].depth, 2);
}

#[test]
fn custom_comment_marker() {
    let options = CompileOptions::new().with_comment_marker(';');
    let lines = LineStructurer::structure_all("anchor A: ; note\n# kept\n", options).unwrap();
    assert_eq!(lines[0].text, "anchor A:");
    assert_eq!(lines[1].text, "# kept");
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn unknown_declaration_is_fatal() {
    let err = compile("shrine A:\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDeclaration(_)));
    assert_eq!(err.context.unwrap().line, Some(1));
}

#[test]
fn unknown_path_kind_is_fatal() {
    let err = compile("anchor A:\n  teleport B: free\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownPathKind(ref k) if k == "teleport"));
}

#[test]
fn unknown_difficulty_is_fatal() {
    let err = compile("anchor A:\n  conn B:\n    hard: Bash\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDifficulty(_)));
}

#[test]
fn requirement_blocks_produce_no_rules() {
    let logic = compile("requirement Combat.Ranged:\n  moki: Bow\nregion Marsh:\n  moki: free\n")
        .unwrap();
    assert!(logic.rules.is_empty());
    assert!(logic.entrances.is_empty());
}

#[test]
fn anchor_coordinates_are_stripped() {
    let logic = compile("anchor MarshSpawn.Main at -722, -4190:\n  conn MarshSpawn.Cave: free\n")
        .unwrap();
    assert!(logic.entrances.contains("MarshSpawn.Main -> MarshSpawn.Cave"));
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn nested_fragments_join_into_one_requirement() {
    let source = "\
anchor A.One:
  conn A.Two:
    kii, Bash:
      DoubleJump:
        Glide
      Dash
";
    let (logic, events) = compile_with_sink(
        source,
        CompileOptions::default(),
        Vec::<(usize, CompileEvent)>::new(),
    )
    .unwrap();
    let flattened: Vec<String> = events
        .iter()
        .filter(|(_, e)| e.kind_name() == "requirement_flattened")
        .map(|(_, e)| e.to_string())
        .collect();
    assert_eq!(
        flattened,
        vec![
            "A.One -> A.Two [kii] \"Bash, DoubleJump, Glide\"",
            "A.One -> A.Two [kii] \"Bash, Dash\"",
        ]
    );
    assert_eq!(logic.rules.tier(Tier::Kii).len(), 2);
}

#[test]
fn skipped_blocks_take_their_children() {
    let source = "\
anchor A.One:
  nospawn:
    moki: Bash
  tprestriction:
    moki: free
  conn A.Two: free
";
    let logic = compile(source).unwrap();
    assert_eq!(logic.rules.len(), 1);
}

#[test]
fn jumping_two_levels_is_malformed() {
    let err = compile("anchor A:\n  conn B:\n      Bash\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedLine(_)));
}

#[test]
fn door_requires_id_and_target_before_enter() {
    let err = compile("anchor A.One:\n  door A.Door:\n    id: 3\n    enter:\n      moki: free\n")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingDoorField(_)));
}
