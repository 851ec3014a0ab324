//! Integration tests for Error types
//!
//! Tests error construction, display, context, and categories.

use arealogic_foundation::{Error, ErrorCategory, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_indent_too_deep() {
    let err = Error::indent_too_deep(7, 5);
    assert!(matches!(err.kind, ErrorKind::IndentTooDeep { depth: 7, max: 5 }));
    assert_eq!(err.to_string(), "indentation too deep: depth 7 (maximum 5)");
}

#[test]
fn error_unknown_path_kind() {
    let err = Error::unknown_path_kind("teleport");
    assert_eq!(err.to_string(), "teleport is not an appropriate path type");
}

#[test]
fn error_invalid_payload() {
    let err = Error::invalid_payload("Keystone", "two");
    assert!(matches!(err.kind, ErrorKind::InvalidPayload { .. }));
    let msg = err.to_string();
    assert!(msg.contains("Keystone"));
    assert!(msg.contains("\"two\""));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_with_line_context() {
    let err = Error::unknown_enemy("Dragon").at_line(12, "    moki: Combat=Dragon  ");
    let msg = err.to_string();
    assert!(msg.starts_with("unknown enemy: Dragon ("));
    assert!(msg.contains("line 12"));
    assert!(msg.contains("\"    moki: Combat=Dragon\""));
}

#[test]
fn first_context_wins() {
    let err = Error::malformed("bad").at_line(3, "a").at_line(9, "b");
    let context = err.context.unwrap();
    assert_eq!(context.line, Some(3));
    assert_eq!(context.text.as_deref(), Some("a"));
}

#[test]
fn context_with_source() {
    let context = ErrorContext::new()
        .with_source("areas.wotw")
        .with_line(4)
        .with_text("anchor A:");
    assert_eq!(context.to_string(), "in areas.wotw line 4: \"anchor A:\"");
}

// =============================================================================
// Categories
// =============================================================================

#[test]
fn categories() {
    assert_eq!(
        Error::unknown_difficulty("hard").category(),
        ErrorCategory::Structural
    );
    assert_eq!(
        Error::new(ErrorKind::MissingDoorField("id")).category(),
        ErrorCategory::Structural
    );
    assert_eq!(
        Error::new(ErrorKind::UnknownArea("Nowhere".into())).category(),
        ErrorCategory::Lookup
    );
    assert_eq!(
        Error::new(ErrorKind::UnknownCountedResource("Gem".into())).category(),
        ErrorCategory::Lookup
    );
    assert_eq!(
        Error::new(ErrorKind::SerializationError("eof".into())).category(),
        ErrorCategory::Io
    );
}
