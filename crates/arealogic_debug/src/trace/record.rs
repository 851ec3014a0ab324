//! Trace record types.
//!
//! A record wraps a [`CompileEvent`] with the source line it came from and
//! the time since the tracer started.

use arealogic_language::CompileEvent;

// =============================================================================
// Event Categories
// =============================================================================

/// Returns true if the event changes the active anchor or path.
#[must_use]
pub fn is_structural(event: &CompileEvent) -> bool {
    matches!(
        event,
        CompileEvent::AnchorEntered { .. }
            | CompileEvent::AnchorCleared { .. }
            | CompileEvent::PathDeclared { .. }
            | CompileEvent::PathSkipped { .. }
    )
}

/// Returns true if the event belongs to requirement synthesis.
#[must_use]
pub fn is_rule_event(event: &CompileEvent) -> bool {
    matches!(
        event,
        CompileEvent::RequirementFlattened { .. } | CompileEvent::RuleEmitted { .. }
    )
}

/// Returns true if the event wrote to the refill or door tables.
#[must_use]
pub fn is_table_event(event: &CompileEvent) -> bool {
    matches!(
        event,
        CompileEvent::RefillRecorded { .. } | CompileEvent::DoorRegistered { .. }
    )
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped compile event.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    /// Record ID, increasing for the lifetime of the tracer.
    pub id: u64,
    /// 1-based source line that raised the event.
    pub line: usize,
    /// Nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The event.
    pub event: CompileEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, line: usize, timestamp_ns: u64, event: CompileEvent) -> Self {
        Self {
            id,
            line,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.kind_name()
    }
}

// =============================================================================
// Tests
// =============================================================================
