//! Compilation events.
//!
//! The compiler reports what it does through a [`CompileSink`]. The default
//! [`NoopSink`] discards everything; the debug layer provides a tracer that
//! buffers and formats events.

use std::fmt;

use arealogic_foundation::{Difficulty, PathKind, Tier};

/// Something the compiler did while processing a line.
#[derive(Clone, Debug, PartialEq)]
pub enum CompileEvent {
    /// A depth-0 anchor declaration became active.
    AnchorEntered {
        /// Anchor name.
        anchor: String,
    },
    /// A `requirement` or `region` declaration cleared the active anchor.
    AnchorCleared {
        /// The declaration keyword.
        keyword: String,
    },
    /// A path was declared under the active anchor.
    PathDeclared {
        /// Path kind.
        kind: PathKind,
        /// Source node.
        from: String,
        /// Target name.
        to: String,
    },
    /// A depth-1 block was skipped.
    PathSkipped {
        /// The block keyword.
        keyword: String,
    },
    /// Fragments were joined into a flat requirement at a terminal line.
    RequirementFlattened {
        /// Edge name.
        edge: String,
        /// Difficulty of the requirement.
        difficulty: Difficulty,
        /// The flat requirement text.
        requirement: String,
    },
    /// A compiled rule was appended to a tier bucket.
    RuleEmitted {
        /// Edge name.
        edge: String,
        /// Bucket it went to.
        tier: Tier,
    },
    /// A refill declaration was applied to the refill table.
    RefillRecorded {
        /// Anchor name.
        anchor: String,
        /// Refill event name.
        event: String,
        /// Whether the table changed.
        changed: bool,
    },
    /// A door was registered.
    DoorRegistered {
        /// Door node.
        node: String,
        /// Door id.
        id: u32,
        /// Vanilla target door.
        target: String,
    },
}

impl CompileEvent {
    /// Returns the snake-case event type name, used for filtering.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::AnchorEntered { .. } => "anchor_entered",
            Self::AnchorCleared { .. } => "anchor_cleared",
            Self::PathDeclared { .. } => "path_declared",
            Self::PathSkipped { .. } => "path_skipped",
            Self::RequirementFlattened { .. } => "requirement_flattened",
            Self::RuleEmitted { .. } => "rule_emitted",
            Self::RefillRecorded { .. } => "refill_recorded",
            Self::DoorRegistered { .. } => "door_registered",
        }
    }
}

impl fmt::Display for CompileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnchorEntered { anchor } => write!(f, "anchor {anchor}"),
            Self::AnchorCleared { keyword } => write!(f, "cleared by {keyword}"),
            Self::PathDeclared { kind, from, to } => write!(f, "{kind} {from} -> {to}"),
            Self::PathSkipped { keyword } => write!(f, "skipped {keyword}"),
            Self::RequirementFlattened {
                edge,
                difficulty,
                requirement,
            } => write!(f, "{edge} [{difficulty}] {requirement:?}"),
            Self::RuleEmitted { edge, tier } => write!(f, "rule {edge} => {tier}"),
            Self::RefillRecorded {
                anchor,
                event,
                changed,
            } => {
                let state = if *changed { "set" } else { "kept" };
                write!(f, "refill {event} at {anchor} ({state})")
            }
            Self::DoorRegistered { node, id, target } => {
                write!(f, "door {node} #{id} -> {target}")
            }
        }
    }
}

/// Receiver of compilation events.
pub trait CompileSink {
    /// Records an event raised while processing source line `line`.
    fn record(&mut self, line: usize, event: CompileEvent);

    /// Returns false if events are discarded, so callers can skip building them.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// A sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl CompileSink for NoopSink {
    fn record(&mut self, _line: usize, _event: CompileEvent) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

impl CompileSink for Vec<(usize, CompileEvent)> {
    fn record(&mut self, line: usize, event: CompileEvent) {
        self.push((line, event));
    }
}

impl<S: CompileSink + ?Sized> CompileSink for &mut S {
    fn record(&mut self, line: usize, event: CompileEvent) {
        (**self).record(line, event);
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}
