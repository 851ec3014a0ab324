//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::fmt::Write;

use arealogic_language::CompileEvent;

use super::record::TraceRecord;

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records, one per line.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Formats a timestamp with a unit suited to its size.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }

    fn event_text(event: &CompileEvent) -> String {
        match event {
            CompileEvent::AnchorEntered { anchor } => format!("== ANCHOR {anchor} =="),
            CompileEvent::AnchorCleared { keyword } => format!("== {keyword} (no anchor) =="),
            CompileEvent::PathDeclared { kind, from, to } => {
                format!("  {kind} {from} -> {to}")
            }
            CompileEvent::PathSkipped { keyword } => format!("  SKIP {keyword}"),
            CompileEvent::RequirementFlattened {
                edge,
                difficulty,
                requirement,
            } => format!("    FLAT {edge} [{difficulty}] {requirement}"),
            CompileEvent::RuleEmitted { edge, tier } => format!("    RULE {tier}: {edge}"),
            CompileEvent::RefillRecorded {
                anchor,
                event,
                changed,
            } => {
                let state = if *changed { "set" } else { "kept" };
                format!("  REFILL {event} at {anchor} ({state})")
            }
            CompileEvent::DoorRegistered { node, id, target } => {
                format!("  DOOR #{id} {node} -> {target}")
            }
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "L{:04} ", record.line);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        format!("{prefix}{}", Self::event_text(&record.event))
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as single-line JSON objects.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether `format_many` puts one record per line.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }

    fn string_field(key: &str, value: &str) -> String {
        format!("\"{key}\":\"{}\"", Self::escape_string(value))
    }

    fn event_fields(event: &CompileEvent) -> String {
        match event {
            CompileEvent::AnchorEntered { anchor } => Self::string_field("anchor", anchor),
            CompileEvent::AnchorCleared { keyword } | CompileEvent::PathSkipped { keyword } => {
                Self::string_field("keyword", keyword)
            }
            CompileEvent::PathDeclared { kind, from, to } => format!(
                "{},{},{}",
                Self::string_field("kind", kind.keyword()),
                Self::string_field("from", from),
                Self::string_field("to", to)
            ),
            CompileEvent::RequirementFlattened {
                edge,
                difficulty,
                requirement,
            } => format!(
                "{},{},{}",
                Self::string_field("edge", edge),
                Self::string_field("difficulty", difficulty.keyword()),
                Self::string_field("requirement", requirement)
            ),
            CompileEvent::RuleEmitted { edge, tier } => format!(
                "{},{}",
                Self::string_field("edge", edge),
                Self::string_field("tier", tier.name())
            ),
            CompileEvent::RefillRecorded {
                anchor,
                event,
                changed,
            } => format!(
                "{},{},\"changed\":{changed}",
                Self::string_field("anchor", anchor),
                Self::string_field("event", event)
            ),
            CompileEvent::DoorRegistered { node, id, target } => format!(
                "{},\"id\":{id},{}",
                Self::string_field("node", node),
                Self::string_field("target", target)
            ),
        }
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        format!(
            "{{\"id\":{},\"line\":{},\"timestamp_ns\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.line,
            record.timestamp_ns,
            record.event_type(),
            Self::event_fields(&record.event)
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
