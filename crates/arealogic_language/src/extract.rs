//! Name table extractors.
//!
//! Single scans over a source document that collect event, quest and
//! region names, deduplicated in first-seen order.

use arealogic_foundation::Result;

use crate::combat::Hazard;
use crate::line::{LineStructurer, declared_name};
use crate::options::CompileOptions;
use crate::tables::NameRegistry;
use crate::vocabulary::combo_glitches;

/// Events that exist regardless of the document.
const BUILTIN_EVENTS: &[&str] = &["BreakCrystal"];

/// Hazards that have a combat event.
const HAZARD_EVENTS: [Hazard; 6] = [
    Hazard::Ranged,
    Hazard::Aerial,
    Hazard::Dangerous,
    Hazard::Shielded,
    Hazard::Bat,
    Hazard::Sand,
];

/// Collects `(depth, keyword, name)` for every declaration in `source`.
fn declarations(source: &str) -> Result<Vec<(usize, String, String)>> {
    let mut found = Vec::new();
    for line in LineStructurer::new(source, CompileOptions::default()) {
        let line = line?;
        if line.depth > 1 {
            continue;
        }
        if let Some(name) = declared_name(line.text) {
            found.push((line.depth, line.keyword().to_string(), name.to_string()));
        }
    }
    Ok(found)
}

/// Collects event names: combo glitches, combat hazard events,
/// `BreakCrystal`, then every `requirement` and `state` name.
///
/// # Errors
/// Returns structural errors from line structuring.
pub fn extract_events(source: &str) -> Result<Vec<String>> {
    let mut events = NameRegistry::new();
    for glitch in combo_glitches() {
        events.insert(*glitch);
    }
    for hazard in HAZARD_EVENTS {
        events.insert(hazard.event_name());
    }
    for event in BUILTIN_EVENTS {
        events.insert(*event);
    }

    for (depth, keyword, name) in declarations(source)? {
        if (depth == 0 && keyword == "requirement") || (depth == 1 && keyword == "state") {
            events.insert(name);
        }
    }
    Ok(events.into())
}

/// Collects `quest` names.
///
/// # Errors
/// Returns structural errors from line structuring.
pub fn extract_quests(source: &str) -> Result<Vec<String>> {
    let mut quests = NameRegistry::new();
    for (depth, keyword, name) in declarations(source)? {
        if depth == 1 && keyword == "quest" {
            quests.insert(name);
        }
    }
    Ok(quests.into())
}

/// Collects anchor names, with coordinates removed.
///
/// # Errors
/// Returns structural errors from line structuring.
pub fn extract_regions(source: &str) -> Result<Vec<String>> {
    let mut regions = NameRegistry::new();
    for (depth, keyword, name) in declarations(source)? {
        if depth == 0 && keyword == "anchor" {
            regions.insert(name);
        }
    }
    Ok(regions.into())
}
