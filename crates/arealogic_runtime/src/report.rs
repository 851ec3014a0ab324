//! Plain-text dumps of compiled logic.

use std::fmt::Write;

use arealogic_foundation::{Difficulty, Result, Tier};
use arealogic_language::AreaRequirement;

use crate::serialize::LogicBundle;

/// One area-entry check resolved against the area table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaCheck {
    /// Destination area.
    pub area: String,
    /// Difficulty the check was compiled at.
    pub difficulty: Difficulty,
    /// What entering requires.
    pub requirement: AreaRequirement,
}

/// Resolves every distinct `area(...)` check in the bundle's rules, in
/// rule order.
///
/// # Errors
/// Returns an error if a rule enters an area the table does not know.
pub fn resolve_area_entries(bundle: &LogicBundle) -> Result<Vec<AreaCheck>> {
    let mut checks: Vec<AreaCheck> = Vec::new();
    for rule in bundle.logic.rules.iter() {
        for (area, difficulty) in rule.predicate.area_entries() {
            if checks
                .iter()
                .any(|c| c.area == area && c.difficulty == difficulty)
            {
                continue;
            }
            let requirement = bundle.areas.requirement(area, difficulty)?;
            checks.push(AreaCheck {
                area: area.to_string(),
                difficulty,
                requirement,
            });
        }
    }
    Ok(checks)
}

fn amount(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn describe(requirement: AreaRequirement) -> String {
    match (requirement.health, requirement.regenerate) {
        (0, false) => "free".to_string(),
        (0, true) => "Regenerate".to_string(),
        (health, false) => format!("{health} health"),
        (health, true) => format!("{health} health, Regenerate"),
    }
}

/// Renders rules per tier, refills, doors and resolved area checks.
///
/// # Errors
/// Returns an error if an area check cannot be resolved.
pub fn render_dump(bundle: &LogicBundle) -> Result<String> {
    let logic = &bundle.logic;
    let mut out = String::new();

    let _ = writeln!(out, "=== Rules ({}) ===", logic.rules.len());
    for tier in Tier::ALL {
        let rules = logic.rules.tier(tier);
        if rules.is_empty() {
            continue;
        }
        let _ = writeln!(out, "[{tier}] {} rules", rules.len());
        for rule in rules {
            let _ = writeln!(out, "  {rule}");
        }
    }

    let _ = writeln!(out, "=== Refills ({}) ===", logic.refills.len());
    for (anchor, entry) in logic.refills.iter() {
        let _ = writeln!(
            out,
            "  {anchor}: health {}, energy {}, {:?}",
            amount(entry.health),
            amount(entry.energy),
            entry.kind
        );
    }

    let _ = writeln!(out, "=== Doors ({}) ===", logic.doors.ids.len());
    for ((node, id), (_, target)) in logic.doors.ids.iter().zip(&logic.doors.vanilla) {
        let _ = writeln!(out, "  #{id} {node} -> {target}");
    }

    let checks = resolve_area_entries(bundle)?;
    let _ = writeln!(out, "=== Area entries ({}) ===", checks.len());
    for check in &checks {
        let _ = writeln!(
            out,
            "  {} at {}: {}",
            check.area,
            check.difficulty,
            describe(check.requirement)
        );
    }

    Ok(out)
}

/// Renders a titled name list, one name per line.
#[must_use]
pub fn render_names(title: &str, names: &[String]) -> String {
    let mut out = format!("=== {title} ({}) ===\n", names.len());
    for name in names {
        let _ = writeln!(out, "  {name}");
    }
    out
}
