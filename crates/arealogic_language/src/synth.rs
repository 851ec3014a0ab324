//! Rule synthesizer.
//!
//! Turns a completed requirement into compiled rules. The requirement is
//! split into clauses, its OR-chains are expanded into variants, and each
//! variant becomes one predicate in one tier bucket. Entrance and door
//! side effects are recorded in the output tables.

use arealogic_foundation::{Difficulty, Result, Tier};

use crate::accumulator::{DoorLink, Edge, Terminal};
use crate::area::area_of;
use crate::atom::{Atom, split_requirement};
use crate::conjunction::{AndResult, parse_and};
use crate::disjunction::{Variant, expand};
use crate::event::{CompileEvent, CompileSink};
use crate::predicate::{Predicate, ResourceCost};
use crate::tables::{CompiledLogic, CompiledRule, edge_name};

/// Compiles one terminal requirement into rules.
///
/// Returns the number of rules emitted.
///
/// # Errors
/// Returns errors from clause splitting, classification and cost lookup.
pub fn synthesize<S: CompileSink>(
    logic: &mut CompiledLogic,
    terminal: &Terminal,
    sink: &mut S,
    line: usize,
) -> Result<usize> {
    let Terminal {
        edge,
        difficulty,
        requirement,
    } = terminal;
    let difficulty = *difficulty;

    if let Some(door) = &edge.door {
        register_door(logic, door, sink, line);
    }

    let edge_label = edge.name();
    logic.entrances.insert(edge_label.clone());
    if sink.is_enabled() {
        sink.record(
            line,
            CompileEvent::RequirementFlattened {
                edge: edge_label.clone(),
                difficulty,
                requirement: requirement.clone(),
            },
        );
    }

    let expr = split_requirement(requirement)?;
    let variants = expand(&expr.disjunctions)?;
    let area_entry = area_entry(edge, difficulty);

    let mut emitted = 0;
    for variant in &variants {
        let mut atoms = expr.conjuncts.clone();
        atoms.extend(variant.extra.iter().cloned());
        let and = parse_and(&atoms, difficulty)?;
        let glitched = and.glitched || variant.forced_glitch;

        let predicate = build_predicate(&and, variant, area_entry.clone(), difficulty)?;
        let tier = Tier::new(difficulty, glitched);
        logic.rules.push(CompiledRule {
            from: edge.from.clone(),
            to: edge.to.clone(),
            tier,
            predicate,
        });
        emitted += 1;

        if sink.is_enabled() {
            sink.record(
                line,
                CompileEvent::RuleEmitted {
                    edge: edge_label.clone(),
                    tier,
                },
            );
        }
    }

    Ok(emitted)
}

/// Deferred area check for edges crossing into a new named area.
fn area_entry(edge: &Edge, difficulty: Difficulty) -> Option<Predicate> {
    if !edge.kind.crosses_areas() {
        return None;
    }
    let target = area_of(&edge.to)?;
    if area_of(&edge.from) == Some(target) {
        return None;
    }
    Some(Predicate::AreaEntry {
        area: target.to_string(),
        difficulty,
    })
}

/// Registers a door the first time one of its enter rules is compiled,
/// along with the free helper edges between the door node and its anchor.
fn register_door<S: CompileSink>(
    logic: &mut CompiledLogic,
    door: &DoorLink,
    sink: &mut S,
    line: usize,
) {
    if !logic.doors.register(&door.node, door.id, &door.target) {
        return;
    }
    if sink.is_enabled() {
        sink.record(
            line,
            CompileEvent::DoorRegistered {
                node: door.node.clone(),
                id: door.id,
                target: door.target.clone(),
            },
        );
    }

    for (from, to) in [(&door.anchor, &door.node), (&door.node, &door.anchor)] {
        logic.entrances.insert(edge_name(from, to));
        logic.rules.push(CompiledRule {
            from: from.clone(),
            to: to.clone(),
            tier: Tier::Moki,
            predicate: Predicate::free(),
        });
    }
}

fn build_predicate(
    and: &AndResult,
    variant: &Variant,
    area_entry: Option<Predicate>,
    difficulty: Difficulty,
) -> Result<Predicate> {
    let mut parts: Vec<Predicate> = and
        .capabilities
        .iter()
        .map(|c| Predicate::HasCapability(c.clone()))
        .collect();
    parts.extend(and.facts.iter().cloned().map(Predicate::from));
    parts.extend(and.techniques.iter().map(|t| Predicate::Technique(t.clone())));

    for group in &variant.any_skills {
        let options = group
            .iter()
            .map(|atom| option_predicate(atom, difficulty))
            .collect::<Result<Vec<_>>>()?;
        parts.push(Predicate::any(options));
    }

    parts.extend(area_entry);

    let base = base_cost(and, difficulty);
    if variant.any_resources.is_empty() {
        if !base.is_empty() {
            parts.push(Predicate::CombatCost(base));
        }
    } else {
        let options = variant
            .any_resources
            .iter()
            .map(|atom| -> Result<Predicate> {
                let option = parse_and(std::slice::from_ref(atom), difficulty)?;
                let mut cost = base.clone();
                cost.merge(&base_cost(&option, difficulty));
                let mut leaves: Vec<Predicate> = option
                    .facts
                    .into_iter()
                    .map(Predicate::from)
                    .collect();
                leaves.push(Predicate::CombatCost(cost));
                Ok(Predicate::all(leaves))
            })
            .collect::<Result<Vec<_>>>()?;
        parts.push(Predicate::any(options));
    }

    Ok(Predicate::all(parts))
}

/// Predicate for one option of a skill group.
fn option_predicate(atom: &Atom, difficulty: Difficulty) -> Result<Predicate> {
    let parsed = parse_and(std::slice::from_ref(atom), difficulty)?;
    let mut leaves: Vec<Predicate> = parsed
        .capabilities
        .into_iter()
        .map(Predicate::HasCapability)
        .collect();
    leaves.extend(parsed.facts.into_iter().map(Predicate::from));
    Ok(Predicate::all(leaves))
}

fn base_cost(and: &AndResult, difficulty: Difficulty) -> ResourceCost {
    ResourceCost {
        damage: and.damage.clone(),
        combat: and.combat.clone(),
        charges: and.charges.clone(),
        difficulty,
    }
}
