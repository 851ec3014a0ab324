//! Conjunction parser.
//!
//! Classifies every AND-ed atom of a requirement and aggregates what the
//! rule needs: capabilities, events, counted thresholds, and costs.

use arealogic_foundation::{Difficulty, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::atom::Atom;
use crate::combat::{CostEntry, CostKind, combat_cost};
use crate::vocabulary::{
    AtomClass, CountedResource, EnergyWeapon, FREE, classify, wall_break_multiplier,
};

/// A boolean fact a rule depends on, other than a plain capability.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fact {
    /// A named event or state flag.
    Event(String),
    /// A counted resource threshold.
    Count {
        /// The resource.
        resource: CountedResource,
        /// Minimum amount held.
        amount: u32,
    },
}

/// Energy weapon charges spent by a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeaponCharge {
    /// The weapon used.
    pub weapon: EnergyWeapon,
    /// Number of uses.
    pub charges: u32,
}

/// Everything an AND-list of atoms requires.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AndResult {
    /// Plain capabilities, deduplicated, in first-seen order.
    pub capabilities: Vec<String>,
    /// Events and counted thresholds, deduplicated.
    pub facts: Vec<Fact>,
    /// Flat health damage taken.
    pub damage: Vec<f64>,
    /// Combat, boss and wall cost entries.
    pub combat: Vec<CostEntry>,
    /// Energy weapon charges, summed per weapon.
    pub charges: Vec<WeaponCharge>,
    /// Combo glitch techniques, deduplicated.
    pub techniques: Vec<String>,
    /// Whether any glitch atom was present.
    pub glitched: bool,
}

impl AndResult {
    /// Returns true if the result carries any cost to aggregate.
    #[must_use]
    pub fn has_cost(&self) -> bool {
        !self.damage.is_empty() || !self.combat.is_empty() || !self.charges.is_empty()
    }

    fn add_capability(&mut self, name: &str) {
        if name != FREE && !self.capabilities.iter().any(|c| c == name) {
            self.capabilities.push(name.to_string());
        }
    }

    fn add_fact(&mut self, fact: Fact) {
        if !self.facts.contains(&fact) {
            self.facts.push(fact);
        }
    }

    fn add_charges(&mut self, weapon: EnergyWeapon, charges: u32) {
        match self.charges.iter_mut().find(|c| c.weapon == weapon) {
            Some(existing) => existing.charges = existing.charges.saturating_add(charges),
            None => self.charges.push(WeaponCharge { weapon, charges }),
        }
    }

    fn add_technique(&mut self, name: &str) {
        if !self.techniques.iter().any(|t| t == name) {
            self.techniques.push(name.to_string());
        }
    }
}

/// Parses an AND-list of atoms at the given difficulty.
///
/// The result depends only on the inputs, so parsing the same list twice
/// yields the same result.
///
/// # Errors
/// Returns an error for unknown enemies, unknown counted resources, and
/// malformed payloads.
pub fn parse_and(atoms: &[Atom], difficulty: Difficulty) -> Result<AndResult> {
    let mut result = AndResult::default();

    for atom in atoms {
        let name = atom.canonical();
        if name == FREE && atom.payload.is_none() {
            continue;
        }

        match classify(atom)? {
            AtomClass::ComboGlitch => {
                result.glitched = true;
                result.add_technique(name);
            }
            AtomClass::InfiniteGlitch { skill } => {
                result.glitched = true;
                result.add_capability(skill);
            }
            AtomClass::ResourceGlitch { skills } => {
                result.glitched = true;
                let charges = glitch_charges(atom)?;
                if let Some(multiplier) = wall_break_multiplier(name, difficulty) {
                    result
                        .combat
                        .push(CostEntry::new(f64::from(charges) * multiplier, CostKind::Wall));
                    for skill in skills {
                        result.add_capability(skill);
                    }
                } else {
                    for skill in skills {
                        match EnergyWeapon::from_name(skill) {
                            Some(weapon) => result.add_charges(weapon, charges),
                            None => result.add_capability(skill),
                        }
                    }
                }
            }
            AtomClass::Capability => result.add_capability(name),
            AtomClass::EnergyCharge(weapon) => {
                let charges = atom.count_payload()?;
                result.add_charges(weapon, charges);
            }
            AtomClass::Damage => {
                required_payload(atom)?;
                result.damage.push(atom.amount_payload()?);
            }
            AtomClass::Encounter(encounter) => {
                let cost = combat_cost(encounter, required_payload(atom)?)?;
                result.combat.extend(cost.entries);
                for hazard in cost.hazards {
                    result.add_fact(Fact::Event(hazard.event_name()));
                }
            }
            AtomClass::Counted(resource) => {
                let amount = atom.count_payload()?;
                result.add_fact(Fact::Count { resource, amount });
            }
            AtomClass::Event => {
                let event = match &atom.payload {
                    Some(payload) => format!("{name}={payload}"),
                    None => name.to_string(),
                };
                result.add_fact(Fact::Event(event));
            }
        }
    }

    Ok(result)
}

/// Charge count of a resource glitch; a bare glitch token means one use.
fn glitch_charges(atom: &Atom) -> Result<u32> {
    if atom.payload.is_some() {
        atom.count_payload()
    } else {
        Ok(1)
    }
}

fn required_payload(atom: &Atom) -> Result<&str> {
    atom.payload
        .as_deref()
        .ok_or_else(|| Error::invalid_payload(&atom.name, ""))
}
