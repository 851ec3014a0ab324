//! Compiled predicate trees.
//!
//! A [`Predicate`] is a boolean expression over player state. The compiler
//! never evaluates predicates; it builds them for an external consumer.

use std::fmt;

use arealogic_foundation::Difficulty;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::combat::{CostEntry, format_amount};
use crate::conjunction::{Fact, WeaponCharge};
use crate::vocabulary::CountedResource;

/// An aggregated resource check: can the player pay all of these costs
/// at the given difficulty?
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceCost {
    /// Flat damage taken.
    pub damage: Vec<f64>,
    /// Combat, boss and wall entries.
    pub combat: Vec<CostEntry>,
    /// Energy weapon charges.
    pub charges: Vec<WeaponCharge>,
    /// Difficulty the costs are evaluated at.
    pub difficulty: Difficulty,
}

impl ResourceCost {
    /// Creates an empty cost at the given difficulty.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Returns true if nothing is paid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.damage.is_empty() && self.combat.is_empty() && self.charges.is_empty()
    }

    /// Adds all costs of `other` to this one, summing charges per weapon.
    pub fn merge(&mut self, other: &Self) {
        self.damage.extend_from_slice(&other.damage);
        self.combat.extend_from_slice(&other.combat);
        for charge in &other.charges {
            match self.charges.iter_mut().find(|c| c.weapon == charge.weapon) {
                Some(existing) => {
                    existing.charges = existing.charges.saturating_add(charge.charges);
                }
                None => self.charges.push(*charge),
            }
        }
    }
}

impl fmt::Display for ResourceCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(
            self.damage
                .iter()
                .map(|d| format!("{} damage", format_amount(*d))),
        );
        parts.extend(self.combat.iter().map(ToString::to_string));
        parts.extend(
            self.charges
                .iter()
                .map(|c| format!("{}x{}", c.charges, c.weapon)),
        );
        write!(f, "cost[{}; {}]", parts.join(", "), self.difficulty)
    }
}

/// A boolean expression over player state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Predicate {
    /// All sub-predicates hold. An empty list is always true.
    And(Vec<Predicate>),
    /// At least one sub-predicate holds.
    Or(Vec<Predicate>),
    /// The player has an infinite-use capability.
    HasCapability(String),
    /// A named event or state flag is set.
    HasEvent(String),
    /// The player holds at least `amount` of a counted resource.
    HasCount {
        /// The resource.
        resource: CountedResource,
        /// Minimum amount.
        amount: u32,
    },
    /// A combo glitch technique is allowed and possible.
    Technique(String),
    /// The player meets the entry threshold of an area at a difficulty.
    AreaEntry {
        /// Destination area.
        area: String,
        /// Difficulty the threshold is looked up at.
        difficulty: Difficulty,
    },
    /// The player can pay an aggregated resource cost.
    CombatCost(ResourceCost),
}

impl Predicate {
    /// The always-true predicate.
    #[must_use]
    pub const fn free() -> Self {
        Self::And(Vec::new())
    }

    /// Returns true for the always-true predicate.
    #[must_use]
    pub fn is_free(&self) -> bool {
        matches!(self, Self::And(parts) if parts.is_empty())
    }

    /// Conjunction of `parts`; a single part is returned unwrapped.
    #[must_use]
    pub fn all(mut parts: Vec<Self>) -> Self {
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Self::And(parts)
        }
    }

    /// Disjunction of `parts`; a single part is returned unwrapped.
    #[must_use]
    pub fn any(mut parts: Vec<Self>) -> Self {
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Self::Or(parts)
        }
    }

    /// Returns true if this predicate or any nested one satisfies `test`.
    pub fn contains(&self, test: &impl Fn(&Self) -> bool) -> bool {
        if test(self) {
            return true;
        }
        match self {
            Self::And(parts) | Self::Or(parts) => parts.iter().any(|p| p.contains(test)),
            _ => false,
        }
    }

    /// Returns true if a capability check for `name` appears anywhere.
    #[must_use]
    pub fn requires_capability(&self, name: &str) -> bool {
        self.contains(&|p| matches!(p, Self::HasCapability(c) if c == name))
    }

    /// Returns true if any resource cost check appears anywhere.
    #[must_use]
    pub fn has_cost(&self) -> bool {
        self.contains(&|p| matches!(p, Self::CombatCost(_)))
    }

    /// Collects every area-entry check, depth first.
    #[must_use]
    pub fn area_entries(&self) -> Vec<(&str, Difficulty)> {
        let mut found = Vec::new();
        self.collect_area_entries(&mut found);
        found
    }

    fn collect_area_entries<'a>(&'a self, found: &mut Vec<(&'a str, Difficulty)>) {
        match self {
            Self::And(parts) | Self::Or(parts) => {
                for part in parts {
                    part.collect_area_entries(found);
                }
            }
            Self::AreaEntry { area, difficulty } => found.push((area.as_str(), *difficulty)),
            _ => {}
        }
    }
}

impl From<Fact> for Predicate {
    fn from(fact: Fact) -> Self {
        match fact {
            Fact::Event(name) => Self::HasEvent(name),
            Fact::Count { resource, amount } => Self::HasCount { resource, amount },
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, parts: &[Predicate]) -> fmt::Result {
    write!(f, "{head}(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(parts) if parts.is_empty() => f.write_str("free"),
            Self::And(parts) => write_list(f, "all", parts),
            Self::Or(parts) => write_list(f, "any", parts),
            Self::HasCapability(name) => write!(f, "has({name})"),
            Self::HasEvent(name) => write!(f, "event({name})"),
            Self::HasCount { resource, amount } => write!(f, "count({resource}, {amount})"),
            Self::Technique(name) => write!(f, "technique({name})"),
            Self::AreaEntry { area, difficulty } => write!(f, "area({area}, {difficulty})"),
            Self::CombatCost(cost) => write!(f, "{cost}"),
        }
    }
}
