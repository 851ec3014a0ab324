//! Combat cost calculation.
//!
//! Resolves encounter payloads (`Combat=2xMantis+Skeeto`, `Boss=300`,
//! `BreakWall=16`) into damage cost entries and hazard tags.

use std::fmt;

use arealogic_foundation::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marker in a combat payload that grants energy refills instead of damage.
pub const ENERGY_REFILL: &str = "EnergyRefill";

/// Largest `N` accepted in an `NxEnemy` multiplier.
pub const MAX_MULTIPLIER: u32 = 64;

/// Hazard posed by an enemy, beyond its health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hazard {
    /// No special hazard.
    Free,
    /// Attacks from range.
    Ranged,
    /// Hits hard.
    Dangerous,
    /// Flies.
    Aerial,
    /// Blocks frontal attacks.
    Shielded,
    /// Bat-specific behaviour.
    Bat,
    /// Burrows in sand.
    Sand,
}

impl Hazard {
    /// Returns the hazard name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Ranged => "Ranged",
            Self::Dangerous => "Dangerous",
            Self::Aerial => "Aerial",
            Self::Shielded => "Shielded",
            Self::Bat => "Bat",
            Self::Sand => "Sand",
        }
    }

    /// Returns the event that gates fighting enemies with this hazard,
    /// e.g. `Combat.Ranged`.
    #[must_use]
    pub fn event_name(self) -> String {
        format!("Combat.{}", self.name())
    }
}

/// Health and hazards of one enemy type.
#[derive(Clone, Copy, Debug)]
pub struct Enemy {
    /// Enemy name as written in combat payloads.
    pub name: &'static str,
    /// Health points.
    pub health: u32,
    /// Hazards posed by this enemy.
    pub hazards: &'static [Hazard],
}

/// Known enemies.
pub static ENEMIES: &[Enemy] = &[
    Enemy { name: "Mantis", health: 32, hazards: &[Hazard::Free] },
    Enemy { name: "Slug", health: 13, hazards: &[Hazard::Free] },
    Enemy { name: "WeakSlug", health: 12, hazards: &[Hazard::Free] },
    Enemy { name: "BombSlug", health: 1, hazards: &[Hazard::Ranged] },
    Enemy { name: "CorruptSlug", health: 1, hazards: &[Hazard::Ranged] },
    Enemy { name: "SneezeSlug", health: 32, hazards: &[Hazard::Dangerous] },
    Enemy { name: "ShieldSlug", health: 24, hazards: &[Hazard::Free] },
    Enemy { name: "Lizard", health: 24, hazards: &[Hazard::Free] },
    Enemy { name: "Bat", health: 32, hazards: &[Hazard::Bat, Hazard::Aerial, Hazard::Ranged] },
    Enemy { name: "Hornbug", health: 40, hazards: &[Hazard::Dangerous, Hazard::Shielded] },
    Enemy { name: "Skeeto", health: 20, hazards: &[Hazard::Aerial] },
    Enemy { name: "SmallSkeeto", health: 8, hazards: &[Hazard::Aerial] },
    Enemy { name: "Bee", health: 24, hazards: &[Hazard::Aerial] },
    Enemy { name: "Nest", health: 25, hazards: &[Hazard::Aerial] },
    Enemy { name: "Fish", health: 10, hazards: &[Hazard::Free] },
    Enemy { name: "Waterworm", health: 20, hazards: &[Hazard::Free] },
    Enemy { name: "Crab", health: 32, hazards: &[Hazard::Dangerous] },
    Enemy { name: "SpinCrab", health: 32, hazards: &[Hazard::Dangerous] },
    Enemy { name: "Tentacle", health: 40, hazards: &[Hazard::Ranged] },
    Enemy { name: "Balloon", health: 1, hazards: &[Hazard::Free] },
    Enemy { name: "Miner", health: 40, hazards: &[Hazard::Dangerous] },
    Enemy { name: "MaceMiner", health: 60, hazards: &[Hazard::Dangerous] },
    Enemy { name: "ShieldMiner", health: 60, hazards: &[Hazard::Dangerous, Hazard::Shielded] },
    Enemy { name: "CrystalMiner", health: 80, hazards: &[Hazard::Dangerous] },
    Enemy {
        name: "ShieldCrystalMiner",
        health: 50,
        hazards: &[Hazard::Dangerous, Hazard::Shielded],
    },
    Enemy { name: "Sandworm", health: 20, hazards: &[Hazard::Sand] },
    Enemy { name: "Spiderling", health: 12, hazards: &[Hazard::Free] },
];

/// Looks up an enemy by name.
#[must_use]
pub fn enemy(name: &str) -> Option<&'static Enemy> {
    ENEMIES.iter().find(|e| e.name == name)
}

/// Kind of encounter atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encounter {
    /// `Combat=...` with an enemy composition.
    Combat,
    /// `Boss=<health>`.
    Boss,
    /// `BreakWall=<health>`.
    BreakWall,
}

impl Encounter {
    /// Parses an encounter token name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Combat" => Some(Self::Combat),
            "Boss" => Some(Self::Boss),
            "BreakWall" => Some(Self::BreakWall),
            _ => None,
        }
    }
}

/// What a cost entry pays for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CostKind {
    /// An enemy in a combat encounter.
    Combat,
    /// A boss.
    Boss,
    /// A breakable wall.
    Wall,
    /// An energy refill granted mid-combat.
    Refill,
}

impl CostKind {
    /// Returns the kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Combat => "Combat",
            Self::Boss => "Boss",
            Self::Wall => "Wall",
            Self::Refill => "Refill",
        }
    }
}

/// One damage target (or refill credit) in a cost calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostEntry {
    /// Health to deal, or zero for refills.
    pub amount: f64,
    /// What the entry pays for.
    pub kind: CostKind,
}

impl CostEntry {
    /// Creates a new cost entry.
    #[must_use]
    pub const fn new(amount: f64, kind: CostKind) -> Self {
        Self { amount, kind }
    }
}

impl fmt::Display for CostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, \"{}\"]", format_amount(self.amount), self.kind.name())
    }
}

/// Formats an amount without a trailing `.0` for whole numbers.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

/// Result of resolving one encounter atom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombatCost {
    /// Cost entries, one per enemy instance.
    pub entries: Vec<CostEntry>,
    /// Union of non-free hazards, in first-seen order.
    pub hazards: Vec<Hazard>,
}

/// Resolves an encounter payload into cost entries and hazards.
///
/// # Errors
/// Returns an error for unknown enemies and malformed payloads.
pub fn combat_cost(encounter: Encounter, payload: &str) -> Result<CombatCost> {
    match encounter {
        Encounter::Combat => enemy_cost(payload),
        Encounter::Boss => single_cost(payload, "Boss", CostKind::Boss),
        Encounter::BreakWall => single_cost(payload, "BreakWall", CostKind::Wall),
    }
}

fn single_cost(payload: &str, token: &str, kind: CostKind) -> Result<CombatCost> {
    let health: u32 = payload
        .trim()
        .parse()
        .map_err(|_| Error::invalid_payload(token, payload))?;
    Ok(CombatCost {
        entries: vec![CostEntry::new(f64::from(health), kind)],
        hazards: Vec::new(),
    })
}

fn enemy_cost(payload: &str) -> Result<CombatCost> {
    let mut cost = CombatCost::default();

    for spec in payload.split('+').map(str::trim) {
        if spec.is_empty() {
            return Err(Error::invalid_payload("Combat", payload));
        }
        let (count, name) = split_multiplier(spec);
        if count > MAX_MULTIPLIER {
            return Err(Error::invalid_payload("Combat", payload));
        }

        if name == ENERGY_REFILL {
            for _ in 0..count {
                cost.entries.push(CostEntry::new(0.0, CostKind::Refill));
            }
            continue;
        }

        let enemy = enemy(name).ok_or_else(|| Error::unknown_enemy(name))?;
        for _ in 0..count {
            cost.entries
                .push(CostEntry::new(f64::from(enemy.health), CostKind::Combat));
        }
        for hazard in enemy.hazards {
            if *hazard != Hazard::Free && !cost.hazards.contains(hazard) {
                cost.hazards.push(*hazard);
            }
        }
    }

    Ok(cost)
}

/// Splits `N x Name` / `NxName` into `(N, Name)`; the multiplier defaults to 1.
fn split_multiplier(spec: &str) -> (u32, &str) {
    if let Some((count, name)) = spec.split_once('x') {
        if let Ok(count) = count.trim().parse() {
            return (count, name.trim());
        }
    }
    (1, spec)
}
