//! Static capability knowledge.
//!
//! Maps atom names to one of the capability categories: plain skills,
//! energy weapons, glitches, encounters, counted resources, and events.

use std::fmt;

use arealogic_foundation::{Difficulty, Error, ErrorKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::atom::Atom;
use crate::combat::Encounter;

/// The universal "no requirement" capability.
pub const FREE: &str = "free";

/// Token name for flat health damage.
pub const DAMAGE: &str = "Damage";

/// Source names that differ from their canonical capability name.
static NAME_CONVERSIONS: &[(&str, &str)] = &[
    ("DoubleJump", "Double Jump"),
    ("WaterDash", "Water Dash"),
    ("WaterBreath", "Water Breath"),
    ("TripleJump", "Triple Jump"),
    ("Water", "Clean Water"),
    ("BurrowsTP", "Midnight Burrows TP"),
    ("DenTP", "Howl's Den TP"),
    ("EastPoolsTP", "Central Luma TP"),
    ("DepthsTP", "Mouldwood Depths TP"),
    ("WellspringTP", "Wellspring TP"),
    ("ReachTP", "Baur's Reach TP"),
    ("HollowTP", "Kwolok's Hollow TP"),
    ("WestWoodsTP", "Woods Entrance TP"),
    ("EastWoodsTP", "Woods Exit TP"),
    ("WestWastesTP", "Feeding Grounds TP"),
    ("EastWastesTP", "Central Wastes TP"),
    ("OuterRuinsTP", "Outer Ruins TP"),
    ("WillowTP", "Willow's End TP"),
    ("MarshTP", "Inkwater Marsh TP"),
    ("GladesTP", "Glades TP"),
    ("WestPoolsTP", "Luma Boss TP"),
    ("InnerRuinsTP", "Inner Ruins TP"),
    ("ShriekTP", "Shriek TP"),
    ("Ore", "Gorlek Ore"),
];

/// Capabilities that can be used without limit.
///
/// Energy weapons appear here too: written without a charge count they are
/// plain capability checks.
pub static INFINITE_SKILLS: &[&str] = &[
    "Sword",
    "Double Jump",
    "Regenerate",
    "Dash",
    "Bash",
    "Grapple",
    "Glide",
    "Flap",
    "Water Dash",
    "Burrow",
    "Launch",
    "Clean Water",
    "Water Breath",
    "Hammer",
    FREE,
    "Bow",
    "Grenade",
    "Flash",
    "Sentry",
    "Shuriken",
    "Spear",
    "Blaze",
];

/// Returns the canonical capability name for a source token.
#[must_use]
pub fn canonical_name(name: &str) -> &str {
    NAME_CONVERSIONS
        .iter()
        .find(|(source, _)| *source == name)
        .map_or(name, |(_, canonical)| canonical)
}

/// Returns true if `name` (canonical) is an infinite-use capability.
#[must_use]
pub fn is_infinite_skill(name: &str) -> bool {
    INFINITE_SKILLS.contains(&name)
}

/// A skill that consumes energy per use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnergyWeapon {
    /// Spirit Arc.
    Bow,
    /// Grenade.
    Grenade,
    /// Flash.
    Flash,
    /// Sentry.
    Sentry,
    /// Shuriken.
    Shuriken,
    /// Spear.
    Spear,
    /// Blaze.
    Blaze,
}

impl EnergyWeapon {
    /// All energy weapons.
    pub const ALL: [Self; 7] = [
        Self::Bow,
        Self::Grenade,
        Self::Flash,
        Self::Sentry,
        Self::Shuriken,
        Self::Spear,
        Self::Blaze,
    ];

    /// Parses a weapon name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.name() == name)
    }

    /// Returns the weapon name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bow => "Bow",
            Self::Grenade => "Grenade",
            Self::Flash => "Flash",
            Self::Sentry => "Sentry",
            Self::Shuriken => "Shuriken",
            Self::Spear => "Spear",
            Self::Blaze => "Blaze",
        }
    }
}

impl fmt::Display for EnergyWeapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A glitch and what it is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glitch {
    /// Infinite-use glitch combining two skills; emitted as a named technique.
    Combo,
    /// Infinite-use glitch relying on one skill (or on nothing, for `free`).
    Infinite {
        /// The skill it needs.
        skill: &'static str,
    },
    /// Glitch that spends weapon charges.
    Resource {
        /// The skills it needs; energy weapons among them are charged.
        skills: &'static [&'static str],
    },
}

static COMBO_GLITCHES: &[&str] = &["WaveDash", "HammerJump", "SwordJump", "GlideHammerJump"];

static INFINITE_GLITCHES: &[(&str, &str)] = &[
    ("RemoveKillPlane", FREE),
    ("HammerBreak", "Hammer"),
    ("LaunchSwap", "Launch"),
    ("FlashSwap", "Flash"),
    ("GrenadeJump", "Grenade"),
    ("GrenadeCancel", "Grenade"),
    ("BowCancel", "Bow"),
    ("PauseHover", FREE),
    ("GlideJump", "Glide"),
];

static RESOURCE_GLITCHES: &[(&str, &[&str])] = &[
    ("ShurikenBreak", &["Shuriken"]),
    ("SentryJump", &["Sentry"]),
    ("SwordSJump", &["Sword", "Sentry"]),
    ("HammerSJump", &["Hammer", "Sentry"]),
    ("SentryBurn", &["Sentry"]),
    ("SentryBreak", &["Sentry"]),
    ("SpearBreak", &["Spear"]),
    ("SentrySwap", &["Sentry"]),
    ("BlazeSwap", &["Blaze"]),
    ("GrenadeRedirect", &["Grenade"]),
    ("SentryRedirect", &["Sentry"]),
    ("SpearJump", &["Spear"]),
];

/// Names of the combo glitches, which are tracked as events downstream.
#[must_use]
pub fn combo_glitches() -> &'static [&'static str] {
    COMBO_GLITCHES
}

/// Looks up a glitch by token name.
#[must_use]
pub fn glitch(name: &str) -> Option<Glitch> {
    if COMBO_GLITCHES.contains(&name) {
        return Some(Glitch::Combo);
    }
    if let Some((_, skill)) = INFINITE_GLITCHES.iter().find(|(g, _)| *g == name) {
        return Some(Glitch::Infinite { skill });
    }
    RESOURCE_GLITCHES
        .iter()
        .find(|(g, _)| *g == name)
        .map(|(_, skills)| Glitch::Resource { skills })
}

/// Wall-breaking glitches whose charge count converts into wall damage.
///
/// Returns the damage per charge at the given difficulty.
#[must_use]
pub fn wall_break_multiplier(name: &str, difficulty: Difficulty) -> Option<f64> {
    match name {
        "ShurikenBreak" if difficulty == Difficulty::Unsafe => Some(2.0),
        "ShurikenBreak" => Some(3.0),
        "SentryBreak" => Some(6.25),
        _ => None,
    }
}

/// A resource tracked by count rather than by possession.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CountedResource {
    /// Keystones.
    Keystone,
    /// Gorlek Ore.
    Ore,
    /// Spirit Light currency.
    SpiritLight,
}

impl CountedResource {
    /// Parses a canonical resource name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Keystone" => Some(Self::Keystone),
            "Gorlek Ore" => Some(Self::Ore),
            "SpiritLight" => Some(Self::SpiritLight),
            _ => None,
        }
    }

    /// Returns the canonical resource name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keystone => "Keystone",
            Self::Ore => "Gorlek Ore",
            Self::SpiritLight => "SpiritLight",
        }
    }
}

impl fmt::Display for CountedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name stems that mark a counted-resource token.
static COUNTED_STEMS: &[&str] = &["Keystone", "Ore", "SpiritLight"];

/// Category of a requirement atom, in classification priority order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AtomClass {
    /// Combo glitch (two skills, infinite use).
    ComboGlitch,
    /// Single-skill infinite glitch.
    InfiniteGlitch {
        /// The skill it needs.
        skill: &'static str,
    },
    /// Charge-spending glitch.
    ResourceGlitch {
        /// The skills it needs.
        skills: &'static [&'static str],
    },
    /// Plain infinite-use capability.
    Capability,
    /// Energy weapon with a charge count.
    EnergyCharge(EnergyWeapon),
    /// Flat health damage.
    Damage,
    /// Combat, boss, or breakable wall.
    Encounter(Encounter),
    /// Counted resource threshold.
    Counted(CountedResource),
    /// Any other named event.
    Event,
}

impl AtomClass {
    /// Returns true for the three glitch categories.
    #[must_use]
    pub const fn is_glitch(self) -> bool {
        matches!(
            self,
            Self::ComboGlitch | Self::InfiniteGlitch { .. } | Self::ResourceGlitch { .. }
        )
    }

    /// Returns true for categories that contribute to cost aggregation.
    #[must_use]
    pub const fn is_resource(self) -> bool {
        matches!(self, Self::EnergyCharge(_) | Self::Damage | Self::Encounter(_))
    }
}

/// Classifies an atom.
///
/// # Errors
/// Returns an error if the atom looks like a counted resource (a stem such
/// as `Keystone` with a payload) but names no known resource.
pub fn classify(atom: &Atom) -> Result<AtomClass> {
    let name = atom.canonical();

    if let Some(glitch) = glitch(name) {
        return Ok(match glitch {
            Glitch::Combo => AtomClass::ComboGlitch,
            Glitch::Infinite { skill } => AtomClass::InfiniteGlitch { skill },
            Glitch::Resource { skills } => AtomClass::ResourceGlitch { skills },
        });
    }

    if atom.payload.is_none() && is_infinite_skill(name) {
        return Ok(AtomClass::Capability);
    }

    if atom.payload.is_some() {
        if let Some(weapon) = EnergyWeapon::from_name(name) {
            return Ok(AtomClass::EnergyCharge(weapon));
        }
    }

    if name == DAMAGE {
        return Ok(AtomClass::Damage);
    }

    if let Some(encounter) = Encounter::from_name(name) {
        return Ok(AtomClass::Encounter(encounter));
    }

    if atom.payload.is_some() && COUNTED_STEMS.iter().any(|stem| name.contains(stem)) {
        return CountedResource::from_name(name)
            .map(AtomClass::Counted)
            .ok_or_else(|| Error::new(ErrorKind::UnknownCountedResource(name.to_string())));
    }

    Ok(AtomClass::Event)
}
