//! Difficulty, tier, and path vocabulary shared by every layer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logic difficulty of a path.
///
/// The discriminants are the numeric levels used by the area threshold table
/// and by cost arithmetic: moki=0, gorlek=1, kii=3, unsafe=5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    /// Easy, default logic.
    #[default]
    Moki = 0,
    /// Medium logic.
    Gorlek = 1,
    /// Hard logic.
    Kii = 3,
    /// Unsafe logic.
    Unsafe = 5,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 4] = [Self::Moki, Self::Gorlek, Self::Kii, Self::Unsafe];

    /// Parses a difficulty keyword (`moki`, `gorlek`, `kii`, `unsafe`).
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "moki" => Some(Self::Moki),
            "gorlek" => Some(Self::Gorlek),
            "kii" => Some(Self::Kii),
            "unsafe" => Some(Self::Unsafe),
            _ => None,
        }
    }

    /// Returns the numeric level of this difficulty.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Returns the keyword used in source documents.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Moki => "moki",
            Self::Gorlek => "gorlek",
            Self::Kii => "kii",
            Self::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One of the seven output buckets for compiled rules.
///
/// Moki has no glitched variant; every other difficulty is split into a clean
/// and a glitched bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tier {
    /// Moki rules.
    Moki,
    /// Gorlek rules.
    Gorlek,
    /// Gorlek rules with glitches.
    GorlekGlitched,
    /// Kii rules.
    Kii,
    /// Kii rules with glitches.
    KiiGlitched,
    /// Unsafe rules.
    Unsafe,
    /// Unsafe rules with glitches.
    UnsafeGlitched,
}

impl Tier {
    /// Number of tiers.
    pub const COUNT: usize = 7;

    /// All tiers in output order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Moki,
        Self::Gorlek,
        Self::GorlekGlitched,
        Self::Kii,
        Self::KiiGlitched,
        Self::Unsafe,
        Self::UnsafeGlitched,
    ];

    /// Selects the bucket for a difficulty and glitched flag.
    ///
    /// A glitched moki rule is placed with gorlek glitches, the lowest
    /// glitched bucket.
    #[must_use]
    pub const fn new(difficulty: Difficulty, glitched: bool) -> Self {
        match (difficulty, glitched) {
            (Difficulty::Moki, false) => Self::Moki,
            (Difficulty::Gorlek, false) => Self::Gorlek,
            (Difficulty::Moki | Difficulty::Gorlek, true) => Self::GorlekGlitched,
            (Difficulty::Kii, false) => Self::Kii,
            (Difficulty::Kii, true) => Self::KiiGlitched,
            (Difficulty::Unsafe, false) => Self::Unsafe,
            (Difficulty::Unsafe, true) => Self::UnsafeGlitched,
        }
    }

    /// Returns the position of this tier in output order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the difficulty this tier belongs to.
    #[must_use]
    pub const fn difficulty(self) -> Difficulty {
        match self {
            Self::Moki => Difficulty::Moki,
            Self::Gorlek | Self::GorlekGlitched => Difficulty::Gorlek,
            Self::Kii | Self::KiiGlitched => Difficulty::Kii,
            Self::Unsafe | Self::UnsafeGlitched => Difficulty::Unsafe,
        }
    }

    /// Returns true for the glitched buckets.
    #[must_use]
    pub const fn is_glitched(self) -> bool {
        matches!(
            self,
            Self::GorlekGlitched | Self::KiiGlitched | Self::UnsafeGlitched
        )
    }

    /// Returns the snake-case bucket name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Moki => "moki",
            Self::Gorlek => "gorlek",
            Self::GorlekGlitched => "gorlek_glitched",
            Self::Kii => "kii",
            Self::KiiGlitched => "kii_glitched",
            Self::Unsafe => "unsafe",
            Self::UnsafeGlitched => "unsafe_glitched",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of an outgoing path declared under an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathKind {
    /// Connection to another anchor.
    Connection,
    /// State flag.
    State,
    /// Item pickup location.
    Pickup,
    /// Resource refill.
    Refill,
    /// Quest flag.
    Quest,
    /// Door to another door node.
    Door,
}

impl PathKind {
    /// Parses a path keyword (`conn`, `state`, `pickup`, `refill`, `quest`, `door`).
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "conn" => Some(Self::Connection),
            "state" => Some(Self::State),
            "pickup" => Some(Self::Pickup),
            "refill" => Some(Self::Refill),
            "quest" => Some(Self::Quest),
            "door" => Some(Self::Door),
            _ => None,
        }
    }

    /// Returns the keyword used in source documents.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Connection => "conn",
            Self::State => "state",
            Self::Pickup => "pickup",
            Self::Refill => "refill",
            Self::Quest => "quest",
            Self::Door => "door",
        }
    }

    /// Returns true if paths of this kind lead to another anchor and can
    /// therefore cross into a new area.
    #[must_use]
    pub const fn crosses_areas(self) -> bool {
        matches!(self, Self::Connection | Self::Door)
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Refill marker stored in the refill table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefillKind {
    /// No checkpoint or full refill.
    #[default]
    None = 0,
    /// Checkpoint refill.
    Checkpoint = 1,
    /// Full refill.
    Full = 2,
}

impl RefillKind {
    /// Returns the numeric code (0, 1, 2).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}
