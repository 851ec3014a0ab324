//! Area-entry thresholds.
//!
//! Compiled rules do not inline health or regeneration checks when an edge
//! crosses into a new area. They carry an [`crate::Predicate::AreaEntry`]
//! leaf, and the consumer resolves it against this table at evaluation time.

use std::collections::{BTreeMap, BTreeSet};

use arealogic_foundation::{Difficulty, Error, ErrorKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entry threshold of one area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaThreshold {
    /// Health needed at the lowest difficulty.
    pub health: u32,
    /// Whether Regenerate is needed.
    pub regenerate: bool,
}

/// What entering an area requires at a given difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AreaRequirement {
    /// Minimum health, zero for none.
    pub health: u32,
    /// Whether Regenerate is needed.
    pub regenerate: bool,
}

impl AreaRequirement {
    /// Returns true if nothing is required.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.health == 0 && !self.regenerate
    }
}

/// Built-in thresholds: `(area, health, regenerate)`.
const BUILTIN_THRESHOLDS: &[(&str, u32, bool)] = &[
    ("MidnightBurrows", 25, false),
    ("EastHollow", 20, false),
    ("WestHollow", 20, false),
    ("WestGlades", 20, false),
    ("OuterWellspring", 25, false),
    ("InnerWellspring", 25, false),
    ("WoodsEntry", 40, true),
    ("WoodsMain", 40, true),
    ("LowerReach", 40, true),
    ("UpperReach", 40, true),
    ("UpperDepths", 40, true),
    ("LowerDepths", 40, true),
    ("PoolsApproach", 25, true),
    ("EastPools", 40, true),
    ("UpperPools", 40, true),
    ("WestPools", 40, true),
    ("LowerWastes", 50, true),
    ("UpperWastes", 50, true),
    ("WindtornRuins", 50, true),
    ("WeepingRidge", 60, true),
    ("WillowsEnd", 60, true),
];

/// Areas that can be entered without any threshold.
const BUILTIN_SAFE: &[&str] = &["MarshSpawn", "HowlsDen", "MarshPastOpher", "GladesTown"];

/// Area-entry threshold table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaTable {
    thresholds: BTreeMap<String, AreaThreshold>,
    safe: BTreeSet<String>,
}

impl Default for AreaTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for &(area, health, regenerate) in BUILTIN_THRESHOLDS {
            table.insert(area, AreaThreshold { health, regenerate });
        }
        for area in BUILTIN_SAFE {
            table.insert_safe(area);
        }
        table
    }
}

impl AreaTable {
    /// Creates a table with no areas.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            thresholds: BTreeMap::new(),
            safe: BTreeSet::new(),
        }
    }

    /// Parses a table from text.
    ///
    /// Each non-blank line is `<Area> <health> [regen]` or `<Area> safe`.
    /// `#` starts a comment.
    ///
    /// # Errors
    /// Returns an error for lines that do not follow that shape.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::empty();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let result = match fields.as_slice() {
                [area, "safe"] => {
                    table.insert_safe(area);
                    Ok(())
                }
                [area, health] | [area, health, "regen"] => health
                    .parse()
                    .map(|health| {
                        table.insert(
                            area,
                            AreaThreshold {
                                health,
                                regenerate: fields.len() == 3,
                            },
                        );
                    })
                    .map_err(|_| Error::invalid_payload(*area, *health)),
                _ => Err(Error::malformed(format!(
                    "expected '<area> <health> [regen]', got {line:?}"
                ))),
            };
            result.map_err(|e| e.at_line(index + 1, raw))?;
        }
        Ok(table)
    }

    /// Adds or replaces an area threshold.
    pub fn insert(&mut self, area: &str, threshold: AreaThreshold) {
        self.safe.remove(area);
        self.thresholds.insert(area.to_string(), threshold);
    }

    /// Marks an area as safe.
    pub fn insert_safe(&mut self, area: &str) {
        self.thresholds.remove(area);
        self.safe.insert(area.to_string());
    }

    /// Returns the raw threshold of an area.
    #[must_use]
    pub fn threshold(&self, area: &str) -> Option<AreaThreshold> {
        self.thresholds.get(area).copied()
    }

    /// Returns true if the area is safe.
    #[must_use]
    pub fn is_safe(&self, area: &str) -> bool {
        self.safe.contains(area)
    }

    /// Number of known areas, safe ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len() + self.safe.len()
    }

    /// Returns true if no area is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves what entering `area` requires at `difficulty`.
    ///
    /// Unsafe needs nothing. Gorlek and kii need only Regenerate where the
    /// area asks for it. Moki needs the full health threshold as well.
    ///
    /// # Errors
    /// Returns an error if the area is unknown.
    pub fn requirement(&self, area: &str, difficulty: Difficulty) -> Result<AreaRequirement> {
        if self.is_safe(area) {
            return Ok(AreaRequirement::default());
        }
        let threshold = self
            .threshold(area)
            .ok_or_else(|| Error::new(ErrorKind::UnknownArea(area.to_string())))?;

        Ok(match difficulty {
            Difficulty::Unsafe => AreaRequirement::default(),
            Difficulty::Gorlek | Difficulty::Kii => AreaRequirement {
                health: 0,
                regenerate: threshold.regenerate,
            },
            Difficulty::Moki => AreaRequirement {
                health: threshold.health,
                regenerate: threshold.regenerate,
            },
        })
    }
}

/// Returns the area prefix of a dotted node name (`Area.Anchor` -> `Area`).
#[must_use]
pub fn area_of(node: &str) -> Option<&str> {
    node.split_once('.').map(|(area, _)| area)
}
