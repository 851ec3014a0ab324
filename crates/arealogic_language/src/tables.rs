//! Output tables produced by compilation.

use std::collections::{HashMap, HashSet};
use std::fmt;

use arealogic_foundation::{Error, RefillKind, Result, Tier};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::predicate::Predicate;

// =============================================================================
// Refills
// =============================================================================

/// Refill capacities of one anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefillEntry {
    /// Health restored; `None` until a declaration sets it.
    pub health: Option<u32>,
    /// Energy restored; `None` until a declaration sets it.
    pub energy: Option<u32>,
    /// Checkpoint or full refill.
    pub kind: RefillKind,
}

/// A refill declared by a `refill` path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefillToken {
    /// `Health[=n]`.
    Health(u32),
    /// `Energy[=n]`.
    Energy(u32),
    /// `Checkpoint`.
    Checkpoint,
    /// `Full`.
    Full,
}

impl RefillToken {
    /// Parses a refill path name such as `Energy=2` or `Checkpoint`.
    ///
    /// # Errors
    /// Returns an error for unknown refill names or non-integer amounts.
    pub fn parse(text: &str) -> Result<Self> {
        let (name, amount) = match text.split_once('=') {
            Some((name, amount)) => (name.trim(), Some(amount.trim())),
            None => (text.trim(), None),
        };
        let amount = || -> Result<u32> {
            amount.map_or(Ok(1), |a| {
                a.parse().map_err(|_| Error::invalid_payload(name, a))
            })
        };
        match name {
            "Health" => Ok(Self::Health(amount()?)),
            "Energy" => Ok(Self::Energy(amount()?)),
            "Checkpoint" => Ok(Self::Checkpoint),
            "Full" => Ok(Self::Full),
            _ => Err(Error::malformed(format!("unknown refill '{text}'"))),
        }
    }

    /// Event prefix for this refill.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Health(_) => "Health",
            Self::Energy(_) => "Energy",
            Self::Checkpoint => "Checkpoint",
            Self::Full => "Full",
        }
    }

    /// Name of the refill event at `anchor`, e.g. `Energy.MarshSpawn.Main`.
    #[must_use]
    pub fn event_name(self, anchor: &str) -> String {
        format!("{}.{anchor}", self.prefix())
    }
}

/// Anchor refill capacities in declaration order.
///
/// Each resource is set at most once per anchor; later declarations for a
/// resource that is already set are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<(String, RefillEntry)>", into = "Vec<(String, RefillEntry)>")
)]
pub struct RefillTable {
    entries: Vec<(String, RefillEntry)>,
    index: HashMap<String, usize>,
}

impl RefillTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures an entry exists for `anchor`, starting at no refill.
    pub fn ensure(&mut self, anchor: &str) {
        self.slot(anchor);
    }

    fn slot(&mut self, anchor: &str) -> &mut RefillEntry {
        let index = match self.index.get(anchor) {
            Some(&index) => index,
            None => {
                self.entries.push((anchor.to_string(), RefillEntry::default()));
                let index = self.entries.len() - 1;
                self.index.insert(anchor.to_string(), index);
                index
            }
        };
        &mut self.entries[index].1
    }

    /// Applies a refill declaration. Returns true if the table changed.
    pub fn apply(&mut self, anchor: &str, token: RefillToken) -> bool {
        let entry = self.slot(anchor);
        match token {
            RefillToken::Health(amount) if entry.health.is_none() => entry.health = Some(amount),
            RefillToken::Energy(amount) if entry.energy.is_none() => entry.energy = Some(amount),
            RefillToken::Checkpoint if entry.kind == RefillKind::None => {
                entry.kind = RefillKind::Checkpoint;
            }
            RefillToken::Full if entry.kind == RefillKind::None => entry.kind = RefillKind::Full,
            _ => return false,
        }
        true
    }

    /// Looks up an anchor's entry.
    #[must_use]
    pub fn get(&self, anchor: &str) -> Option<&RefillEntry> {
        self.index.get(anchor).map(|&i| &self.entries[i].1)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RefillEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no anchor was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<(String, RefillEntry)>> for RefillTable {
    fn from(entries: Vec<(String, RefillEntry)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { entries, index }
    }
}

impl From<RefillTable> for Vec<(String, RefillEntry)> {
    fn from(table: RefillTable) -> Self {
        table.entries
    }
}

// =============================================================================
// Insertion-ordered name sets
// =============================================================================

/// Insertion-ordered set of unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct NameRegistry {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl NameRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a name. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    /// Returns true if the name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Names in insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for NameRegistry {
    fn from(names: Vec<String>) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.insert(name);
        }
        registry
    }
}

impl From<NameRegistry> for Vec<String> {
    fn from(registry: NameRegistry) -> Self {
        registry.names
    }
}

/// Registry of unique `"A -> B"` edge names.
pub type EntranceRegistry = NameRegistry;

// =============================================================================
// Doors
// =============================================================================

/// Door identifiers and vanilla door connections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoorTable {
    /// Door node name to numeric id, in declaration order.
    pub ids: Vec<(String, u32)>,
    /// Vanilla `(door, target)` pairs.
    pub vanilla: Vec<(String, String)>,
}

impl DoorTable {
    /// Registers a door. Returns false if the door node was already known.
    pub fn register(&mut self, node: &str, id: u32, target: &str) -> bool {
        if self.id(node).is_some() {
            return false;
        }
        self.ids.push((node.to_string(), id));
        self.vanilla.push((node.to_string(), target.to_string()));
        true
    }

    /// Looks up a door id.
    #[must_use]
    pub fn id(&self, node: &str) -> Option<u32> {
        self.ids.iter().find(|(n, _)| n == node).map(|(_, id)| *id)
    }
}

// =============================================================================
// Rules
// =============================================================================

/// One compiled predicate attached to an edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompiledRule {
    /// Source node.
    pub from: String,
    /// Target node, state, pickup or refill event.
    pub to: String,
    /// Output bucket.
    pub tier: Tier,
    /// The predicate.
    pub predicate: Predicate,
}

impl CompiledRule {
    /// Edge name in `"A -> B"` form.
    #[must_use]
    pub fn edge_name(&self) -> String {
        edge_name(&self.from, &self.to)
    }
}

impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.predicate)
    }
}

/// Formats an edge name.
#[must_use]
pub fn edge_name(from: &str, to: &str) -> String {
    format!("{from} -> {to}")
}

/// Compiled rules grouped by tier.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleBuckets {
    buckets: [Vec<CompiledRule>; Tier::COUNT],
}

impl RuleBuckets {
    /// Appends a rule to its tier's bucket.
    pub fn push(&mut self, rule: CompiledRule) {
        self.buckets[rule.tier.index()].push(rule);
    }

    /// Rules of one tier, in emission order.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[CompiledRule] {
        &self.buckets[tier.index()]
    }

    /// All rules, tier by tier.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.buckets.iter().flatten()
    }

    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns true if no rule was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything one compilation produces.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompiledLogic {
    /// Rules per tier.
    pub rules: RuleBuckets,
    /// Unique edge names.
    pub entrances: EntranceRegistry,
    /// Anchor refill capacities.
    pub refills: RefillTable,
    /// Refill event names, deduplicated.
    pub refill_events: NameRegistry,
    /// Door ids and vanilla connections.
    pub doors: DoorTable,
}

impl CompiledLogic {
    /// Creates empty output tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules attached to one edge, across all tiers.
    pub fn rules_for<'a>(
        &'a self,
        from: &'a str,
        to: &'a str,
    ) -> impl Iterator<Item = &'a CompiledRule> {
        self.rules.iter().filter(move |r| r.from == from && r.to == to)
    }
}
