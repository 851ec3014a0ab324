//! Disjunction expander.
//!
//! A requirement may carry up to two OR-chains. Each chain is partitioned
//! into glitch, skill and resource buckets, and the buckets are expanded
//! into rule variants:
//!
//! - every glitch option gets its own variant, forced into the glitched tier;
//! - all skill options share one variant as an `any(...)` group;
//! - all resource options share one variant as alternative costs.
//!
//! With two chains the buckets are crossed. The chain with fewer resource
//! options drives the outer loop.

use arealogic_foundation::Result;

use crate::atom::Atom;
use crate::vocabulary::classify;

/// One OR-chain partitioned by option category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrBuckets {
    /// Plain capabilities and events.
    pub skills: Vec<Atom>,
    /// Glitch options.
    pub glitches: Vec<Atom>,
    /// Energy, damage and encounter options.
    pub resources: Vec<Atom>,
}

impl OrBuckets {
    /// Partitions an OR-chain.
    ///
    /// # Errors
    /// Returns an error if an option cannot be classified.
    pub fn partition(chain: &[Atom]) -> Result<Self> {
        let mut buckets = Self::default();
        for atom in chain {
            let class = classify(atom)?;
            if class.is_glitch() {
                buckets.glitches.push(atom.clone());
            } else if class.is_resource() {
                buckets.resources.push(atom.clone());
            } else {
                buckets.skills.push(atom.clone());
            }
        }
        Ok(buckets)
    }

    /// Total number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len() + self.glitches.len() + self.resources.len()
    }

    /// Returns true if the chain has no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The partitioned chains in expansion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionPlan {
    /// Chain driving the outer loop.
    pub outer: Option<OrBuckets>,
    /// Chain driving the inner loop.
    pub inner: Option<OrBuckets>,
    /// Whether the declared order was swapped.
    pub swapped: bool,
}

impl ExpansionPlan {
    /// Partitions the chains and orders them.
    ///
    /// The outer chain is the one with fewer resource options. On a tie the
    /// chain with more options overall goes outside; declaration order
    /// settles anything left.
    ///
    /// # Errors
    /// Returns an error if an option cannot be classified.
    pub fn new(chains: &[Vec<Atom>]) -> Result<Self> {
        let mut buckets = chains
            .iter()
            .map(|chain| OrBuckets::partition(chain))
            .collect::<Result<Vec<_>>>()?
            .into_iter();
        let first = buckets.next();
        let second = buckets.next();

        Ok(match (first, second) {
            (Some(first), Some(second)) => {
                let swap = match first.resources.len().cmp(&second.resources.len()) {
                    std::cmp::Ordering::Greater => true,
                    std::cmp::Ordering::Less => false,
                    std::cmp::Ordering::Equal => second.len() > first.len(),
                };
                if swap {
                    Self { outer: Some(second), inner: Some(first), swapped: true }
                } else {
                    Self { outer: Some(first), inner: Some(second), swapped: false }
                }
            }
            (first, _) => Self { outer: first, inner: None, swapped: false },
        })
    }
}

/// One way of satisfying the OR-chains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variant {
    /// Options appended to the AND-list for this variant.
    pub extra: Vec<Atom>,
    /// Skill groups, each satisfied by any of its options.
    pub any_skills: Vec<Vec<Atom>>,
    /// Alternative resource options; one of them must be paid.
    pub any_resources: Vec<Atom>,
    /// Whether the variant draws from a glitch bucket.
    pub forced_glitch: bool,
}

impl Variant {
    fn with_extra(mut self, atom: &Atom) -> Self {
        self.extra.push(atom.clone());
        self
    }

    fn with_skills(mut self, skills: &[Atom]) -> Self {
        self.any_skills.push(skills.to_vec());
        self
    }

    fn with_resources(mut self, resources: &[Atom]) -> Self {
        self.any_resources = resources.to_vec();
        self
    }

    fn glitched(mut self) -> Self {
        self.forced_glitch = true;
        self
    }
}

/// Expands OR-chains into rule variants.
///
/// With no chains a single empty variant is returned.
///
/// # Errors
/// Returns an error if an option cannot be classified.
pub fn expand(chains: &[Vec<Atom>]) -> Result<Vec<Variant>> {
    let plan = ExpansionPlan::new(chains)?;
    Ok(match (plan.outer, plan.inner) {
        (None, _) => vec![Variant::default()],
        (Some(only), None) => expand_one(&only),
        (Some(outer), Some(inner)) => expand_two(&outer, &inner),
    })
}

fn expand_one(chain: &OrBuckets) -> Vec<Variant> {
    let mut variants: Vec<Variant> = chain
        .glitches
        .iter()
        .map(|g| Variant::default().with_extra(g).glitched())
        .collect();
    if !chain.skills.is_empty() {
        variants.push(Variant::default().with_skills(&chain.skills));
    }
    if !chain.resources.is_empty() {
        variants.push(Variant::default().with_resources(&chain.resources));
    }
    variants
}

/// Crosses the inner chain's buckets with one outer selection.
fn cross_inner(base: &Variant, inner: &OrBuckets, out: &mut Vec<Variant>) {
    for glitch in &inner.glitches {
        out.push(base.clone().with_extra(glitch).glitched());
    }
    if !inner.skills.is_empty() {
        out.push(base.clone().with_skills(&inner.skills));
    }
    if !inner.resources.is_empty() {
        out.push(base.clone().with_resources(&inner.resources));
    }
}

fn expand_two(outer: &OrBuckets, inner: &OrBuckets) -> Vec<Variant> {
    let mut variants = Vec::new();
    for glitch in &outer.glitches {
        cross_inner(&Variant::default().with_extra(glitch).glitched(), inner, &mut variants);
    }
    for resource in &outer.resources {
        cross_inner(&Variant::default().with_extra(resource), inner, &mut variants);
    }
    if !outer.skills.is_empty() {
        cross_inner(&Variant::default().with_skills(&outer.skills), inner, &mut variants);
    }
    variants
}
