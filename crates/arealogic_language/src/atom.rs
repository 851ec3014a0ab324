//! Requirement atoms and clause splitting.
//!
//! A flat requirement is a comma-separated list of clauses. A clause is
//! either a single atom or an OR-chain of atoms joined by ` OR `.

use std::fmt;

use arealogic_foundation::{Error, ErrorKind, Result};

use crate::vocabulary;

/// Maximum number of OR-chains the grammar allows in one requirement.
pub const MAX_DISJUNCTIONS: usize = 2;

/// Separator between the options of an OR-chain.
pub const OR_SEPARATOR: &str = " OR ";

/// A single requirement token with an optional `name=value` payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The token name as written.
    pub name: String,
    /// The text after `=`, if any.
    pub payload: Option<String>,
}

impl Atom {
    /// Parses a token, splitting off an optional `=value` payload.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.split_once('=') {
            Some((name, payload)) => Self {
                name: name.trim().to_string(),
                payload: Some(payload.trim().to_string()),
            },
            None => Self {
                name: token.trim().to_string(),
                payload: None,
            },
        }
    }

    /// Returns the canonical capability name for this atom.
    #[must_use]
    pub fn canonical(&self) -> &str {
        vocabulary::canonical_name(&self.name)
    }

    /// Parses the payload as a non-negative count.
    ///
    /// # Errors
    /// Returns an error if the payload is missing or not an integer.
    pub fn count_payload(&self) -> Result<u32> {
        let payload = self.payload.as_deref().unwrap_or("");
        payload
            .parse()
            .map_err(|_| Error::invalid_payload(&self.name, payload))
    }

    /// Parses the payload as a finite number, defaulting to 1 when absent.
    ///
    /// # Errors
    /// Returns an error if a payload is present but not a finite number.
    pub fn amount_payload(&self) -> Result<f64> {
        let Some(payload) = self.payload.as_deref() else {
            return Ok(1.0);
        };
        payload
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| Error::invalid_payload(&self.name, payload))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "{}={payload}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A requirement split into its AND-ed atoms and OR-chains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequirementExpr {
    /// Atoms that must all hold.
    pub conjuncts: Vec<Atom>,
    /// OR-chains, each satisfied by any one of its atoms.
    pub disjunctions: Vec<Vec<Atom>>,
}

impl RequirementExpr {
    /// Returns true if the requirement has no atoms at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conjuncts.is_empty() && self.disjunctions.is_empty()
    }
}

/// Splits a flat requirement string into clauses.
///
/// # Errors
/// Returns an error if more than [`MAX_DISJUNCTIONS`] OR-chains are present.
pub fn split_requirement(flat: &str) -> Result<RequirementExpr> {
    let mut expr = RequirementExpr::default();

    for clause in flat.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if clause.contains(OR_SEPARATOR) {
            let chain: Vec<Atom> = clause
                .split(OR_SEPARATOR)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(Atom::parse)
                .collect();
            expr.disjunctions.push(chain);
        } else {
            expr.conjuncts.push(Atom::parse(clause));
        }
    }

    if expr.disjunctions.len() > MAX_DISJUNCTIONS {
        return Err(Error::new(ErrorKind::TooManyDisjunctions {
            found: expr.disjunctions.len(),
            max: MAX_DISJUNCTIONS,
        }));
    }

    Ok(expr)
}
