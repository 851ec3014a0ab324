//! Line structurer, requirement parser, and rule synthesizer for arealogic.
//!
//! This crate compiles an indentation-structured area document into
//! per-tier access predicates and the lookup tables that go with them.
//!
//! # Pipeline
//!
//! ```text
//! "  conn LowerReach.Entry:"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ LINE STRUCTURER │  → Line { depth: 1, text: "conn LowerReach.Entry:" }
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ACCUMULATOR     │  → Terminal { edge, difficulty, "Bash, Launch OR DoubleJump" }
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CONJUNCTION /   │  → AndResult + OR-bucket variants
//! │ DISJUNCTION     │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SYNTHESIZER     │  → CompiledRule { tier, predicate } + table side effects
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`line`] - Comment stripping, indentation depth, anchor names
//! - [`accumulator`] - Per-depth requirement fragments and path state
//! - [`atom`] - Splitting flat requirements into clauses and atoms
//! - [`vocabulary`] - Static capability, glitch, and resource tables
//! - [`combat`] - Enemy table and combat cost calculation
//! - [`conjunction`] - AND-chain parsing and cost aggregation
//! - [`disjunction`] - OR-chain bucketing and variant expansion
//! - [`predicate`] - Compiled predicate tree
//! - [`synth`] - Rule synthesis and output side effects
//! - [`tables`] - Output tables (tiers, entrances, refills, doors)
//! - [`compiler`] - The single-pass driver
//! - [`area`] - Area-entry threshold table
//! - [`extract`] - Event, quest, and region name extractors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accumulator;
pub mod area;
pub mod atom;
pub mod combat;
pub mod compiler;
pub mod conjunction;
pub mod disjunction;
pub mod event;
pub mod extract;
pub mod line;
pub mod options;
pub mod predicate;
pub mod synth;
pub mod tables;
pub mod vocabulary;

mod fuzz_tests;

pub use accumulator::{DoorLink, Edge, RequirementAccumulator, Terminal, Transition};
pub use area::{AreaRequirement, AreaTable, AreaThreshold};
pub use atom::{Atom, RequirementExpr, split_requirement};
pub use combat::{CombatCost, CostEntry, CostKind, Encounter, Hazard, combat_cost};
pub use compiler::{Compiler, compile, compile_with_sink};
pub use conjunction::{AndResult, Fact, WeaponCharge, parse_and};
pub use disjunction::{ExpansionPlan, OrBuckets, Variant, expand};
pub use event::{CompileEvent, CompileSink, NoopSink};
pub use extract::{extract_events, extract_quests, extract_regions};
pub use line::{Line, LineStructurer};
pub use options::CompileOptions;
pub use predicate::{Predicate, ResourceCost};
pub use tables::{
    CompiledLogic, CompiledRule, DoorTable, EntranceRegistry, NameRegistry, RefillEntry,
    RefillTable, RefillToken, RuleBuckets,
};
pub use vocabulary::{AtomClass, CountedResource, EnergyWeapon, Glitch};
