//! arealogic - area graph to access rule compiler
//!
//! This crate re-exports all layers of the arealogic system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: arealogic_runtime    - CLI, dumps, MessagePack export
//! Layer 2: arealogic_debug      - Compilation tracing
//! Layer 1: arealogic_language   - Structurer, accumulator, expander, synthesizer
//! Layer 0: arealogic_foundation - Error types, difficulty and tier vocabulary
//! ```

pub use arealogic_debug as debug;
pub use arealogic_foundation as foundation;
pub use arealogic_language as language;
pub use arealogic_runtime as runtime;
