//! CLI support and serialization for arealogic.
//!
//! This crate provides:
//! - [`LogicBundle`] - compiled logic plus its area table, with `MessagePack`
//!   export
//! - Plain-text dumps used by the `arealogic` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod report;
pub mod serialize;

pub use report::{AreaCheck, render_dump, render_names, resolve_area_entries};
pub use serialize::{LogicBundle, from_bytes, load_from_file, save_to_file, to_bytes};
