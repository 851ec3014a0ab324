//! Error types and tier vocabulary for arealogic.
//!
//! This crate provides:
//! - [`Difficulty`] - The four logic difficulties (moki, gorlek, kii, unsafe)
//! - [`Tier`] - The seven output buckets combining difficulty and glitches
//! - [`PathKind`] - The kinds of edge an anchor can declare
//! - [`RefillKind`] - Checkpoint and full refill markers
//! - [`Error`] - Rich error types with line context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod types;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind};
pub use types::{Difficulty, PathKind, RefillKind, Tier};

/// Result type alias using the arealogic [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
