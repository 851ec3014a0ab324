//! Integration tests for Layer 0: Foundation
//!
//! Tests for error types and the difficulty/tier vocabulary.

mod errors;
mod types;
