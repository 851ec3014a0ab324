//! Integration tests for Layer 1: Language
//!
//! Tests for the line structurer, requirement parsing and expansion, and
//! rule synthesis through the compiler.

mod requirements;
mod structure;
mod synthesis;
