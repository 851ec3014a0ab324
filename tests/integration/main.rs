//! Cross-layer integration tests for arealogic
//!
//! Tests that run a document through compilation, tracing, export, and
//! reporting together.

mod pipeline;
mod properties;
