//! Compilation tracing for arealogic.
//!
//! This crate provides:
//! - `Tracer` - a compile event sink with a bounded record buffer
//! - `HumanFormatter` / `JsonFormatter` - trace output formats

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceFormatter, TraceOutput,
    TraceRecord, Tracer, TracerConfig,
};
