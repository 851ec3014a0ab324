//! Single-pass compiler driver.
//!
//! Feeds every structured line through the accumulator, applies refill
//! declarations, and hands completed requirements to the synthesizer.
//! Compilation is correct-or-abort: the first error stops the pass and is
//! reported with the offending line.

use arealogic_foundation::Result;

use crate::accumulator::{RequirementAccumulator, Terminal, Transition};
use crate::event::{CompileEvent, CompileSink, NoopSink};
use crate::line::{Line, LineStructurer};
use crate::options::CompileOptions;
use crate::synth::synthesize;
use crate::tables::{CompiledLogic, RefillToken};

/// Compiler state for one source document.
pub struct Compiler<S: CompileSink = NoopSink> {
    /// Structuring and parsing options.
    options: CompileOptions,
    /// Carry-over state between lines.
    accumulator: RequirementAccumulator,
    /// Output tables under construction.
    logic: CompiledLogic,
    /// Event receiver.
    sink: S,
}

impl Compiler<NoopSink> {
    /// Creates a compiler with default options and no event sink.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    /// Creates a compiler with the given options and no event sink.
    #[must_use]
    pub fn with_options(options: CompileOptions) -> Self {
        Self::with_sink(options, NoopSink)
    }
}

impl Default for Compiler<NoopSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CompileSink> Compiler<S> {
    /// Creates a compiler that reports events to `sink`.
    #[must_use]
    pub fn with_sink(options: CompileOptions, sink: S) -> Self {
        Self {
            accumulator: RequirementAccumulator::new(&options),
            options,
            logic: CompiledLogic::new(),
            sink,
        }
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// The output tables built so far.
    #[must_use]
    pub fn logic(&self) -> &CompiledLogic {
        &self.logic
    }

    /// The event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Compiles one structured line.
    ///
    /// Returns the number of rules emitted for it.
    ///
    /// # Errors
    /// Returns the first error raised while processing the line, with the
    /// line's position and text attached.
    pub fn compile_line(&mut self, line: &Line<'_>) -> Result<usize> {
        self.process(line).map_err(|e| e.at_line(line.number, line.raw))
    }

    /// Compiles every line of `source`.
    ///
    /// # Errors
    /// Returns the first error, with line context.
    pub fn compile_source(&mut self, source: &str) -> Result<usize> {
        let mut emitted = 0;
        for line in LineStructurer::new(source, self.options.clone()) {
            emitted += self.compile_line(&line?)?;
        }
        Ok(emitted)
    }

    /// Finishes compilation, returning the output tables and the sink.
    #[must_use]
    pub fn finish(self) -> (CompiledLogic, S) {
        (self.logic, self.sink)
    }

    fn process(&mut self, line: &Line<'_>) -> Result<usize> {
        let number = line.number;
        match self.accumulator.feed(line)? {
            Transition::None => Ok(0),
            Transition::AnchorEntered(anchor) => {
                self.logic.refills.ensure(&anchor);
                self.sink.record(number, CompileEvent::AnchorEntered { anchor });
                Ok(0)
            }
            Transition::AnchorCleared(keyword) => {
                self.sink.record(number, CompileEvent::AnchorCleared { keyword });
                Ok(0)
            }
            Transition::PathSkipped(keyword) => {
                self.sink.record(number, CompileEvent::PathSkipped { keyword });
                Ok(0)
            }
            Transition::PathDeclared {
                kind,
                from,
                to,
                refill,
                terminal,
            } => {
                if let Some(token) = refill {
                    self.record_refill(number, &from, token);
                }
                self.sink.record(number, CompileEvent::PathDeclared { kind, from, to });
                match terminal {
                    Some(terminal) => self.emit(number, &terminal),
                    None => Ok(0),
                }
            }
            Transition::Terminal(terminal) => self.emit(number, &terminal),
        }
    }

    fn record_refill(&mut self, number: usize, anchor: &str, token: RefillToken) {
        let changed = self.logic.refills.apply(anchor, token);
        let event = token.event_name(anchor);
        self.logic.refill_events.insert(event.clone());
        self.sink.record(
            number,
            CompileEvent::RefillRecorded {
                anchor: anchor.to_string(),
                event,
                changed,
            },
        );
    }

    fn emit(&mut self, number: usize, terminal: &Terminal) -> Result<usize> {
        synthesize(&mut self.logic, terminal, &mut self.sink, number)
    }
}

/// Compiles a source document with default options.
///
/// # Errors
/// Returns the first error, with line context.
pub fn compile(source: &str) -> Result<CompiledLogic> {
    let mut compiler = Compiler::new();
    compiler.compile_source(source)?;
    Ok(compiler.finish().0)
}

/// Compiles a source document, reporting events to `sink`.
///
/// # Errors
/// Returns the first error, with line context.
pub fn compile_with_sink<S: CompileSink>(
    source: &str,
    options: CompileOptions,
    sink: S,
) -> Result<(CompiledLogic, S)> {
    let mut compiler = Compiler::with_sink(options, sink);
    compiler.compile_source(source)?;
    Ok(compiler.finish())
}
