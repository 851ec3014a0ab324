//! Error types for the arealogic compiler.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Compilation is correct-or-abort: every error is fatal and carries the
//! position and text of the offending line.

use std::fmt;

use thiserror::Error;

/// The main error type for arealogic operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Adds line context unless the error already carries some.
    #[must_use]
    pub fn at_line(self, line: usize, text: &str) -> Self {
        if self.context.is_some() {
            return self;
        }
        self.with_context(ErrorContext::new().with_line(line).with_text(text))
    }

    /// Names the document the error came from, keeping any line context.
    #[must_use]
    pub fn in_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.with_context(context.with_source(source))
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Creates an indentation error.
    #[must_use]
    pub fn indent_too_deep(depth: usize, max: usize) -> Self {
        Self::new(ErrorKind::IndentTooDeep { depth, max })
    }

    /// Creates an unknown path kind error.
    #[must_use]
    pub fn unknown_path_kind(word: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownPathKind(word.into()))
    }

    /// Creates an unknown difficulty error.
    #[must_use]
    pub fn unknown_difficulty(word: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDifficulty(word.into()))
    }

    /// Creates a malformed line error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedLine(message.into()))
    }

    /// Creates an unknown enemy error.
    #[must_use]
    pub fn unknown_enemy(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownEnemy(name.into()))
    }

    /// Creates an invalid payload error.
    #[must_use]
    pub fn invalid_payload(token: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPayload {
            token: token.into(),
            payload: payload.into(),
        })
    }
}

/// Broad error classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The document's structure is invalid (indentation, keywords, grammar).
    Structural,
    /// A name could not be resolved against the static tables.
    Lookup,
    /// Reading, writing, or encoding failed.
    Io,
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Line is indented deeper than the grammar allows.
    #[error("indentation too deep: depth {depth} (maximum {max})")]
    IndentTooDeep {
        /// The computed depth.
        depth: usize,
        /// The deepest supported level.
        max: usize,
    },

    /// Depth-0 line is neither an anchor, requirement, nor region.
    #[error("unknown declaration: {0}")]
    UnknownDeclaration(String),

    /// Depth-1 keyword is not a known path kind.
    #[error("{0} is not an appropriate path type")]
    UnknownPathKind(String),

    /// Difficulty keyword is not moki, gorlek, kii, or unsafe.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Line does not follow the expected shape.
    #[error("malformed line: {0}")]
    MalformedLine(String),

    /// Requirement has more OR-clauses than the grammar supports.
    #[error("too many OR-clauses: {found} (maximum {max})")]
    TooManyDisjunctions {
        /// Number of OR-clauses found.
        found: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Door block is missing a field needed before `enter:`.
    #[error("door is missing its {0}")]
    MissingDoorField(&'static str),

    /// Enemy name not found in the enemy table.
    #[error("unknown enemy: {0}")]
    UnknownEnemy(String),

    /// Counted resource name not found.
    #[error("unknown counted resource: {0}")]
    UnknownCountedResource(String),

    /// Area name not found in the area-entry table.
    #[error("unknown area: {0}")]
    UnknownArea(String),

    /// Payload of an atom could not be interpreted.
    #[error("invalid payload for {token}: {payload:?}")]
    InvalidPayload {
        /// The atom name.
        token: String,
        /// The payload text.
        payload: String,
    },

    /// I/O error.
    #[error("io error: {0}")]
    IoError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl ErrorKind {
    /// Returns the category of this error kind.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IndentTooDeep { .. }
            | Self::UnknownDeclaration(_)
            | Self::UnknownPathKind(_)
            | Self::UnknownDifficulty(_)
            | Self::MalformedLine(_)
            | Self::TooManyDisjunctions { .. }
            | Self::MissingDoorField(_) => ErrorCategory::Structural,
            Self::UnknownEnemy(_)
            | Self::UnknownCountedResource(_)
            | Self::UnknownArea(_)
            | Self::InvalidPayload { .. } => ErrorCategory::Lookup,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// 1-based line number in source.
    pub line: Option<usize>,
    /// Raw text of the offending line.
    pub text: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the offending line text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            wrote = true;
        }
        if let Some(line) = self.line {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "line {line}")?;
            wrote = true;
        }
        if let Some(text) = &self.text {
            if wrote {
                write!(f, ": ")?;
            }
            write!(f, "{:?}", text.trim_end())?;
        }
        Ok(())
    }
}
