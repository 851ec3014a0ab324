//! Line structurer for area documents.
//!
//! Converts raw source lines into `(depth, text)` pairs. Comments and
//! trailing whitespace are stripped, blank lines are skipped, and
//! indentation is measured in units of two spaces.

use arealogic_foundation::{Error, Result};

use crate::options::CompileOptions;

/// Separator that introduces the coordinate suffix of an anchor declaration.
pub const COORDINATE_SEPARATOR: &str = " at ";

/// A structured, non-blank source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<'src> {
    /// 1-based line number in the source.
    pub number: usize,
    /// Indentation depth (0-5).
    pub depth: usize,
    /// Text with indentation, comment, and trailing whitespace removed.
    pub text: &'src str,
    /// The raw source line, for error reporting.
    pub raw: &'src str,
}

impl<'src> Line<'src> {
    /// Structures one raw line.
    ///
    /// Returns `Ok(None)` when nothing but whitespace or a comment remains.
    ///
    /// # Errors
    /// Returns an error if the line is indented deeper than `options.max_depth`.
    pub fn structure(
        number: usize,
        raw: &'src str,
        options: &CompileOptions,
    ) -> Result<Option<Self>> {
        let code = match raw.find(options.comment_marker) {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let code = code.trim_end();
        if code.is_empty() {
            return Ok(None);
        }

        let indent = code.len() - code.trim_start_matches(' ').len();
        let depth = (indent + 1) / 2;
        if depth > options.max_depth {
            return Err(Error::indent_too_deep(depth, options.max_depth).at_line(number, raw));
        }

        Ok(Some(Self {
            number,
            depth,
            text: &code[indent..],
            raw,
        }))
    }

    /// Returns the first word of the text (up to whitespace or `:`).
    #[must_use]
    pub fn keyword(&self) -> &'src str {
        first_word(self.text)
    }

    /// Returns true if the line opens a nested block (ends with `:`).
    #[must_use]
    pub fn opens_block(&self) -> bool {
        self.text.ends_with(':')
    }
}

/// Iterator over the structured lines of a source document.
pub struct LineStructurer<'src> {
    /// Remaining raw lines.
    lines: std::iter::Enumerate<std::str::Lines<'src>>,
    /// Structuring options.
    options: CompileOptions,
}

impl<'src> LineStructurer<'src> {
    /// Creates a structurer over the given source.
    #[must_use]
    pub fn new(source: &'src str, options: CompileOptions) -> Self {
        Self {
            lines: source.lines().enumerate(),
            options,
        }
    }

    /// Structures every line of the source, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first structural error encountered.
    pub fn structure_all(source: &'src str, options: CompileOptions) -> Result<Vec<Line<'src>>> {
        Self::new(source, options).collect()
    }
}

impl<'src> Iterator for LineStructurer<'src> {
    type Item = Result<Line<'src>>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.lines.by_ref() {
            match Line::structure(index + 1, raw, &self.options) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

/// Returns the first word of `text`, ending at whitespace, `:` or `,`.
#[must_use]
pub fn first_word(text: &str) -> &str {
    let end = text
        .find(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .unwrap_or(text.len());
    &text[..end]
}

/// Extracts the name from a declaration like `anchor Name at 1, 2:`.
///
/// The name is the text between the keyword and the last `:`, with any
/// coordinate suffix removed. Returns `None` if no name is present.
#[must_use]
pub fn declared_name(text: &str) -> Option<&str> {
    let keyword = first_word(text);
    let rest = &text[keyword.len()..];
    let rest = match rest.rfind(':') {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    let rest = match rest.find(COORDINATE_SEPARATOR) {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    let name = rest.trim();
    if name.is_empty() { None } else { Some(name) }
}
