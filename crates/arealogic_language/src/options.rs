//! Compiler options.

/// The deepest indentation level the grammar supports.
pub const MAX_DEPTH: usize = 5;

/// Options controlling how source documents are structured and compiled.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// Character that starts a line comment.
    pub comment_marker: char,
    /// Deepest indentation level accepted (never above [`MAX_DEPTH`]).
    pub max_depth: usize,
    /// Whether `nospawn` and `tprestriction` blocks are skipped.
    ///
    /// When false they are rejected as unknown path kinds.
    pub skip_spawn_blocks: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            max_depth: MAX_DEPTH,
            skip_spawn_blocks: true,
        }
    }
}

impl CompileOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the comment marker.
    #[must_use]
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Builder method to set the deepest accepted indentation.
    ///
    /// Values above [`MAX_DEPTH`] are clamped.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.min(MAX_DEPTH);
        self
    }

    /// Builder method to choose whether spawn restriction blocks are skipped.
    #[must_use]
    pub fn with_spawn_blocks_skipped(mut self, skip: bool) -> Self {
        self.skip_spawn_blocks = skip;
        self
    }
}
