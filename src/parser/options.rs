//! Parsing options and configuration.

use super::cell::CellPolicy;
use super::sanitize::SanitizeOptions;

/// Options for parsing report text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Sanitizer configuration
    pub sanitize: SanitizeOptions,

    /// Table-cell post-processing policy
    pub cell_policy: CellPolicy,

    /// Recursion depth cap for nested lists and blockquotes
    pub max_depth: u8,

    /// Split a paragraph when it has more than this many sentences...
    pub split_min_sentences: usize,

    /// ...and more than this many characters
    pub split_min_chars: usize,

    /// Sentences per sub-paragraph after splitting
    pub split_chunk_sentences: usize,

    /// Parse sections in parallel with rayon
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sanitizer options.
    pub fn with_sanitize(mut self, sanitize: SanitizeOptions) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Set the cell post-processing policy.
    pub fn with_cell_policy(mut self, policy: CellPolicy) -> Self {
        self.cell_policy = policy;
        self
    }

    /// Set the recursion depth cap.
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable parallel section parsing.
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Disable parallel section parsing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            sanitize: SanitizeOptions::default(),
            cell_policy: CellPolicy::default(),
            max_depth: 20,
            split_min_sentences: 4,
            split_min_chars: 300,
            split_chunk_sentences: 3,
            parallel: false,
        }
    }
}
