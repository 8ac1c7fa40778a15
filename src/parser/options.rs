//! Parser configuration

/// Knobs for a single parse
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Maximum nesting of rule attempts before the parse aborts
    pub max_depth: usize,
    /// Seed the library region with the predefined environment
    pub predefined: bool,
    /// Warn when a type mark does not resolve
    pub warn_unresolved_type_marks: bool,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_predefined(mut self, predefined: bool) -> Self {
        self.predefined = predefined;
        self
    }

    pub fn with_unresolved_warnings(mut self, warn: bool) -> Self {
        self.warn_unresolved_type_marks = warn;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            predefined: true,
            warn_unresolved_type_marks: true,
        }
    }
}
