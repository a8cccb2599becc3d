//! Source positions for tokens and diagnostics.

use std::fmt;

/// Location of a token in the source text.
///
/// `start` / `end` are byte offsets; `line` and `column` are 1-based and
/// refer to the first character of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: u32, end: u32, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Zero-width span at a position, used for end of input.
    pub fn point(offset: u32, line: u32, column: u32) -> Self {
        Self::new(offset, offset, line, column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
