//! Diagnostics reported by the scanner and parser.
//!
//! A diagnostic is rendered as a single human-readable line that always
//! contains the failing source line, e.g.
//!
//! ```text
//! error[E0101]: expected ';' after expression (line 3, column 9)
//! ```

use std::fmt;

use crate::span::Span;

/// Stable codes attached to diagnostics.
pub mod codes {
    pub const UNEXPECTED_CHARACTER: &str = "E0001";
    pub const UNTERMINATED_STRING: &str = "E0002";
    pub const INTEGER_OUT_OF_RANGE: &str = "E0003";
    pub const EXPECTED_TOKEN: &str = "E0101";
    pub const INVALID_ASSIGNMENT_TARGET: &str = "E0102";
    pub const UNEXPECTED_TOKEN: &str = "E0103";
    pub const NESTING_TOO_DEEP: &str = "E0104";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: Option<&'static str>,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            code: None,
            message: message.into(),
            span,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "error[{code}]")?,
            None => f.write_str("error")?,
        }
        write!(
            f,
            ": {} (line {}, column {})",
            self.message, self.span.line, self.span.column
        )
    }
}
