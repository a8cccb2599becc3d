use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read source: {0}")]
    SourceIo(#[from] std::io::Error),
    #[error("unsupported emit format: {0}")]
    UnsupportedFormat(String),
    #[error("runtime support directory was not found at {0}")]
    MissingRuntime(PathBuf),
    #[error("{0}")]
    Lex(Diagnostic),
    #[error("{0}")]
    Parse(Diagnostic),
}

impl CoreError {
    /// The diagnostic behind a lex or parse failure, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            CoreError::Lex(diag) | CoreError::Parse(diag) => Some(diag),
            _ => None,
        }
    }
}
