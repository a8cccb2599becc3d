use std::fmt::Write;

use crate::codegen_c::{EmitOptions, emit_c};
use crate::error::CoreError;
use crate::lexer::{TokenValue, tokenize};
use crate::parser::parse;

/// Crate version, reported by the CLI and the embedding API.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationArtifact {
    pub c_source: String,
    /// Top-level function names in definition order.
    pub functions: Vec<String>,
    /// Whether a `main` was synthesized for top-level statements.
    pub has_entry_point: bool,
}

pub fn compile(source: &str, options: &EmitOptions) -> Result<CompilationArtifact, CoreError> {
    let program = parse(source)?;
    Ok(CompilationArtifact {
        c_source: emit_c(&program, options),
        functions: program.functions().map(|f| f.name.clone()).collect(),
        has_entry_point: program.has_top_level_statements(),
    })
}

pub fn compile_to_c(source: &str) -> Result<String, CoreError> {
    compile(source, &EmitOptions::default()).map(|artifact| artifact.c_source)
}

/// One token per line, ending with the `Eof` token.
pub fn dump_tokens(source: &str) -> Result<String, CoreError> {
    let mut out = String::new();
    for token in tokenize(source) {
        if let TokenValue::Error(diag) = token.value {
            return Err(CoreError::Lex(diag));
        }
        let _ = writeln!(out, "{token}");
    }
    Ok(out)
}

pub fn dump_ast(source: &str) -> Result<String, CoreError> {
    Ok(parse(source)?.dump())
}
