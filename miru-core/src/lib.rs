//! Core compiler pipeline for the Miru language.
//!
//! The pipeline is:
//!
//!   source .miru
//!     -> lexer      (tokens, scanned lazily)
//!     -> parser     (AST, fail-fast on the first error)
//!     -> codegen_c  (one C translation unit)
//!
//! Generated code calls the print functions in `runtime/`, either through
//! the runtime header or inlined into the output. Higher-level tools (CLI,
//! web playground, etc.) should depend on this crate rather than
//! reimplementing the pipeline.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod span;
pub mod diagnostic;
pub mod error;

// ---------------------------------------------------------------------
// Front-end: lexing and parsing
// ---------------------------------------------------------------------

pub mod lexer;
pub mod parser;
pub mod ast;

// ---------------------------------------------------------------------
// Builtins and runtime support
// ---------------------------------------------------------------------

pub mod builtins;
pub mod runtime;

// ---------------------------------------------------------------------
// Back-end: code generation and compiler orchestration
// ---------------------------------------------------------------------

pub mod codegen_c;
pub mod compiler;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use codegen_c::{EmitOptions, RuntimeLinkage, emit_c, write_c};
pub use compiler::{CompilationArtifact, VERSION, compile, compile_to_c, dump_ast, dump_tokens};
pub use diagnostic::Diagnostic;
pub use error::CoreError;
pub use parser::parse;
