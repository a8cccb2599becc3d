//! C backend for Miru.
//!
//! Translates a parsed [`Program`] into one self-contained C translation
//! unit. Emission runs in two passes over the top-level statements:
//!
//! 1. partition them into function definitions (kept in source order)
//!    and everything else;
//! 2. write the runtime include, one prototype per function, every
//!    function body, and finally a synthesized `main` wrapping the
//!    remaining top-level statements (only if there are any).
//!
//! Miru has no declared types, so every variable, parameter and return
//! value uses [`VALUE_TYPE`]. Binary expressions are fully parenthesized,
//! so the C output keeps the parsed precedence regardless of C's own
//! operator table.
//!
//! The emitter assumes the tree came from the parser and does no
//! validation of its own.

use std::fmt::{self, Write};
use std::io;

use crate::ast::{Expr, ExprKind, FunctionDef, Operator, Program, Stmt, StmtKind};
use crate::builtins::{self, BUILTINS};

/// C type used for every Miru value.
pub const VALUE_TYPE: &str = "long";

/// Header included by generated code when the runtime is linked separately.
pub const DEFAULT_RUNTIME_HEADER: &str = "runtime/miru_print.h";

const INDENT: &str = "    ";

/// How generated code gets hold of the print functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeLinkage {
    /// `#include "<path>"` and link against the runtime library.
    Header(String),
    /// Define the print functions at the top of the output.
    Inline,
}

impl Default for RuntimeLinkage {
    fn default() -> Self {
        RuntimeLinkage::Header(DEFAULT_RUNTIME_HEADER.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub runtime: RuntimeLinkage,
}

impl EmitOptions {
    pub fn standalone() -> Self {
        Self {
            runtime: RuntimeLinkage::Inline,
        }
    }
}

/// Generate C source into a fresh buffer.
pub fn emit_c(program: &Program, options: &EmitOptions) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail.
    let _ = CEmitter::new(&mut out, options).program(program);
    out
}

/// Generate C source into a byte stream.
pub fn write_c(program: &Program, options: &EmitOptions, mut sink: impl io::Write) -> io::Result<()> {
    sink.write_all(emit_c(program, options).as_bytes())?;
    sink.flush()
}

struct CEmitter<'a, W: Write> {
    out: &'a mut W,
    options: &'a EmitOptions,
    depth: usize,
}

impl<'a, W: Write> CEmitter<'a, W> {
    fn new(out: &'a mut W, options: &'a EmitOptions) -> Self {
        Self {
            out,
            options,
            depth: 0,
        }
    }

    fn program(&mut self, program: &Program) -> fmt::Result {
        let functions: Vec<&FunctionDef> = program.functions().collect();

        self.prelude()?;
        writeln!(self.out)?;

        for function in &functions {
            self.signature(function)?;
            writeln!(self.out, ";")?;
        }
        if !functions.is_empty() {
            writeln!(self.out)?;
        }

        for function in &functions {
            self.function(function)?;
            writeln!(self.out)?;
        }

        if program.has_top_level_statements() {
            writeln!(self.out, "int main(void) {{")?;
            self.depth += 1;
            for stmt in program.top_level_statements() {
                self.stmt(stmt)?;
            }
            self.indent()?;
            writeln!(self.out, "return 0;")?;
            self.depth -= 1;
            writeln!(self.out, "}}")?;
        }
        Ok(())
    }

    fn prelude(&mut self) -> fmt::Result {
        match &self.options.runtime {
            RuntimeLinkage::Header(path) => writeln!(self.out, "#include \"{path}\""),
            RuntimeLinkage::Inline => {
                writeln!(self.out, "#include <stdio.h>")?;
                for builtin in BUILTINS {
                    writeln!(self.out)?;
                    write!(self.out, "{}", builtin.definition())?;
                }
                Ok(())
            }
        }
    }

    fn signature(&mut self, function: &FunctionDef) -> fmt::Result {
        write!(self.out, "{VALUE_TYPE} {}(", function.name)?;
        if function.params.is_empty() {
            write!(self.out, "void")?;
        }
        for (index, param) in function.params.iter().enumerate() {
            if index > 0 {
                write!(self.out, ", ")?;
            }
            write!(self.out, "{VALUE_TYPE} {param}")?;
        }
        write!(self.out, ")")
    }

    fn function(&mut self, function: &FunctionDef) -> fmt::Result {
        self.signature(function)?;
        writeln!(self.out, " {{")?;
        self.nested(&function.body)?;
        writeln!(self.out, "}}")
    }

    /// Statements one level deeper than the current one.
    fn nested(&mut self, statements: &[Stmt]) -> fmt::Result {
        self.depth += 1;
        for stmt in statements {
            self.stmt(stmt)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.indent()?;
                self.expr(expr)?;
                writeln!(self.out, ";")
            }
            StmtKind::VarDecl {
                name,
                initializer,
                is_const,
            } => {
                self.indent()?;
                if *is_const {
                    write!(self.out, "const ")?;
                }
                write!(self.out, "{VALUE_TYPE} {name}")?;
                if let Some(value) = initializer {
                    write!(self.out, " = ")?;
                    self.expr(value)?;
                }
                writeln!(self.out, ";")
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.indent()?;
                write!(self.out, "if (")?;
                self.expr(condition)?;
                writeln!(self.out, ") {{")?;
                self.nested(then_branch)?;
                self.indent()?;
                if !else_branch.is_empty() {
                    writeln!(self.out, "}} else {{")?;
                    self.nested(else_branch)?;
                    self.indent()?;
                }
                writeln!(self.out, "}}")
            }
            StmtKind::While { condition, body } => {
                self.indent()?;
                write!(self.out, "while (")?;
                self.expr(condition)?;
                writeln!(self.out, ") {{")?;
                self.nested(body)?;
                self.indent()?;
                writeln!(self.out, "}}")
            }
            StmtKind::Return(value) => {
                self.indent()?;
                write!(self.out, "return")?;
                if let Some(value) = value {
                    write!(self.out, " ")?;
                    self.expr(value)?;
                }
                writeln!(self.out, ";")
            }
            StmtKind::Block(statements) => {
                self.indent()?;
                writeln!(self.out, "{{")?;
                self.nested(statements)?;
                self.indent()?;
                writeln!(self.out, "}}")
            }
            // Only top-level definitions are hoisted; nested ones have no C form.
            StmtKind::FunctionDef(_) => Ok(()),
        }
    }

    /// Expressions are written from an explicit stack of pending pieces;
    /// left-nested operator and call chains have no depth limit.
    fn expr(&mut self, root: &Expr) -> fmt::Result {
        let mut pending = vec![Piece::Expr(root)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Expr(expr) => self.expr_head(expr, &mut pending)?,
                Piece::Text(text) => self.out.write_str(text)?,
                Piece::Operator(op) => write!(self.out, " {op} ")?,
            }
        }
        Ok(())
    }

    /// Write the text that opens `expr` and queue the rest, last piece first.
    fn expr_head<'e>(&mut self, expr: &'e Expr, pending: &mut Vec<Piece<'e>>) -> fmt::Result {
        match &expr.kind {
            ExprKind::Int(value) => write!(self.out, "{value}"),
            ExprKind::Float(value) => write!(self.out, "{value:.6}"),
            ExprKind::Str(value) => write!(self.out, "\"{value}\""),
            ExprKind::Bool(value) => write!(self.out, "{}", u8::from(*value)),
            ExprKind::Ident(name) => write!(self.out, "{name}"),
            ExprKind::Binary { op, left, right } => {
                pending.extend([
                    Piece::Text(")"),
                    Piece::Expr(right),
                    Piece::Operator(*op),
                    Piece::Expr(left),
                ]);
                self.out.write_str("(")
            }
            ExprKind::Unary { op, operand } => {
                pending.extend([Piece::Text(")"), Piece::Expr(operand)]);
                write!(self.out, "{op}(")
            }
            ExprKind::Call { callee, args } if callee.is_ident(builtins::PRINT) => {
                // The variant is picked from the argument's node kind and
                // only the first argument is printed.
                let first = args.first();
                let builtin = builtins::builtin(builtins::print_variant(first));
                pending.push(Piece::Text(")"));
                pending.extend(first.map(Piece::Expr));
                write!(self.out, "{}(", builtin.name)
            }
            ExprKind::Call { callee, args } => {
                pending.push(Piece::Text(")"));
                for (index, arg) in args.iter().enumerate().rev() {
                    pending.push(Piece::Expr(arg));
                    if index > 0 {
                        pending.push(Piece::Text(", "));
                    }
                }
                pending.extend([Piece::Text("("), Piece::Expr(callee)]);
                Ok(())
            }
        }
    }
}

/// Output still owed for a partly written expression.
enum Piece<'e> {
    Expr(&'e Expr),
    Text(&'static str),
    Operator(Operator),
}
