//! Abstract syntax tree for Miru.
//!
//! Every node owns its children exclusively (`Box` / `Vec`), so the
//! whole tree is released in one pass when the [`Program`] is dropped,
//! and any subtree built during a failed parse is released as soon as the
//! error propagates out of the frame that owns it.
//!
//! Operator chains and call suffixes grow the tree to the left without
//! bound, so dropping and dumping an [`Expr`] walk it with an explicit
//! stack.
//!
//! Each node records the source line of the token that introduced it.
//! The line is only used for diagnostics and [`Program::dump`].

use std::fmt::{self, Write};

/// Operators shared by binary and unary nodes.
///
/// Unary minus reuses [`Operator::Sub`]; assignment is a binary node
/// whose left operand is always an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Assign,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::Assign => "=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    /// Raw string contents, without the surrounding quotes.
    Str(String),
    Bool(bool),
    Ident(String),
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: Operator,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn int(value: i64, line: u32) -> Self {
        Self::new(ExprKind::Int(value), line)
    }

    pub fn float(value: f64, line: u32) -> Self {
        Self::new(ExprKind::Float(value), line)
    }

    pub fn string(value: impl Into<String>, line: u32) -> Self {
        Self::new(ExprKind::Str(value.into()), line)
    }

    pub fn bool(value: bool, line: u32) -> Self {
        Self::new(ExprKind::Bool(value), line)
    }

    pub fn ident(name: impl Into<String>, line: u32) -> Self {
        Self::new(ExprKind::Ident(name.into()), line)
    }

    pub fn binary(op: Operator, left: Expr, right: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            line,
        )
    }

    pub fn unary(op: Operator, operand: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        )
    }

    pub fn call(callee: Expr, args: Vec<Expr>, line: u32) -> Self {
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            line,
        )
    }

    /// True if this is an identifier reference to `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, ExprKind::Ident(n) if n == name)
    }

    /// Move the children out, leaving leaves in their place.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        fn take(slot: &mut Expr) -> Expr {
            std::mem::replace(slot, Expr::int(0, 0))
        }

        match &mut self.kind {
            ExprKind::Binary { left, right, .. } => {
                out.push(take(left));
                out.push(take(right));
            }
            ExprKind::Unary { operand, .. } => out.push(take(operand)),
            ExprKind::Call { callee, args } => {
                out.push(take(callee));
                out.append(args);
            }
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Str(_)
            | ExprKind::Bool(_)
            | ExprKind::Ident(_) => {}
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    VarDecl {
        name: String,
        initializer: Option<Expr>,
        is_const: bool,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        /// Empty when there is no `else`.
        else_branch: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    FunctionDef(FunctionDef),
    Return(Option<Expr>),
    Block(Vec<Stmt>),
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn expr(expr: Expr, line: u32) -> Self {
        Self::new(StmtKind::Expr(expr), line)
    }

    pub fn var_decl(name: impl Into<String>, initializer: Expr, is_const: bool, line: u32) -> Self {
        Self::new(
            StmtKind::VarDecl {
                name: name.into(),
                initializer: Some(initializer),
                is_const,
            },
            line,
        )
    }

    pub fn function(
        name: impl Into<String>,
        params: Vec<String>,
        body: Vec<Stmt>,
        line: u32,
    ) -> Self {
        Self::new(
            StmtKind::FunctionDef(FunctionDef {
                name: name.into(),
                params,
                body,
            }),
            line,
        )
    }

    pub fn ret(value: Option<Expr>, line: u32) -> Self {
        Self::new(StmtKind::Return(value), line)
    }

    pub fn as_function(&self) -> Option<&FunctionDef> {
        match &self.kind {
            StmtKind::FunctionDef(def) => Some(def),
            _ => None,
        }
    }
}

/// Root of the tree: the ordered top-level statements of one source unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Stmt) {
        self.statements.push(statement);
    }

    /// Top-level function definitions in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.statements.iter().filter_map(Stmt::as_function)
    }

    /// Top-level statements that are not function definitions.
    pub fn top_level_statements(&self) -> impl Iterator<Item = &Stmt> {
        self.statements.iter().filter(|stmt| stmt.as_function().is_none())
    }

    pub fn has_top_level_statements(&self) -> bool {
        self.top_level_statements().next().is_some()
    }

    /// Render the tree, one node per line, for debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut dumper = Dumper { out: &mut out };
        // Writing into a String cannot fail.
        let _ = dumper.program(self);
        out
    }
}

struct Dumper<'a> {
    out: &'a mut String,
}

impl Dumper<'_> {
    fn line(&mut self, depth: usize, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.write_fmt(args)?;
        self.out.push('\n');
        Ok(())
    }

    fn program(&mut self, program: &Program) -> fmt::Result {
        self.line(0, format_args!("PROGRAM ({} statements)", program.statements.len()))?;
        self.statements(1, &program.statements)
    }

    fn statements(&mut self, depth: usize, statements: &[Stmt]) -> fmt::Result {
        for stmt in statements {
            self.stmt(depth, stmt)?;
        }
        Ok(())
    }

    fn stmt(&mut self, depth: usize, stmt: &Stmt) -> fmt::Result {
        let line = stmt.line;
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.line(depth, format_args!("EXPR_STMT [line {line}]"))?;
                self.expr(depth + 1, expr)
            }
            StmtKind::VarDecl {
                name,
                initializer,
                is_const,
            } => {
                let binding = if *is_const { "const" } else { "let" };
                self.line(depth, format_args!("VAR_DECL {name} ({binding}) [line {line}]"))?;
                match initializer {
                    Some(expr) => self.expr(depth + 1, expr),
                    None => Ok(()),
                }
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(depth, format_args!("IF [line {line}]"))?;
                self.line(depth + 1, format_args!("CONDITION"))?;
                self.expr(depth + 2, condition)?;
                self.line(depth + 1, format_args!("THEN ({} statements)", then_branch.len()))?;
                self.statements(depth + 2, then_branch)?;
                if !else_branch.is_empty() {
                    self.line(depth + 1, format_args!("ELSE ({} statements)", else_branch.len()))?;
                    self.statements(depth + 2, else_branch)?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                self.line(depth, format_args!("WHILE [line {line}]"))?;
                self.line(depth + 1, format_args!("CONDITION"))?;
                self.expr(depth + 2, condition)?;
                self.line(depth + 1, format_args!("BODY ({} statements)", body.len()))?;
                self.statements(depth + 2, body)
            }
            StmtKind::FunctionDef(def) => {
                self.line(
                    depth,
                    format_args!("FUNCTION {}({}) [line {line}]", def.name, def.params.join(", ")),
                )?;
                self.statements(depth + 1, &def.body)
            }
            StmtKind::Return(value) => {
                self.line(depth, format_args!("RETURN [line {line}]"))?;
                match value {
                    Some(expr) => self.expr(depth + 1, expr),
                    None => Ok(()),
                }
            }
            StmtKind::Block(statements) => {
                self.line(
                    depth,
                    format_args!("BLOCK ({} statements) [line {line}]", statements.len()),
                )?;
                self.statements(depth + 1, statements)
            }
        }
    }

    fn expr(&mut self, depth: usize, root: &Expr) -> fmt::Result {
        let mut pending = vec![(depth, root)];
        while let Some((depth, expr)) = pending.pop() {
            let line = expr.line;
            match &expr.kind {
                ExprKind::Int(value) => self.line(depth, format_args!("INT {value} [line {line}]"))?,
                ExprKind::Float(value) => {
                    self.line(depth, format_args!("FLOAT {value} [line {line}]"))?
                }
                ExprKind::Str(value) => {
                    self.line(depth, format_args!("STRING \"{value}\" [line {line}]"))?
                }
                ExprKind::Bool(value) => self.line(depth, format_args!("BOOL {value} [line {line}]"))?,
                ExprKind::Ident(name) => self.line(depth, format_args!("IDENT {name} [line {line}]"))?,
                ExprKind::Binary { op, left, right } => {
                    self.line(depth, format_args!("BINARY {op} [line {line}]"))?;
                    pending.push((depth + 1, &**right));
                    pending.push((depth + 1, &**left));
                }
                ExprKind::Unary { op, operand } => {
                    self.line(depth, format_args!("UNARY {op} [line {line}]"))?;
                    pending.push((depth + 1, &**operand));
                }
                ExprKind::Call { callee, args } => {
                    self.line(depth, format_args!("CALL ({} args) [line {line}]", args.len()))?;
                    pending.extend(args.iter().rev().map(|arg| (depth + 1, arg)));
                    pending.push((depth + 1, &**callee));
                }
            }
        }
        Ok(())
    }
}
