//! Recursive-descent parser for Miru.
//!
//! The parser pulls tokens lazily from the [`Lexer`] and looks at a
//! single current token to decide what to do next. Expressions are parsed
//! with one method per precedence level, lowest first:
//!
//! ```text
//! assignment  ->  logical_or ( "=" assignment )?          (identifier target only)
//! logical_or  ->  logical_and ( "||" logical_and )*
//! logical_and ->  equality ( "&&" equality )*
//! equality    ->  comparison ( ( "==" | "!=" ) comparison )*
//! comparison  ->  term ( ( "<" | "<=" | ">" | ">=" ) term )*
//! term        ->  factor ( ( "+" | "-" ) factor )*
//! factor      ->  unary ( ( "*" | "/" | "%" ) unary )*
//! unary       ->  ( "!" | "-" ) unary | call
//! call        ->  primary ( "(" arguments? ")" )*
//! primary     ->  literal | identifier | "(" expression ")"
//! ```
//!
//! Parsing is fail-fast: the first lexical or syntax error is returned and
//! nothing else is reported. Partially built nodes are owned by the
//! failing stack frames and are dropped as the error propagates.
//!
//! Nested constructs (parenthesized and argument expressions, unary
//! operators, assignment right-hand sides, statement bodies) recurse, so
//! their depth is capped at [`MAX_NESTING_DEPTH`]. Operator chains and
//! call suffixes are built in loops and have no such limit.

use crate::ast::{Expr, ExprKind, Operator, Program, Stmt, StmtKind};
use crate::diagnostic::{Diagnostic, codes};
use crate::error::CoreError;
use crate::lexer::{Lexer, Token, TokenKind, TokenValue};

/// Deepest nesting the parser accepts before reporting an error.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse a complete source unit.
pub fn parse(input: &str) -> Result<Program, CoreError> {
    Parser::new(input).parse()
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Program, CoreError> {
        self.reject_error_token()?;
        let mut program = Program::new();
        while !self.check(TokenKind::Eof) {
            let statement = self.parse_statement()?;
            program.push(statement);
        }
        Ok(program)
    }

    // ===== Statements =====

    fn parse_statement(&mut self) -> Result<Stmt, CoreError> {
        match self.current.kind {
            TokenKind::Let | TokenKind::Const => self.parse_var_decl(),
            TokenKind::Func => self.parse_function(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expr_statement(),
        }
    }

    /// `("let" | "const") IDENT "=" expression ";"`
    fn parse_var_decl(&mut self) -> Result<Stmt, CoreError> {
        let line = self.current.line();
        let is_const = self.check(TokenKind::Const);
        self.advance()?;

        let name = self.expect_ident("expected identifier after declaration keyword")?;
        self.expect(TokenKind::Assign, "expected '=' in variable declaration")?;
        let initializer = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;

        Ok(Stmt::var_decl(name, initializer, is_const, line))
    }

    /// `"func" IDENT "(" (IDENT ("," IDENT)*)? ")" "{" statement* "}"`
    fn parse_function(&mut self) -> Result<Stmt, CoreError> {
        let line = self.current.line();
        self.advance()?;

        let name = self.expect_ident("expected function name")?;
        self.expect(TokenKind::LParen, "expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect_ident("expected parameter name")?);
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "expected ')' after parameters")?;

        let body = self.parse_braced_body(
            "expected '{' before function body",
            "expected '}' after function body",
        )?;

        Ok(Stmt::function(name, params, body, line))
    }

    /// `"if" "(" expression ")" "{" statement* "}" ("else" "{" statement* "}")?`
    fn parse_if(&mut self) -> Result<Stmt, CoreError> {
        let line = self.current.line();
        self.advance()?;

        self.expect(TokenKind::LParen, "expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "expected ')' after if condition")?;
        let then_branch = self.parse_braced_body(
            "expected '{' after if condition",
            "expected '}' after then branch",
        )?;

        let else_branch = if self.eat(TokenKind::Else)? {
            self.parse_braced_body("expected '{' after 'else'", "expected '}' after else branch")?
        } else {
            Vec::new()
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            line,
        ))
    }

    /// `"while" "(" expression ")" "{" statement* "}"`
    fn parse_while(&mut self) -> Result<Stmt, CoreError> {
        let line = self.current.line();
        self.advance()?;

        self.expect(TokenKind::LParen, "expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "expected ')' after while condition")?;
        let body = self.parse_braced_body(
            "expected '{' after while condition",
            "expected '}' after while body",
        )?;

        Ok(Stmt::new(StmtKind::While { condition, body }, line))
    }

    /// `"return" expression? ";"`
    fn parse_return(&mut self) -> Result<Stmt, CoreError> {
        let line = self.current.line();
        self.advance()?;

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "expected ';' after return statement")?;

        Ok(Stmt::ret(value, line))
    }

    fn parse_expr_statement(&mut self) -> Result<Stmt, CoreError> {
        let line = self.current.line();
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "expected ';' after expression")?;
        Ok(Stmt::expr(expr, line))
    }

    fn parse_braced_body(
        &mut self,
        open_message: &str,
        close_message: &str,
    ) -> Result<Vec<Stmt>, CoreError> {
        self.expect(TokenKind::LBrace, open_message)?;
        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            body.push(self.nested(Self::parse_statement)?);
        }
        self.expect(TokenKind::RBrace, close_message)?;
        Ok(body)
    }

    // ===== Expressions =====

    pub(crate) fn parse_expression(&mut self) -> Result<Expr, CoreError> {
        self.nested(Self::parse_assignment)
    }

    /// Right-associative; the target must be a plain identifier.
    fn parse_assignment(&mut self) -> Result<Expr, CoreError> {
        let target = self.parse_logical_or()?;

        if self.check(TokenKind::Assign) {
            if !matches!(target.kind, ExprKind::Ident(_)) {
                return Err(self.syntax_error(
                    "invalid assignment target",
                    codes::INVALID_ASSIGNMENT_TARGET,
                ));
            }
            self.advance()?;
            let line = self.current.line();
            let value = self.nested(Self::parse_assignment)?;
            return Ok(Expr::binary(Operator::Assign, target, value, line));
        }

        Ok(target)
    }

    fn parse_logical_or(&mut self) -> Result<Expr, CoreError> {
        self.binary_chain(&[(TokenKind::OrOr, Operator::Or)], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, CoreError> {
        self.binary_chain(&[(TokenKind::AndAnd, Operator::And)], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, CoreError> {
        self.binary_chain(
            &[
                (TokenKind::EqEq, Operator::Eq),
                (TokenKind::NotEq, Operator::Ne),
            ],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self) -> Result<Expr, CoreError> {
        self.binary_chain(
            &[
                (TokenKind::Lt, Operator::Lt),
                (TokenKind::Le, Operator::Le),
                (TokenKind::Gt, Operator::Gt),
                (TokenKind::Ge, Operator::Ge),
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> Result<Expr, CoreError> {
        self.binary_chain(
            &[
                (TokenKind::Plus, Operator::Add),
                (TokenKind::Minus, Operator::Sub),
            ],
            Self::parse_factor,
        )
    }

    fn parse_factor(&mut self) -> Result<Expr, CoreError> {
        self.binary_chain(
            &[
                (TokenKind::Star, Operator::Mul),
                (TokenKind::Slash, Operator::Div),
                (TokenKind::Percent, Operator::Mod),
            ],
            Self::parse_unary,
        )
    }

    /// One left-associative precedence level.
    fn binary_chain(
        &mut self,
        operators: &[(TokenKind, Operator)],
        mut operand: impl FnMut(&mut Self) -> Result<Expr, CoreError>,
    ) -> Result<Expr, CoreError> {
        let mut left = operand(self)?;
        loop {
            let Some(op) = operators
                .iter()
                .find(|(kind, _)| self.check(*kind))
                .map(|(_, op)| *op)
            else {
                return Ok(left);
            };
            let line = self.current.line();
            self.advance()?;
            let right = operand(self)?;
            left = Expr::binary(op, left, right, line);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, CoreError> {
        let op = match self.current.kind {
            TokenKind::Bang => Operator::Not,
            TokenKind::Minus => Operator::Sub,
            _ => return self.parse_call(),
        };
        let line = self.current.line();
        self.advance()?;
        let operand = self.nested(Self::parse_unary)?;
        Ok(Expr::unary(op, operand, line))
    }

    /// Zero or more call suffixes, so `f(1)(2)` calls the result of `f(1)`.
    fn parse_call(&mut self) -> Result<Expr, CoreError> {
        let mut expr = self.parse_primary()?;

        while self.check(TokenKind::LParen) {
            let line = self.current.line();
            self.advance()?;

            let mut args = Vec::new();
            if !self.check(TokenKind::RParen) {
                loop {
                    args.push(self.parse_expression()?);
                    if !self.eat(TokenKind::Comma)? {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RParen, "expected ')' after arguments")?;

            expr = Expr::call(expr, args, line);
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, CoreError> {
        if self.eat(TokenKind::LParen)? {
            let inner = self.parse_expression()?;
            self.expect(TokenKind::RParen, "expected ')' after expression")?;
            return Ok(inner);
        }

        let line = self.current.line();
        let expr = match (self.current.kind, &self.current.value) {
            (TokenKind::Int, TokenValue::Int(value)) => Expr::int(*value, line),
            (TokenKind::Float, TokenValue::Float(value)) => Expr::float(*value, line),
            (TokenKind::String, TokenValue::Str(text)) => Expr::string(*text, line),
            (TokenKind::True, _) => Expr::bool(true, line),
            (TokenKind::False, _) => Expr::bool(false, line),
            // `null` has no representation of its own yet.
            (TokenKind::Null, _) => Expr::int(0, line),
            (TokenKind::Ident, _) => Expr::ident(self.current.lexeme, line),
            (TokenKind::Print, _) => Expr::ident("print", line),
            (kind, _) => {
                return Err(self.syntax_error(
                    format!("unexpected {} in expression", kind.describe()),
                    codes::UNEXPECTED_TOKEN,
                ));
            }
        };
        self.advance()?;
        Ok(expr)
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.syntax_error(
                format!("nesting exceeds the limit of {MAX_NESTING_DEPTH} levels"),
                codes::NESTING_TOO_DEEP,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Result<Token<'src>, CoreError> {
        let next = self.lexer.next_token();
        let previous = std::mem::replace(&mut self.current, next);
        self.reject_error_token()?;
        Ok(previous)
    }

    /// Consume the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, CoreError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token<'src>, CoreError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.syntax_error(
                format!("{message}, found {}", self.current.kind.describe()),
                codes::EXPECTED_TOKEN,
            ))
        }
    }

    fn expect_ident(&mut self, message: &str) -> Result<String, CoreError> {
        let token = self.expect(TokenKind::Ident, message)?;
        Ok(token.lexeme.to_string())
    }

    fn reject_error_token(&self) -> Result<(), CoreError> {
        match &self.current.value {
            TokenValue::Error(diag) => Err(CoreError::Lex(diag.clone())),
            _ => Ok(()),
        }
    }

    fn syntax_error(&self, message: impl Into<String>, code: &'static str) -> CoreError {
        CoreError::Parse(Diagnostic::error(message, self.current.span).with_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_expr(source: &str) -> Expr {
        let program = parse(source).expect("parse");
        assert_eq!(program.statements.len(), 1);
        match program.statements.into_iter().next().map(|s| s.kind) {
            Some(StmtKind::Expr(expr)) => expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    fn binary_parts(expr: &Expr) -> (Operator, &Expr, &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => (*op, left, right),
            other => panic!("expected binary node, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse("let x = 1 + 2 * 3;").expect("parse");
        assert_eq!(program.statements.len(), 1);
        let StmtKind::VarDecl {
            name,
            initializer: Some(init),
            is_const,
        } = &program.statements[0].kind
        else {
            panic!("expected variable declaration");
        };
        assert_eq!(name, "x");
        assert!(!is_const);

        let (op, left, right) = binary_parts(init);
        assert_eq!(op, Operator::Add);
        assert_eq!(left.kind, ExprKind::Int(1));
        let (inner, l, r) = binary_parts(right);
        assert_eq!(inner, Operator::Mul);
        assert_eq!(l.kind, ExprKind::Int(2));
        assert_eq!(r.kind, ExprKind::Int(3));
    }

    #[test]
    fn parses_function_definition() {
        let program = parse("func f(a,b){return a+b;}").expect("parse");
        let def = program.statements[0].as_function().expect("function");
        assert_eq!(def.name, "f");
        assert_eq!(def.params, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(def.body.len(), 1);
        let StmtKind::Return(Some(value)) = &def.body[0].kind else {
            panic!("expected return with value");
        };
        let (op, left, right) = binary_parts(value);
        assert_eq!(op, Operator::Add);
        assert!(left.is_ident("a"));
        assert!(right.is_ident("b"));
    }

    #[test]
    fn parses_function_without_parameters() {
        let program = parse("func main() { }").expect("parse");
        let def = program.statements[0].as_function().expect("function");
        assert!(def.params.is_empty());
        assert!(def.body.is_empty());
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = single_expr("1 - 2 - 3;");
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, Operator::Sub);
        assert_eq!(right.kind, ExprKind::Int(3));
        let (inner, _, _) = binary_parts(left);
        assert_eq!(inner, Operator::Sub);
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = single_expr("a = b = 1;");
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, Operator::Assign);
        assert!(left.is_ident("a"));
        let (inner, inner_left, inner_right) = binary_parts(right);
        assert_eq!(inner, Operator::Assign);
        assert!(inner_left.is_ident("b"));
        assert_eq!(inner_right.kind, ExprKind::Int(1));
    }

    #[test]
    fn rejects_invalid_assignment_target() {
        let err = parse("1 = 2;").unwrap_err();
        let diag = err.diagnostic().expect("diagnostic");
        assert!(matches!(err, CoreError::Parse(_)));
        assert_eq!(diag.code, Some(codes::INVALID_ASSIGNMENT_TARGET));
    }

    #[test]
    fn logical_and_comparison_layers() {
        let expr = single_expr("a < b == c && d || e;");
        let (op, left, _) = binary_parts(&expr);
        assert_eq!(op, Operator::Or);
        let (op, left, _) = binary_parts(left);
        assert_eq!(op, Operator::And);
        let (op, left, _) = binary_parts(left);
        assert_eq!(op, Operator::Eq);
        let (op, _, _) = binary_parts(left);
        assert_eq!(op, Operator::Lt);
    }

    #[test]
    fn parses_unary_operators() {
        let expr = single_expr("!-x;");
        let ExprKind::Unary { op, operand } = &expr.kind else {
            panic!("expected unary");
        };
        assert_eq!(*op, Operator::Not);
        let ExprKind::Unary { op, operand } = &operand.kind else {
            panic!("expected nested unary");
        };
        assert_eq!(*op, Operator::Sub);
        assert!(operand.is_ident("x"));
    }

    #[test]
    fn parses_curried_call_chain() {
        let expr = single_expr("f(1)(2, 3);");
        let ExprKind::Call { callee, args } = &expr.kind else {
            panic!("expected call");
        };
        assert_eq!(args.len(), 2);
        let ExprKind::Call { callee, args } = &callee.kind else {
            panic!("expected inner call");
        };
        assert!(callee.is_ident("f"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn print_parses_as_identifier_call() {
        let expr = single_expr("print(\"hi\");");
        let ExprKind::Call { callee, args } = &expr.kind else {
            panic!("expected call");
        };
        assert!(callee.is_ident("print"));
        assert_eq!(args[0].kind, ExprKind::Str("hi".into()));
    }

    #[test]
    fn null_lowers_to_zero() {
        assert_eq!(single_expr("null;").kind, ExprKind::Int(0));
        assert_eq!(single_expr("(true);").kind, ExprKind::Bool(true));
    }

    #[test]
    fn parses_if_else_and_while() {
        let program = parse(
            "if (x > 1) { print(x); } else { print(0); }\nwhile (x) { x = x - 1; }",
        )
        .expect("parse");
        let StmtKind::If {
            then_branch,
            else_branch,
            ..
        } = &program.statements[0].kind
        else {
            panic!("expected if");
        };
        assert_eq!(then_branch.len(), 1);
        assert_eq!(else_branch.len(), 1);

        let StmtKind::While { body, .. } = &program.statements[1].kind else {
            panic!("expected while");
        };
        assert_eq!(body.len(), 1);
        assert_eq!(program.statements[1].line, 2);
    }

    #[test]
    fn if_without_else_has_empty_else_branch() {
        let program = parse("if (1) { }").expect("parse");
        let StmtKind::If { else_branch, .. } = &program.statements[0].kind else {
            panic!("expected if");
        };
        assert!(else_branch.is_empty());
    }

    #[test]
    fn parses_const_and_bare_return() {
        let program = parse("const k = 3;\nfunc g() { return; }").expect("parse");
        assert!(matches!(
            program.statements[0].kind,
            StmtKind::VarDecl { is_const: true, .. }
        ));
        let def = program.statements[1].as_function().expect("function");
        assert_eq!(def.body[0].kind, StmtKind::Return(None));
    }

    #[test]
    fn unterminated_function_body_is_a_single_syntax_error() {
        let err = parse("func f(){").unwrap_err();
        let CoreError::Parse(diag) = &err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(diag.line(), 1);
        assert_eq!(diag.code, Some(codes::EXPECTED_TOKEN));
        assert!(diag.message.contains("'}'"));
    }

    #[test]
    fn reports_line_of_failing_token() {
        let err = parse("let a = 1;\nlet b = 2\nlet c = 3;").unwrap_err();
        assert_eq!(err.diagnostic().map(|d| d.line()), Some(3));
    }

    #[test]
    fn surfaces_lexical_errors() {
        let err = parse("let s = \"open;").unwrap_err();
        assert!(matches!(err, CoreError::Lex(_)));

        let err = parse("@").unwrap_err();
        assert!(matches!(err, CoreError::Lex(_)));

        let err = parse("a & b;").unwrap_err();
        assert!(matches!(err, CoreError::Lex(_)));
    }

    #[test]
    fn rejects_malformed_lists() {
        assert!(matches!(parse("func f(a,) {}"), Err(CoreError::Parse(_))));
        assert!(matches!(parse("func f(1) {}"), Err(CoreError::Parse(_))));
        assert!(matches!(parse("f(1,;"), Err(CoreError::Parse(_))));
        assert!(matches!(parse("f(1"), Err(CoreError::Parse(_))));
    }

    #[test]
    fn for_keyword_has_no_statement_form() {
        let err = parse("for (x) { }").unwrap_err();
        assert_eq!(
            err.diagnostic().and_then(|d| d.code),
            Some(codes::UNEXPECTED_TOKEN)
        );
    }

    fn nesting_code(source: &str) -> Option<&'static str> {
        parse(source).err().and_then(|err| err.diagnostic().and_then(|d| d.code))
    }

    #[test]
    fn rejects_nesting_past_the_limit() {
        let parens = format!("print({}1{});", "(".repeat(20_000), ")".repeat(20_000));
        assert_eq!(nesting_code(&parens), Some(codes::NESTING_TOO_DEEP));

        let calls = format!("{}1{};", "f(".repeat(5_000), ")".repeat(5_000));
        assert_eq!(nesting_code(&calls), Some(codes::NESTING_TOO_DEEP));

        let unary = format!("{}x;", "!".repeat(5_000));
        assert_eq!(nesting_code(&unary), Some(codes::NESTING_TOO_DEEP));

        let assignments = format!("{}1;", "a = ".repeat(5_000));
        assert_eq!(nesting_code(&assignments), Some(codes::NESTING_TOO_DEEP));

        let blocks = format!("{}{}", "while (1) { ".repeat(5_000), "}".repeat(5_000));
        assert_eq!(nesting_code(&blocks), Some(codes::NESTING_TOO_DEEP));
    }

    #[test]
    fn nesting_error_reports_position() {
        let source = format!("let x = {}1{};", "(".repeat(500), ")".repeat(500));
        let err = parse(&source).unwrap_err();
        let diag = err.diagnostic().expect("diagnostic");
        assert_eq!(diag.line(), 1);
        assert!(diag.message.contains("nesting"));
    }

    #[test]
    fn accepts_nesting_below_the_limit() {
        let source = format!("print({}1{});", "(".repeat(100), ")".repeat(100));
        let expr = single_expr(&source);
        let ExprKind::Call { args, .. } = &expr.kind else {
            panic!("expected call");
        };
        assert_eq!(args[0], Expr::int(1, 1));
    }

    #[test]
    fn long_operator_chains_are_not_limited() {
        let source = format!("1{};", " + 1".repeat(50_000));
        let expr = single_expr(&source);
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, Operator::Add);
        assert!(matches!(left.kind, ExprKind::Binary { .. }));
        assert_eq!(*right, Expr::int(1, 1));

        let calls = format!("f{};", "(1)".repeat(50_000));
        assert!(matches!(single_expr(&calls).kind, ExprKind::Call { .. }));
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        let program = parse("  // nothing here\n").expect("parse");
        assert!(program.statements.is_empty());
    }
}
