//! Scanner for Miru source text.
//!
//! The scanner is lazy: [`Lexer::next_token`] produces exactly one token
//! per call and never backtracks. Once the input is exhausted every
//! further call returns an `Eof` token. Malformed input does not abort
//! scanning; it yields a [`TokenKind::Error`] token carrying a
//! [`Diagnostic`], and the parser decides what to do with it.

use std::fmt;

use crate::diagnostic::{Diagnostic, codes};
use crate::span::Span;

/// Kind of a token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Special
    Eof,
    Error,

    // Identifiers and literals
    Int,
    Float,
    String,
    Ident,

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :
    Dot,       // .

    // Operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Assign,  // =
    EqEq,    // ==
    NotEq,   // !=
    Lt,      // <
    Le,      // <=
    Gt,      // >
    Ge,      // >=
    AndAnd,  // &&
    OrOr,    // ||
    Bang,    // !

    // Keywords
    If,
    Else,
    While,
    For,
    Func,
    Return,
    Let,
    Const,
    True,
    False,
    Null,
    Print,
}

impl TokenKind {
    /// Short human-readable form used in parser diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Error => "invalid token",
            TokenKind::Int => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::String => "string literal",
            TokenKind::Ident => "identifier",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Func => "'func'",
            TokenKind::Return => "'return'",
            TokenKind::Let => "'let'",
            TokenKind::Const => "'const'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::Print => "'print'",
        }
    }
}

/// Decoded payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue<'src> {
    None,
    Int(i64),
    Float(f64),
    /// Raw text between the quotes of a string literal.
    Str(&'src str),
    Error(Diagnostic),
}

/// A single token.
///
/// `lexeme` is the exact slice of the source the token was scanned from
/// (including the quotes of a string literal). Tokens borrow the source,
/// so the caller keeps the source alive while tokens are in use.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub value: TokenValue<'src>,
    pub span: Span,
}

impl Token<'_> {
    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Error(diag) => write!(f, "{:?} {} ({})", self.kind, diag.message, self.span),
            _ if self.kind == TokenKind::Eof => write!(f, "{:?} ({})", self.kind, self.span),
            _ => write!(f, "{:?} '{}' ({})", self.kind, self.lexeme, self.span),
        }
    }
}

/// Scan a whole source string.
///
/// Tokens are collected up to and including the first `Eof` or `Error`
/// token; nothing after a scan error is meaningful.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let stop = matches!(token.kind, TokenKind::Eof | TokenKind::Error);
        tokens.push(token);
        if stop {
            return tokens;
        }
    }
}

pub struct Lexer<'src> {
    source: &'src str,
    chars: &'src [u8],
    index: usize,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.as_bytes(),
            index: 0,
            line: 1,
            column: 1,
        }
    }

    /// Produce the next token, advancing past it.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_trivia();

        let start = self.index;
        let line = self.line;
        let column = self.column;

        let Some(ch) = self.peek_char() else {
            return Token {
                kind: TokenKind::Eof,
                lexeme: "",
                value: TokenValue::None,
                span: Span::point(start as u32, line, column),
            };
        };

        if is_ident_start(ch) {
            return self.lex_ident_or_keyword(start, line, column);
        }
        if ch.is_ascii_digit() || (ch == b'-' && self.peek_next().is_some_and(|c| c.is_ascii_digit()))
        {
            return self.lex_number(start, line, column);
        }

        self.consume_char();
        let kind = match ch {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'.' => TokenKind::Dot,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'=' => self.either(b'=', TokenKind::EqEq, TokenKind::Assign),
            b'!' => self.either(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'<' => self.either(b'=', TokenKind::Le, TokenKind::Lt),
            b'>' => self.either(b'=', TokenKind::Ge, TokenKind::Gt),
            b'&' => {
                if !self.match_char(b'&') {
                    return self.error_token(
                        start,
                        line,
                        column,
                        "unexpected character '&'",
                        codes::UNEXPECTED_CHARACTER,
                    );
                }
                TokenKind::AndAnd
            }
            b'|' => {
                if !self.match_char(b'|') {
                    return self.error_token(
                        start,
                        line,
                        column,
                        "unexpected character '|'",
                        codes::UNEXPECTED_CHARACTER,
                    );
                }
                TokenKind::OrOr
            }
            b'"' => return self.lex_string(start, line, column),
            _ => {
                // Swallow the rest of a multi-byte character so the lexeme
                // stays on a char boundary.
                while self.peek_char().is_some_and(is_utf8_continuation) {
                    self.index += 1;
                }
                let text = &self.source[start..self.index];
                return self.error_token(
                    start,
                    line,
                    column,
                    format!("unexpected character '{text}'"),
                    codes::UNEXPECTED_CHARACTER,
                );
            }
        };
        self.simple_token(kind, start, line, column)
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' => self.consume_char(),
                b'/' if self.peek_next() == Some(b'/') => {
                    while self.peek_char().is_some_and(|c| c != b'\n') {
                        self.consume_char();
                    }
                }
                _ => return,
            }
        }
    }

    fn either(&mut self, next: u8, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.match_char(next) { matched } else { otherwise }
    }

    fn simple_token(&self, kind: TokenKind, start: usize, line: u32, column: u32) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[start..self.index],
            value: TokenValue::None,
            span: self.span_from(start, line, column),
        }
    }

    fn error_token(
        &self,
        start: usize,
        line: u32,
        column: u32,
        message: impl Into<String>,
        code: &'static str,
    ) -> Token<'src> {
        let span = self.span_from(start, line, column);
        Token {
            kind: TokenKind::Error,
            lexeme: &self.source[start..self.index],
            value: TokenValue::Error(Diagnostic::error(message, span).with_code(code)),
            span,
        }
    }

    fn lex_string(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        // Opening quote is already consumed.
        let content_start = self.index;
        while let Some(ch) = self.peek_char() {
            match ch {
                b'"' => {
                    let content_end = self.index;
                    self.consume_char();
                    return Token {
                        kind: TokenKind::String,
                        lexeme: &self.source[start..self.index],
                        value: TokenValue::Str(&self.source[content_start..content_end]),
                        span: self.span_from(start, line, column),
                    };
                }
                b'\\' => {
                    self.consume_in_string();
                    if self.peek_char().is_some() {
                        self.consume_in_string();
                    }
                }
                _ => self.consume_in_string(),
            }
        }

        self.error_token(
            start,
            line,
            column,
            "unterminated string literal",
            codes::UNTERMINATED_STRING,
        )
    }

    fn lex_number(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        if self.peek_char() == Some(b'-') {
            self.consume_char();
        }
        self.consume_digits();

        // `3.` is an integer followed by a dot; only `.digit` continues.
        let mut is_float = false;
        if self.peek_char() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.consume_char();
            self.consume_digits();
        }

        let text = &self.source[start..self.index];
        let (kind, value) = if is_float {
            match text.parse::<f64>() {
                Ok(value) => (TokenKind::Float, TokenValue::Float(value)),
                Err(_) => {
                    return self.error_token(
                        start,
                        line,
                        column,
                        format!("invalid float literal '{text}'"),
                        codes::UNEXPECTED_CHARACTER,
                    );
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => (TokenKind::Int, TokenValue::Int(value)),
                Err(_) => {
                    return self.error_token(
                        start,
                        line,
                        column,
                        format!("integer literal '{text}' is out of range"),
                        codes::INTEGER_OUT_OF_RANGE,
                    );
                }
            }
        };

        Token {
            kind,
            lexeme: text,
            value,
            span: self.span_from(start, line, column),
        }
    }

    fn lex_ident_or_keyword(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        while self.peek_char().is_some_and(is_ident_continue) {
            self.consume_char();
        }
        let text = &self.source[start..self.index];
        let kind = keyword(text).unwrap_or(TokenKind::Ident);
        self.simple_token(kind, start, line, column)
    }

    fn consume_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
        }
    }

    fn span_from(&self, start: usize, line: u32, column: u32) -> Span {
        Span::new(start as u32, self.index as u32, line, column)
    }

    fn peek_char(&self) -> Option<u8> {
        self.chars.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.chars.get(self.index + 1).copied()
    }

    fn match_char(&mut self, expected: u8) -> bool {
        if self.peek_char() == Some(expected) {
            self.consume_char();
            true
        } else {
            false
        }
    }

    fn consume_char(&mut self) {
        let Some(ch) = self.peek_char() else {
            return;
        };
        self.index += 1;
        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if !is_utf8_continuation(ch) {
            self.column += 1;
        }
    }

    /// Inside a string literal a newline bumps the line but the column
    /// keeps counting.
    fn consume_in_string(&mut self) {
        let Some(ch) = self.peek_char() else {
            return;
        };
        self.index += 1;
        if ch == b'\n' {
            self.line += 1;
        }
        if !is_utf8_continuation(ch) {
            self.column += 1;
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

/// Keyword table, keyed by length first and then by exact text.
fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text.len() {
        2 => match text {
            "if" => TokenKind::If,
            _ => return None,
        },
        3 => match text {
            "for" => TokenKind::For,
            "let" => TokenKind::Let,
            _ => return None,
        },
        4 => match text {
            "else" => TokenKind::Else,
            "func" => TokenKind::Func,
            "true" => TokenKind::True,
            "null" => TokenKind::Null,
            _ => return None,
        },
        5 => match text {
            "while" => TokenKind::While,
            "false" => TokenKind::False,
            "const" => TokenKind::Const,
            "print" => TokenKind::Print,
            _ => return None,
        },
        6 => match text {
            "return" => TokenKind::Return,
            _ => return None,
        },
        _ => return None,
    };
    Some(kind)
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

fn is_utf8_continuation(ch: u8) -> bool {
    ch & 0xC0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_integer_literal() {
        let tokens = tokenize("42");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].value, TokenValue::Int(42));
        assert_eq!(tokens[0].lexeme, "42");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn scans_float_literal() {
        let tokens = tokenize("3.14");
        assert_eq!(tokens[0].kind, TokenKind::Float);
        assert_eq!(tokens[0].value, TokenValue::Float(3.14));
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn dot_without_digit_is_not_part_of_number() {
        let tokens = tokenize("3.");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].value, TokenValue::Int(3));
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].kind, TokenKind::Eof);

        assert_eq!(kinds("1.x"), vec![TokenKind::Int, TokenKind::Dot, TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn leading_minus_attaches_only_when_adjacent() {
        let tokens = tokenize("-7 - 7");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].value, TokenValue::Int(-7));
        assert_eq!(tokens[1].kind, TokenKind::Minus);
        assert_eq!(tokens[2].value, TokenValue::Int(7));

        let tokens = tokenize("-2.5");
        assert_eq!(tokens[0].value, TokenValue::Float(-2.5));
    }

    #[test]
    fn unterminated_string_yields_single_error_token() {
        let tokens = tokenize("\"unterminated");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        match &tokens[0].value {
            TokenValue::Error(diag) => {
                assert_eq!(diag.code, Some(codes::UNTERMINATED_STRING));
                assert_eq!(diag.line(), 1);
            }
            other => panic!("expected error payload, got {other:?}"),
        }
    }

    #[test]
    fn string_literal_keeps_quotes_in_lexeme_only() {
        let tokens = tokenize(r#""hi \"there\"" x"#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, r#""hi \"there\"""#);
        assert_eq!(tokens[0].value, TokenValue::Str(r#"hi \"there\""#));
        assert_eq!(tokens[1].kind, TokenKind::Ident);
    }

    #[test]
    fn newline_inside_string_bumps_line() {
        let tokens = tokenize("\"a\nb\" x");
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span.line, 2);
        // The column is not reset by the newline inside the literal.
        assert_eq!(tokens[1].span.column, 7);
    }

    #[test]
    fn recognizes_keywords_and_identifiers() {
        assert_eq!(
            kinds("if else while for func return let const true false null print iff _x9"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::For,
                TokenKind::Func,
                TokenKind::Return,
                TokenKind::Let,
                TokenKind::Const,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::Print,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn recognizes_two_character_operators() {
        assert_eq!(
            kinds("== != <= >= && || = ! < >"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Assign,
                TokenKind::Bang,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lone_ampersand_and_pipe_are_errors() {
        assert_eq!(kinds("a & b"), vec![TokenKind::Ident, TokenKind::Error]);
        assert_eq!(kinds("a | b"), vec![TokenKind::Ident, TokenKind::Error]);
    }

    #[test]
    fn unknown_character_is_an_error() {
        let tokens = tokenize("let x = 1 @ 2;");
        let last = tokens.last().expect("at least one token");
        assert_eq!(last.kind, TokenKind::Error);
        assert_eq!(last.lexeme, "@");

        let tokens = tokenize("é");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].lexeme, "é");
    }

    #[test]
    fn skips_comments_and_tracks_positions() {
        let tokens = tokenize("// header\n  let x; // trailing\n/");
        assert_eq!(tokens[0].kind, TokenKind::Let);
        assert_eq!((tokens[0].span.line, tokens[0].span.column), (2, 3));
        assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 7));
        assert_eq!(tokens[3].kind, TokenKind::Slash);
        assert_eq!(tokens[3].span.line, 3);
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn scanning_is_deterministic() {
        let source = "func f(a, b) { return a + b * 2.5; } print(f(1, -2));";
        assert_eq!(tokenize(source), tokenize(source));
    }

    #[test]
    fn integer_overflow_is_reported() {
        let tokens = tokenize("99999999999999999999");
        assert_eq!(tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn iterator_stops_at_end_of_input() {
        let collected: Vec<_> = Lexer::new("a b c").map(|t| t.lexeme).collect();
        assert_eq!(collected, vec!["a", "b", "c"]);
    }
}
