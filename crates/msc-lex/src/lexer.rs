//! Lexer: source text to token stream (§4.1).

use msc_util::{DiagnosticBuilder, Handler, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{Literal, Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    handler: &'a Handler,
    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Scans the whole source into a token stream terminated by a single
    /// `EOF`, per Testable Property #1.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tracing::debug!(count = tokens.len(), "lexing complete");
        tokens
    }

    fn start_span(&self) -> Span {
        Span::new(self.token_start, self.cursor.position(), self.token_start_line, self.token_start_column)
    }

    fn report(&mut self, message: impl Into<String>) {
        let span = self.start_span();
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::new(TokenKind::Eof, String::new(), None, self.start_span());
        }

        let c = self.cursor.current_char();
        match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '=' => self.two_char_or('=', TokenKind::Eq, TokenKind::Assign),
            '!' => self.two_char_or('=', TokenKind::Ne, TokenKind::Not),
            '<' => self.two_char_or('=', TokenKind::Le, TokenKind::Lt),
            '>' => self.two_char_or('=', TokenKind::Ge, TokenKind::Gt),
            '&' => self.two_char_required('&', TokenKind::And),
            '|' => self.two_char_required('|', TokenKind::Or),
            '"' | '\'' => self.lex_string(c),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => self.lex_identifier(),
            c => {
                self.cursor.advance();
                self.report(format!("Unexpected character '{c}' at line {}, column {}", self.token_start_line, self.token_start_column));
                self.next_token()
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let lexeme = self.cursor.current_char().to_string();
        self.cursor.advance();
        Token::new(kind, lexeme, None, self.start_span())
    }

    /// Emits `two` if the next character is `expect`, else `one`. Used for
    /// the `==`/`!=`/`<=`/`>=` family where the single-char form is also valid.
    fn two_char_or(&mut self, expect: char, two: TokenKind, one: TokenKind) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == expect {
            self.cursor.advance();
            Token::new(two, format!("{}{}", one_char_of(one), expect), None, self.start_span())
        } else {
            Token::new(one, one_char_of(one).to_string(), None, self.start_span())
        }
    }

    /// Emits `kind` only if doubled (`&&`, `||`); a lone `&`/`|` is not part
    /// of MiniScript's grammar and is reported as unexpected.
    fn two_char_required(&mut self, expect: char, kind: TokenKind) -> Token {
        let first = self.cursor.current_char();
        self.cursor.advance();
        if self.cursor.current_char() == expect {
            self.cursor.advance();
            Token::new(kind, format!("{first}{expect}"), None, self.start_span())
        } else {
            self.report(format!("Unexpected character '{first}' at line {}, column {}", self.token_start_line, self.token_start_column));
            self.next_token()
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        while self.cursor.current_char().is_alphanumeric() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        if let Some(kind) = TokenKind::keyword(text) {
            let literal = match kind {
                TokenKind::True => Some(Literal::Bool(true)),
                TokenKind::False => Some(Literal::Bool(false)),
                _ => None,
            };
            Token::new(kind, text.to_string(), literal, self.start_span())
        } else {
            Token::new(TokenKind::Id, text.to_string(), None, self.start_span())
        }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let is_float = self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();
        if is_float {
            self.cursor.advance(); // consume '.'
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start);
            let value: f64 = text.parse().unwrap_or(0.0);
            Token::new(TokenKind::FloatLit, text.to_string(), Some(Literal::Float(value)), self.start_span())
        } else {
            let text = self.cursor.slice_from(start);
            let value: i64 = text.parse().unwrap_or(0);
            Token::new(TokenKind::IntLit, text.to_string(), Some(Literal::Int(value)), self.start_span())
        }
    }

    fn lex_string(&mut self, quote: char) -> Token {
        self.cursor.advance(); // opening quote
        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                self.report(format!("Unterminated string at line {}", self.token_start_line));
                break;
            }
            let c = self.cursor.current_char();
            if c == quote {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                let escaped = self.cursor.current_char();
                self.cursor.advance();
                content.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    '\\' => '\\',
                    c if c == quote => quote,
                    other => other,
                });
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }
        let lexeme = self.cursor.slice_from(self.token_start).to_string();
        Token::new(TokenKind::StringLit, lexeme, Some(Literal::Str(Symbol::intern(&content))), self.start_span())
    }
}

/// Recovers the single-char lexeme for a one-char token kind; used so
/// `two_char_or` only has to pass the kind, not also its lexeme.
fn one_char_of(kind: TokenKind) -> char {
    match kind {
        TokenKind::Assign => '=',
        TokenKind::Not => '!',
        TokenKind::Lt => '<',
        TokenKind::Gt => '>',
        _ => unreachable!("one_char_of called with a multi-char kind"),
    }
}
