use crate::ast::{Token, TokenKind};
use thiserror::Error;

/// Errors raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A quote was opened and never closed
    #[error("unterminated string starting on line {line}")]
    UnterminatedString { line: usize },

    /// Malformed number, e.g. `0b` without a binary digit
    #[error("invalid numeric literal '{text}' on line {line}")]
    InvalidNumericLiteral { text: String, line: usize },

    /// A character that cannot start any token
    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedCharacter { ch: char, line: usize },
}

/// Single pass scanner over the code points of a source string.
///
/// A scanner is spent after [`Scanner::scan_tokens`]; calling it again yields
/// no tokens. Build a new one per input.
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    start: usize,
    line: usize,
    tokens: Vec<Token>,
}

/// Scans `text` with a fresh [`Scanner`].
pub fn scan(text: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(text).scan_tokens()
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Scanner {
            input: input.chars().collect(),
            position: 0,
            start: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Current line, 1-based.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, ScanError> {
        while !self.is_at_end() {
            self.start = self.position;
            if let Err(err) = self.scan_token() {
                self.position = self.input.len();
                self.tokens.clear();
                return Err(err);
            }
        }

        Ok(std::mem::take(&mut self.tokens))
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        Some(ch)
    }

    /// Consumes the next char only if it is `expected`.
    fn match_next(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> String {
        self.input[self.start..self.position].iter().collect()
    }

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.lexeme(), self.line);
        self.push(token);
    }

    fn push(&mut self, token: Token) {
        tracing::trace!(kind = %token.kind, text = %token.text, line = token.line, "scanned token");
        self.tokens.push(token);
    }

    fn scan_token(&mut self) -> Result<(), ScanError> {
        let Some(ch) = self.advance() else {
            return Ok(());
        };

        match ch {
            '(' => self.add_token(TokenKind::LParen),
            ')' => self.add_token(TokenKind::RParen),
            ',' => self.add_token(TokenKind::Comma),
            ';' => self.add_token(TokenKind::Semicolon),
            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            '*' => self.add_token(TokenKind::Star),
            '/' => self.add_token(TokenKind::Slash),
            '%' => self.add_token(TokenKind::Percent),
            '^' => self.add_token(TokenKind::Caret),
            '&' => self.add_token(TokenKind::Ampersand),
            '|' => self.add_token(TokenKind::Pipe),
            '<' => {
                let kind = if self.match_next('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_next('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_next('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                };
                self.add_token(kind);
            }
            '!' => {
                let kind = if self.match_next('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '.' => self.read_dot(),
            '"' | '\'' => self.read_string(ch)?,
            ' ' | '\t' | '\r' => {}
            '\n' => {
                self.add_token(TokenKind::Newline);
                self.line += 1;
            }
            '0' => self.read_zero()?,
            c if c.is_ascii_digit() => self.read_number(),
            c if is_identifier_start(c) => self.read_identifier(),
            c => {
                return Err(ScanError::UnexpectedCharacter {
                    ch: c,
                    line: self.line,
                });
            }
        }

        Ok(())
    }

    fn read_identifier(&mut self) {
        while self.current_char().is_some_and(is_identifier_char) {
            self.advance();
        }
        self.add_token(TokenKind::Identifier);
    }

    fn read_string(&mut self, quote: char) -> Result<(), ScanError> {
        let start_line = self.line;

        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some('\n') => self.line += 1,
                Some(_) => {}
                None => return Err(ScanError::UnterminatedString { line: start_line }),
            }
        }

        let literal: String = self.input[self.start + 1..self.position - 1].iter().collect();
        let token = Token::string(self.lexeme(), literal, start_line);
        self.push(token);
        Ok(())
    }

    /// A `.` is a number when digits follow it, otherwise a lone dot.
    fn read_dot(&mut self) {
        self.read_digits(false);

        if self.position == self.start + 1 {
            self.add_token(TokenKind::Dot);
        } else {
            self.read_exponent();
            self.add_token(TokenKind::Number);
        }
    }

    fn read_number(&mut self) {
        self.read_digits(true);
        self.read_exponent();
        self.add_token(TokenKind::Number);
    }

    /// `0` may open a binary literal (`0b101`).
    fn read_zero(&mut self) -> Result<(), ScanError> {
        self.read_digits(true);

        let just_zero = self.position == self.start + 1;
        if !just_zero || self.current_char() != Some('b') {
            self.read_exponent();
            self.add_token(TokenKind::Number);
            return Ok(());
        }

        self.advance(); // consume 'b'

        if !self.current_char().is_some_and(is_binary_digit) {
            return Err(ScanError::InvalidNumericLiteral {
                text: self.lexeme(),
                line: self.line,
            });
        }

        let mut can_dot = true;
        while let Some(ch) = self.current_char() {
            if is_binary_digit(ch) {
                self.advance();
            } else if ch == '.' && can_dot {
                can_dot = false;
                self.advance();
            } else {
                break;
            }
        }

        self.add_token(TokenKind::Number);
        Ok(())
    }

    /// Digits with at most one `.` when `can_dot` is set.
    fn read_digits(&mut self, mut can_dot: bool) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && can_dot {
                can_dot = false;
                self.advance();
            } else {
                break;
            }
        }
    }

    /// `e`/`E` belongs to the number only when followed by digits, optionally
    /// signed. Otherwise it is left for the identifier scanner.
    fn read_exponent(&mut self) {
        if !matches!(self.current_char(), Some('e' | 'E')) {
            return;
        }

        let digits_at = match self.peek_char(1) {
            Some(c) if c.is_ascii_digit() => 1,
            Some('+' | '-') if self.peek_char(2).is_some_and(|c| c.is_ascii_digit()) => 2,
            _ => return,
        };

        for _ in 0..digits_at {
            self.advance();
        }
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}
