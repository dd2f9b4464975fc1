//! Lexer
//!
//! Single pass over the source characters. At each position the first
//! matching rule wins:
//!
//! ```text
//! #{ .. }#        multiline comment (unterminated: rest of input dropped)
//! # ..\n          line comment
//! ` ..`  ‛ ..`    STRING (backslash keeps the next char)
//! « ..«           COMPRESSED_STRING
//! k`  ∆c  øb      two-char GENERAL digraph
//! \c              CHARACTER
//! →name  ←name    VARIABLE_SET / VARIABLE_GET
//! 12  1.5  6.     NUMBER (a bare trailing point reads as .5)
//! anything else   one-char GENERAL, whitespace included
//! ```
//!
//! Lexing never fails; malformed input degrades to running to the end of
//! the source or to single-character tokens.

use crate::config::LexerConfig;
use crate::token::{Token, TokenKind};

const BACKTICK: char = '`';
const BACKSLASH: char = '\\';
const COMMENT: char = '#';
const COMPRESSED_DELIMITER: char = '«';
const VARIABLE_SET: char = '→';
const VARIABLE_GET: char = '←';
const DECIMAL_POINT: char = '.';

/// Tokenise `source` with the default configuration
pub fn tokenise(source: &str) -> Vec<Token> {
    tokenise_with_config(source, &LexerConfig::default())
}

pub fn tokenise_with_config(source: &str, config: &LexerConfig) -> Vec<Token> {
    let tokens = Lexer::new(source, config).run();
    tracing::trace!(chars = source.chars().count(), tokens = tokens.len(), "tokenised");
    tokens
}

struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    config: &'a LexerConfig,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &str, config: &'a LexerConfig) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            config,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn emit(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens.push(Token::new(kind, text));
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.peek() {
            match c {
                COMMENT if self.peek_next() == Some('{') => self.multiline_comment(),
                COMMENT => self.line_comment(),
                BACKTICK => self.string(),
                c if c == self.config.alt_string_opener() => self.string(),
                COMPRESSED_DELIMITER => self.compressed_string(),
                c if self.config.is_digraph_prefix(c) && self.peek_next().is_some() => {
                    self.digraph()
                }
                BACKSLASH => self.character(),
                VARIABLE_SET => self.variable(TokenKind::VariableSet),
                VARIABLE_GET => self.variable(TokenKind::VariableGet),
                c if c.is_ascii_digit() || c == DECIMAL_POINT => self.number(),
                c => {
                    self.pos += 1;
                    self.emit(TokenKind::General, c);
                }
            }
        }
        self.tokens
    }

    /// `#{` up to the next `}#`; interior `#{` does not nest
    fn multiline_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.chars.len() {
            if self.chars[self.pos] == '}' && self.peek_next() == Some(COMMENT) {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Runs to the next unescaped backtick, whichever opener started it
    fn string(&mut self) {
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.advance() {
            match c {
                BACKTICK => break,
                BACKSLASH => {
                    text.push(c);
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                _ => text.push(c),
            }
        }
        let trailing = text.chars().rev().take_while(|&c| c == BACKSLASH).count();
        if trailing % 2 == 1 {
            text.push(BACKSLASH);
        }
        self.emit(TokenKind::String, text);
    }

    fn compressed_string(&mut self) {
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.advance() {
            if c == COMPRESSED_DELIMITER {
                break;
            }
            text.push(c);
        }
        self.emit(TokenKind::CompressedString, text);
    }

    fn digraph(&mut self) {
        let text: String = self.chars[self.pos..self.pos + 2].iter().collect();
        self.pos += 2;
        self.emit(TokenKind::General, text);
    }

    /// `\c`; a backslash with nothing after it is a plain token
    fn character(&mut self) {
        self.pos += 1;
        match self.advance() {
            Some(c) => self.emit(TokenKind::Character, c),
            None => self.emit(TokenKind::General, BACKSLASH),
        }
    }

    fn variable(&mut self, kind: TokenKind) {
        self.pos += 1;
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        self.emit(kind, name);
    }

    /// Digits with at most one decimal point
    fn number(&mut self) {
        let mut text = String::new();
        let mut seen_point = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
            } else if c == DECIMAL_POINT && !seen_point {
                seen_point = true;
                text.push(c);
            } else {
                break;
            }
            self.pos += 1;
        }
        if text.ends_with(DECIMAL_POINT) {
            text.push('5');
        }
        self.emit(TokenKind::Number, text);
    }
}
