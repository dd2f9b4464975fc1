//! Token model produced by the lexer

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Number,
    String,
    CompressedString,
    Character,
    VariableSet,
    VariableGet,
    General,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::CompressedString => "COMPRESSED_STRING",
            TokenKind::Character => "CHARACTER",
            TokenKind::VariableSet => "VARIABLE_SET",
            TokenKind::VariableGet => "VARIABLE_GET",
            TokenKind::General => "GENERAL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lexed token
///
/// `text` is the decoded payload: delimiters are stripped from strings and
/// characters, variable tokens carry the identifier alone, and general
/// tokens carry exactly the source characters they consumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.text)
    }
}
