//! Terse front end: lexer and lexer configuration
//!
//! `tokenise` turns source text into a flat token stream. It is total: every
//! input produces some stream, so there is no error type here.

pub mod config;
pub mod lexer;
pub mod token;

pub use config::LexerConfig;
pub use lexer::{tokenise, tokenise_with_config};
pub use token::{Token, TokenKind};
