//! Lexer configuration
//!
//! The digraph table and the alternate string opener are the only parts of
//! the lexer that vary. They can be built in code or loaded from TOML:
//!
//! ```toml
//! digraph_prefixes = ["k", "∆", "ø", "Þ", "¨"]
//! alt_string_opener = "‛"
//! ```
//!
//! Omitted keys keep their defaults.
//!
//! # Example
//!
//! ```rust,ignore
//! use tersec::{LexerConfig, tokenise_with_config};
//!
//! let config = LexerConfig::new().with_digraph_prefix('λ');
//! let tokens = tokenise_with_config("λx", &config);
//! ```

use serde::Deserialize;
use std::path::Path;

const DEFAULT_DIGRAPH_PREFIXES: [char; 5] = ['k', '∆', 'ø', 'Þ', '¨'];
const DEFAULT_ALT_STRING_OPENER: char = '‛';

/// Glyphs with a fixed lexical meaning that cannot be reconfigured
const RESERVED: [char; 8] = ['`', '«', '\\', '→', '←', '#', '.', '_'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    digraph_prefixes: Vec<char>,
    alt_string_opener: char,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            digraph_prefixes: DEFAULT_DIGRAPH_PREFIXES.to_vec(),
            alt_string_opener: DEFAULT_ALT_STRING_OPENER,
        }
    }
}

/// On-disk shape, checked before it becomes a `LexerConfig`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    digraph_prefixes: Option<Vec<String>>,
    alt_string_opener: Option<String>,
}

impl LexerConfig {
    pub fn new() -> Self {
        LexerConfig::default()
    }

    /// Add one digraph prefix to the table
    pub fn with_digraph_prefix(mut self, prefix: char) -> Self {
        if !self.digraph_prefixes.contains(&prefix) {
            self.digraph_prefixes.push(prefix);
        }
        self
    }

    /// Replace the whole digraph table
    pub fn with_digraph_prefixes(mut self, prefixes: impl IntoIterator<Item = char>) -> Self {
        self.digraph_prefixes.clear();
        for prefix in prefixes {
            self = self.with_digraph_prefix(prefix);
        }
        self
    }

    pub fn with_alt_string_opener(mut self, opener: char) -> Self {
        self.alt_string_opener = opener;
        self
    }

    pub fn digraph_prefixes(&self) -> &[char] {
        &self.digraph_prefixes
    }

    pub fn is_digraph_prefix(&self, c: char) -> bool {
        self.digraph_prefixes.contains(&c)
    }

    pub fn alt_string_opener(&self) -> char {
        self.alt_string_opener
    }

    /// Parse a TOML document
    pub fn parse(content: &str) -> Result<Self, String> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| format!("Failed to parse lexer config: {}", e))?;

        let mut config = LexerConfig::default();
        if let Some(prefixes) = file.digraph_prefixes {
            let prefixes = prefixes
                .iter()
                .map(|p| single_char("digraph prefix", p))
                .collect::<Result<Vec<_>, _>>()?;
            config = config.with_digraph_prefixes(prefixes);
        }
        if let Some(opener) = file.alt_string_opener {
            config.alt_string_opener = single_char("alternate string opener", &opener)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = LexerConfig::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            prefixes = config.digraph_prefixes.len(),
            "loaded lexer config"
        );
        Ok(config)
    }

    /// Check that no configured glyph shadows a fixed lexical rule
    pub fn validate(&self) -> Result<(), String> {
        for &prefix in &self.digraph_prefixes {
            check_glyph("digraph prefix", prefix)?;
        }
        check_glyph("alternate string opener", self.alt_string_opener)?;
        if self.is_digraph_prefix(self.alt_string_opener) {
            return Err(format!(
                "'{}' cannot be both a digraph prefix and the alternate string opener",
                self.alt_string_opener
            ));
        }
        Ok(())
    }
}

fn single_char(what: &str, s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("{} must be a single character, got {:?}", what, s)),
    }
}

fn check_glyph(what: &str, c: char) -> Result<(), String> {
    if c.is_whitespace() || c.is_ascii_digit() || RESERVED.contains(&c) {
        return Err(format!("{} '{}' is reserved by the lexer", what, c));
    }
    Ok(())
}
