//! Bracket registry
//!
//! Holds the configured bracket pairs and the compiled pattern used to
//! find them. A registry is built once per configuration and shared
//! read-only by every matching operation until the next rebuild.

use std::collections::HashMap;

use log::warn;
use regex::Regex;

use crate::config::PairConfig;
use crate::error::ConfigError;

/// Index of a pair inside its registry, in configuration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub usize);

/// Which side of its pair a token sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Open,
    Close,
}

impl Side {
    /// The other side of the pair
    pub fn flip(self) -> Self {
        match self {
            Side::Open => Side::Close,
            Side::Close => Side::Open,
        }
    }
}

/// One accepted bracket pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketDefinition {
    /// Opening token
    pub open: String,
    /// Closing token
    pub close: String,
    /// Position of this pair in the registry
    pub pair_id: PairId,
    /// Whether token classification may filter this pair
    pub parse_enabled: bool,
    /// Style identifier handed to the highlighter (None = global style)
    pub style: Option<String>,
}

impl BracketDefinition {
    /// Token for the given side
    pub fn token(&self, side: Side) -> &str {
        match side {
            Side::Open => &self.open,
            Side::Close => &self.close,
        }
    }
}

/// A registered token together with the pair it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket<'a> {
    pub definition: &'a BracketDefinition,
    pub side: Side,
}

impl<'a> Bracket<'a> {
    /// The token itself
    pub fn token(&self) -> &'a str {
        self.definition.token(self.side)
    }

    /// The complementary token
    pub fn opposite(&self) -> &'a str {
        self.definition.token(self.side.flip())
    }

    pub fn is_open(&self) -> bool {
        self.side == Side::Open
    }
}

/// Compiled alternation of every registered token.
///
/// Tokens are sorted longest first so a token always wins over any
/// shorter token that is a prefix of it; equal lengths keep
/// configuration order.
#[derive(Debug, Clone, Default)]
pub struct BracketPattern {
    regex: Option<Regex>,
}

impl BracketPattern {
    fn compile(tokens: &[&str]) -> Self {
        if tokens.is_empty() {
            return Self { regex: None };
        }
        let mut sorted: Vec<&str> = tokens.to_vec();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = sorted
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        match Regex::new(&alternation) {
            Ok(regex) => Self { regex: Some(regex) },
            Err(err) => {
                warn!("bracket pattern failed to compile: {}", err);
                Self { regex: None }
            }
        }
    }

    /// Iterate over non-overlapping token occurrences as (byte start, token)
    pub fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, &'t str)> + 't {
        self.regex
            .iter()
            .flat_map(move |regex| regex.find_iter(text))
            .map(|m| (m.start(), m.as_str()))
    }

    /// Whether no token can ever match
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// The underlying regular expression source, if any
    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(|r| r.as_str())
    }
}

/// The set of configured bracket pairs and its derived lookups
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<BracketDefinition>,
    tokens: HashMap<String, (PairId, Side)>,
    pattern: BracketPattern,
    rejected: Vec<ConfigError>,
}

impl Registry {
    /// Build a registry from pair definitions.
    ///
    /// Malformed or colliding pairs are dropped with a warning and kept in
    /// `rejected()`; the remaining pairs are registered in order.
    pub fn build(pairs: &[PairConfig]) -> Self {
        let mut registry = Registry::default();

        for pair in pairs {
            if let Err(err) = registry.register(pair) {
                warn!("{}", err);
                registry.rejected.push(err);
            }
        }

        let tokens: Vec<&str> = registry
            .definitions
            .iter()
            .flat_map(|d| [d.open.as_str(), d.close.as_str()])
            .collect();
        registry.pattern = BracketPattern::compile(&tokens);
        registry
    }

    fn register(&mut self, pair: &PairConfig) -> Result<(), ConfigError> {
        let label = pair.label();
        if pair.open.is_empty() || pair.close.is_empty() {
            return Err(ConfigError::MissingToken { pair: label });
        }
        if pair.open == pair.close {
            return Err(ConfigError::IdenticalTokens { pair: label });
        }
        for token in [&pair.open, &pair.close] {
            if self.tokens.contains_key(token.as_str()) {
                return Err(ConfigError::Collision {
                    token: token.clone(),
                    pair: label,
                });
            }
        }

        let pair_id = PairId(self.definitions.len());
        self.tokens.insert(pair.open.clone(), (pair_id, Side::Open));
        self.tokens.insert(pair.close.clone(), (pair_id, Side::Close));
        self.definitions.push(BracketDefinition {
            open: pair.open.clone(),
            close: pair.close.clone(),
            pair_id,
            parse_enabled: pair.parse.unwrap_or(true),
            style: pair.style.clone(),
        });
        Ok(())
    }

    /// Look up a token
    pub fn lookup(&self, token: &str) -> Option<Bracket<'_>> {
        let (pair_id, side) = *self.tokens.get(token)?;
        let definition = self.definitions.get(pair_id.0)?;
        Some(Bracket { definition, side })
    }

    /// Definition for a pair id
    pub fn definition(&self, pair_id: PairId) -> Option<&BracketDefinition> {
        self.definitions.get(pair_id.0)
    }

    /// All accepted definitions, in configuration order
    pub fn definitions(&self) -> &[BracketDefinition] {
        &self.definitions
    }

    /// Pattern finding the longest applicable token at any position
    pub fn pattern(&self) -> &BracketPattern {
        &self.pattern
    }

    /// Definitions dropped while building
    pub fn rejected(&self) -> &[ConfigError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
