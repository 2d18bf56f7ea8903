//! pairscan - cursor-adjacent bracket pair resolution
//!
//! Finds the complement of the bracket touching a caret, skipping
//! brackets that a language-aware tokenizer places inside strings and
//! comments. Indices are zero-based; columns count characters.

pub mod adjacency;
pub mod config;
pub mod deadline;
pub mod document;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod syntax;

pub use adjacency::{find_adjacent, Adjacent, Direction};
pub use config::{Config, PairConfig};
pub use deadline::Deadline;
pub use document::{Document, TextDocument};
pub use engine::{Engine, Highlight, Position, Selection, Span};
pub use error::{ConfigError, Error, Result, SyntaxError};
pub use matcher::{find_all, LineMatch, Match};
pub use registry::{Bracket, BracketDefinition, BracketPattern, PairId, Registry, Side};
pub use resolver::{resolve, PairMatch, Termination};
pub use session::Session;
