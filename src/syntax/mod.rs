//! Syntax module
//!
//! This module provides the language-aware tokenizer used to tell
//! brackets in code apart from brackets inside strings and comments:
//! - Regex line tokenizer with multi-line state
//! - Built-in grammars and host identifier mapping
//! - Per-document bracket classification

mod builtin;
mod classifier;
mod grammars;
mod language;
mod rules;
mod tokens;

pub use classifier::{
    classify, structural_kinds, ClassifiedDocument, ClassifiedToken, Classification,
    ClassifierSettings, Unavailable,
};
pub use grammars::GrammarSet;
pub use language::{LanguageDefinition, LineTokens, TokenSpan};
pub use rules::{LineState, MultilineRule, PatternRule};
pub use tokens::TokenKind;
