//! Error types for pairscan

use thiserror::Error;

/// Result type alias for pairscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Message(String),
}

/// A malformed bracket pair definition.
///
/// Only the offending pair is dropped; the rest of the configuration
/// stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Each bracket pair must have an \"open\" and \"close\" token; pair {pair:?} will be ignored")]
    MissingToken { pair: String },

    #[error("Opening and closing tokens must differ; pair {pair:?} will be ignored")]
    IdenticalTokens { pair: String },

    #[error("{token:?} appears in several bracket pair definitions; pair {pair:?} will be ignored")]
    Collision { token: String, pair: String },

    #[error("Complex bracket pair {pair:?} is not divided by {separator:?}")]
    MissingSeparator { pair: String, separator: String },
}

/// A grammar that cannot be built or a tokenizer that failed.
///
/// Never reaches the host: classification downgrades it to
/// "unavailable" and matching carries on unfiltered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Invalid pattern in rule {rule:?}: {message}")]
    InvalidRule { rule: String, message: String },

    #[error("Unknown multiline state {0}")]
    UnknownState(u8),

    #[error("Tokenizer panicked: {0}")]
    Panicked(String),
}
