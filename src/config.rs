//! Configuration file support
//!
//! Loads settings from ~/.pairscan.toml (or %USERPROFILE%\.pairscan.toml on Windows)
//!
//! Example:
//! ```text
//! # pairscan configuration
//! parse = true
//! max-classify-lines = 5000
//! max-classify-bytes = 1048576
//! timeout-ms = 3000
//! bracket-pairs = ["()", "[]", "{}"]
//!
//! [[pairs]]
//! open = "<!--"
//! close = "-->"
//! parse = false
//! style = "comment"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// One bracket pair as written in the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PairConfig {
    /// Opening token (may be several characters)
    pub open: String,
    /// Closing token (may be several characters)
    pub close: String,
    /// Allow classification to filter this pair (defaults to true)
    pub parse: Option<bool>,
    /// Style identifier for the highlighter
    pub style: Option<String>,
}

impl PairConfig {
    /// Create a pair with default options
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            ..Default::default()
        }
    }

    /// Human-readable name used in warnings
    pub fn label(&self) -> String {
        if self.open.chars().count() == 1 && self.close.chars().count() == 1 {
            format!("{}{}", self.open, self.close)
        } else {
            format!("{} {}", self.open, self.close)
        }
    }

    /// Parse the compact form: "()" or "<!-- -->".
    ///
    /// Two-character entries split into their characters; longer entries
    /// split on the first separator, the rest being the close token.
    pub fn parse_compact(entry: &str, separator: &str) -> std::result::Result<Self, ConfigError> {
        let chars: Vec<char> = entry.chars().collect();
        if chars.len() < 2 {
            return Err(ConfigError::MissingToken { pair: entry.to_string() });
        }
        if chars.len() == 2 {
            return Ok(Self::new(&chars[0].to_string(), &chars[1].to_string()));
        }
        match entry.split_once(separator) {
            Some((open, close)) if !separator.is_empty() => Ok(Self::new(open, close)),
            _ => Err(ConfigError::MissingSeparator {
                pair: entry.to_string(),
                separator: separator.to_string(),
            }),
        }
    }
}

/// Raw file layout; merged into `Config` after parsing
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct ConfigFile {
    parse: Option<bool>,
    max_classify_lines: Option<usize>,
    max_classify_bytes: Option<usize>,
    timeout_ms: Option<u64>,
    pair_separator: Option<String>,
    bracket_pairs: Option<Vec<String>>,
    pairs: Option<Vec<PairConfig>>,
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bracket pairs, in priority order
    pub pairs: Vec<PairConfig>,
    /// Whether token classification is enabled at all
    pub parse: bool,
    /// Documents with more lines than this skip classification
    pub max_classify_lines: usize,
    /// Documents larger than this many bytes skip classification
    pub max_classify_bytes: usize,
    /// Scan budget for one resolution, in milliseconds
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pairs: vec![
                PairConfig::new("(", ")"),
                PairConfig::new("[", "]"),
                PairConfig::new("{", "}"),
            ],
            parse: true,
            max_classify_lines: 5000,
            max_classify_bytes: 1 << 20,
            timeout_ms: 3000,
        }
    }
}

impl Config {
    /// Default separator for compact multi-character pairs
    pub const PAIR_SEPARATOR: &'static str = " ";

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".pairscan.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".pairscan.toml"))
        }
    }

    /// Load the user configuration, falling back to defaults when absent
    pub fn load_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    ///
    /// Compact entries that cannot be split are dropped with a warning.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(file);
        Ok(config)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(parse) = file.parse {
            self.parse = parse;
        }
        if let Some(n) = file.max_classify_lines {
            self.max_classify_lines = n;
        }
        if let Some(n) = file.max_classify_bytes {
            self.max_classify_bytes = n;
        }
        if let Some(ms) = file.timeout_ms {
            self.timeout_ms = ms.max(1);
        }

        if file.bracket_pairs.is_some() || file.pairs.is_some() {
            let separator = file
                .pair_separator
                .unwrap_or_else(|| Self::PAIR_SEPARATOR.to_string());
            let mut pairs = Vec::new();
            for entry in file.bracket_pairs.unwrap_or_default() {
                match PairConfig::parse_compact(&entry, &separator) {
                    Ok(pair) => pairs.push(pair),
                    Err(err) => warn!("{}", err),
                }
            }
            pairs.extend(file.pairs.unwrap_or_default());
            self.pairs = pairs;
        }
    }

    /// Scan budget as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
