//! Grammar set
//!
//! This module provides the GrammarSet that maps host language
//! identifiers and file extensions to language definitions.

use std::collections::HashMap;
use std::path::Path;

use log::warn;

use super::builtin;
use super::language::LanguageDefinition;

/// Loaded language definitions and their lookup tables
#[derive(Debug, Default)]
pub struct GrammarSet {
    /// Language definitions by grammar name
    languages: HashMap<String, LanguageDefinition>,
    /// Host language identifier to grammar name
    alias_map: HashMap<String, String>,
    /// Extension to grammar name mapping
    extension_map: HashMap<String, String>,
}

impl GrammarSet {
    /// Create an empty grammar set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grammar set with the built-in languages.
    ///
    /// A built-in grammar that fails to build is skipped with a warning;
    /// documents in that language are then matched unfiltered.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        for result in builtin::all_languages() {
            match result {
                Ok(lang) => set.add_language(lang),
                Err(err) => warn!("built-in grammar skipped: {}", err),
            }
        }
        set
    }

    /// Add a language definition
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let name = lang.name.clone();
        self.alias_map.insert(name.to_lowercase(), name.clone());
        for alias in &lang.aliases {
            self.alias_map.insert(alias.to_lowercase(), name.clone());
        }
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.languages.insert(name, lang);
    }

    /// Grammar name for a host language identifier
    pub fn grammar_name(&self, language_id: &str) -> Option<&str> {
        self.alias_map
            .get(&language_id.to_lowercase())
            .map(|s| s.as_str())
    }

    /// Language definition for a host language identifier
    pub fn resolve(&self, language_id: &str) -> Option<&LanguageDefinition> {
        let name = self.grammar_name(language_id)?;
        self.languages.get(name)
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// List available grammars
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}
