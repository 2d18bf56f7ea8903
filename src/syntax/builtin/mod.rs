//! Built-in language definitions
//!
//! This module provides tokenizer definitions for common languages.
//! The rules aim at telling literals and comments apart from code;
//! everything else may stay unlabelled.

mod rust;
mod c;
mod python;
mod toml_lang;
mod markdown;
mod javascript;
mod json;
mod markup;

use super::language::LanguageDefinition;
use crate::error::SyntaxError;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<Result<LanguageDefinition, SyntaxError>> {
    vec![
        rust::rust_language(),
        c::c_language(),
        python::python_language(),
        toml_lang::toml_language(),
        markdown::markdown_language(),
        javascript::javascript_language(),
        json::json_language(),
        markup::markup_language(),
    ]
}
