//! Rust language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create Rust language definition
pub fn rust_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("rust");
    lang.add_extension("rs");

    // Multiline rules (state IDs 1-10)
    // Block comments (nesting is not tracked)
    lang.add_multiline(MultilineRule::new("block_comment", r"/\*", r"\*/", TokenKind::Comment, 1)?);
    // Raw strings r#"..."# (one hash level)
    lang.add_multiline(MultilineRule::new("raw_string", r##"b?r#""##, r##""#"##, TokenKind::String, 2)?);
    lang.add_multiline(MultilineRule::new("raw_string_plain", r#"b?r""#, "\"", TokenKind::String, 3)?);
    // Regular and byte strings
    lang.add_multiline(MultilineRule::with_escape("string", "b?\"", "\"", TokenKind::String, 4, '\\')?);

    // Single-line patterns (priority 0-100, higher = first)
    lang.add_pattern(PatternRule::new("line_comment", r"//.*$", TokenKind::Comment, 100)?);

    // Character literals win over lifetimes at the same position
    lang.add_pattern(PatternRule::new("char", r"b?'(?:[^'\\]|\\.|\\u\{[0-9a-fA-F]+\})'", TokenKind::Char, 90)?);
    lang.add_pattern(PatternRule::new("lifetime", r"'\w+", TokenKind::Lifetime, 89)?);

    lang.add_pattern(PatternRule::new("macro", r"\b\w+!", TokenKind::Macro, 85)?);

    let keywords = r"\b(as|async|await|break|const|continue|crate|dyn|else|enum|extern|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|self|Self|static|struct|super|trait|type|union|unsafe|use|where|while)\b";
    lang.add_pattern(PatternRule::new("keyword", keywords, TokenKind::Keyword, 80)?);
    lang.add_pattern(PatternRule::new("constant", r"\b(true|false)\b", TokenKind::Constant, 79)?);
    lang.add_pattern(PatternRule::new("number", r"\b\d[\w.]*", TokenKind::Number, 60)?);

    lang.add_pattern(PatternRule::new("punctuation", r"[()\[\]{};,.:#]", TokenKind::Punctuation, 30)?);
    lang.add_pattern(PatternRule::new("operator", r"[+\-*/%&|^!<>=@?]+", TokenKind::Operator, 20)?);

    Ok(lang)
}
