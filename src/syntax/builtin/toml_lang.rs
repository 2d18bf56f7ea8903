//! TOML language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create TOML language definition
pub fn toml_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("toml");
    lang.add_extension("toml");

    // Multi-line strings
    lang.add_multiline(MultilineRule::with_escape("ml_basic", r#"""""#, r#"""""#, TokenKind::String, 1, '\\')?);
    lang.add_multiline(MultilineRule::new("ml_literal", r"'''", r"'''", TokenKind::String, 2)?);

    lang.add_pattern(PatternRule::new("comment", r"#.*$", TokenKind::Comment, 100)?);
    lang.add_pattern(PatternRule::new("basic_string", r#""(?:[^"\\]|\\.)*"?"#, TokenKind::String, 90)?);
    lang.add_pattern(PatternRule::new("literal_string", r"'[^']*'?", TokenKind::String, 90)?);
    lang.add_pattern(PatternRule::new("constant", r"\b(true|false)\b", TokenKind::Constant, 80)?);
    lang.add_pattern(PatternRule::new("number", r"[+-]?\b\d[\d_.:eE+-]*", TokenKind::Number, 60)?);
    lang.add_pattern(PatternRule::new("punctuation", r"[\[\]{}.,=]", TokenKind::Punctuation, 30)?);

    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::LineState;

    #[test]
    fn test_toml_table_header() {
        let lang = toml_language().unwrap();
        let result = lang.tokenize_line(0, "[[bin]] # [x]", LineState::default()).unwrap();
        let punctuation = result
            .spans
            .iter()
            .filter(|s| s.kind == TokenKind::Punctuation)
            .count();
        assert_eq!(punctuation, 4);
        assert_eq!(result.spans.last().map(|s| s.kind), Some(TokenKind::Comment));
    }
}
