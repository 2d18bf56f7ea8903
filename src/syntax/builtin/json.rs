//! JSON language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create JSON language definition (comments allowed, as in JSONC)
pub fn json_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("json");
    for alias in ["jsonc", "json5"] {
        lang.add_alias(alias);
    }
    for ext in ["json", "jsonc", "json5"] {
        lang.add_extension(ext);
    }

    lang.add_multiline(MultilineRule::new("block_comment", r"/\*", r"\*/", TokenKind::Comment, 1)?);

    lang.add_pattern(PatternRule::new("line_comment", r"//.*$", TokenKind::Comment, 100)?);
    lang.add_pattern(PatternRule::new("string", r#""(?:[^"\\]|\\.)*"?"#, TokenKind::String, 90)?);
    lang.add_pattern(PatternRule::new("constant", r"\b(true|false|null)\b", TokenKind::Constant, 80)?);
    lang.add_pattern(PatternRule::new("number", r"-?\b\d[\d.eE+-]*", TokenKind::Number, 60)?);
    lang.add_pattern(PatternRule::new("punctuation", r"[\[\]{}:,]", TokenKind::Punctuation, 30)?);

    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::LineState;

    #[test]
    fn test_json_brackets_in_keys() {
        let lang = json_language().unwrap();
        let result = lang
            .tokenize_line(0, r#"{"a}": [1]}"#, LineState::default())
            .unwrap();
        let kinds: Vec<TokenKind> = result.spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Punctuation,
                TokenKind::String,
                TokenKind::Punctuation,
                TokenKind::None,
                TokenKind::Punctuation,
                TokenKind::Number,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
            ]
        );
    }
}
