//! Markdown language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create Markdown language definition
pub fn markdown_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("markdown");
    for ext in ["md", "markdown", "mkd"] {
        lang.add_extension(ext);
    }

    // Fenced code blocks and HTML comments
    lang.add_multiline(MultilineRule::new("code_block", r"^\s*```", r"^\s*```", TokenKind::String, 1)?);
    lang.add_multiline(MultilineRule::new("html_comment", r"<!--", r"-->", TokenKind::Comment, 2)?);

    lang.add_pattern(PatternRule::new("inline_code", r"`[^`]+`", TokenKind::String, 88)?);
    lang.add_pattern(PatternRule::new("header", r"^#{1,6}\s", TokenKind::Keyword, 80)?);
    lang.add_pattern(PatternRule::new("punctuation", r"[()\[\]{}<>]", TokenKind::Punctuation, 30)?);

    Ok(lang)
}
