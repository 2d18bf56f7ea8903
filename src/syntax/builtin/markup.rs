//! Markup (HTML/XML) language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create markup language definition
pub fn markup_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("markup");
    for alias in ["html", "xml", "xhtml", "svg", "mathml", "vue", "xsl"] {
        lang.add_alias(alias);
    }
    for ext in ["html", "htm", "xhtml", "xml", "svg", "vue"] {
        lang.add_extension(ext);
    }

    lang.add_multiline(MultilineRule::new("comment", r"<!--", r"-->", TokenKind::Comment, 1)?);
    lang.add_multiline(MultilineRule::new("cdata", r"<!\[CDATA\[", r"\]\]>", TokenKind::String, 2)?);

    lang.add_pattern(PatternRule::new("doctype", r"<![A-Za-z][^>]*>", TokenKind::Preprocessor, 95)?);
    lang.add_pattern(PatternRule::new("tag_open", r"</?", TokenKind::Punctuation, 90)?);
    lang.add_pattern(PatternRule::new("tag_close", r"/?>", TokenKind::Punctuation, 90)?);
    // Quoted attributes are claimed whole, name included
    lang.add_pattern(PatternRule::new("attr_value", r#"[\w:.-]+\s*=\s*(?:"[^"]*"|'[^']*')"#, TokenKind::AttrValue, 85)?);
    lang.add_pattern(PatternRule::new("attr_name", r"[\w:.-]+\s*=", TokenKind::AttrName, 84)?);
    lang.add_pattern(PatternRule::new("entity", r"&#?\w+;", TokenKind::Constant, 70)?);

    Ok(lang)
}
