//! JavaScript/TypeScript language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create JavaScript language definition (also covers TypeScript and JSX)
pub fn javascript_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("javascript");
    for alias in ["typescript", "javascriptreact", "typescriptreact", "jsx", "tsx"] {
        lang.add_alias(alias);
    }
    for ext in ["js", "mjs", "cjs", "jsx", "ts", "tsx"] {
        lang.add_extension(ext);
    }

    lang.add_multiline(MultilineRule::new("block_comment", r"/\*", r"\*/", TokenKind::Comment, 1)?);
    // Template literals; interpolations stay inside the literal
    lang.add_multiline(MultilineRule::with_escape("template", "`", "`", TokenKind::String, 2, '\\')?);

    lang.add_pattern(PatternRule::new("line_comment", r"//.*$", TokenKind::Comment, 100)?);
    lang.add_pattern(PatternRule::new("double_string", r#""(?:[^"\\]|\\.)*"?"#, TokenKind::String, 90)?);
    lang.add_pattern(PatternRule::new("single_string", r"'(?:[^'\\]|\\.)*'?", TokenKind::String, 90)?);

    let keywords = r"\b(async|await|break|case|catch|class|const|continue|debugger|default|delete|do|else|export|extends|finally|for|from|function|if|import|in|instanceof|interface|let|new|of|return|static|super|switch|this|throw|try|type|typeof|var|void|while|with|yield)\b";
    lang.add_pattern(PatternRule::new("keyword", keywords, TokenKind::Keyword, 80)?);
    lang.add_pattern(PatternRule::new("constant", r"\b(true|false|null|undefined)\b", TokenKind::Constant, 79)?);
    lang.add_pattern(PatternRule::new("number", r"\b\d[\w.]*", TokenKind::Number, 60)?);

    lang.add_pattern(PatternRule::new("punctuation", r"[()\[\]{};,.:]", TokenKind::Punctuation, 30)?);
    lang.add_pattern(PatternRule::new("operator", r"[+\-*/%&|^!<>=~?]+", TokenKind::Operator, 20)?);

    Ok(lang)
}
