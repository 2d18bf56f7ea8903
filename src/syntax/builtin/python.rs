//! Python language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create Python language definition
pub fn python_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("python");
    for ext in ["py", "pyw", "pyi"] {
        lang.add_extension(ext);
    }

    // Multiline rules
    // Triple-quoted strings (docstrings)
    lang.add_multiline(MultilineRule::new("triple_double", r#"[rRbBuUfF]{0,2}""""#, r#"""""#, TokenKind::String, 1)?);
    lang.add_multiline(MultilineRule::new("triple_single", r"[rRbBuUfF]{0,2}'''", r"'''", TokenKind::String, 2)?);

    // Single-line patterns
    lang.add_pattern(PatternRule::new("comment", r"#.*$", TokenKind::Comment, 100)?);
    lang.add_pattern(PatternRule::new("double_string", r#"[rRbBuUfF]{0,2}"(?:[^"\\]|\\.)*"?"#, TokenKind::String, 90)?);
    lang.add_pattern(PatternRule::new("single_string", r"[rRbBuUfF]{0,2}'(?:[^'\\]|\\.)*'?", TokenKind::String, 90)?);
    lang.add_pattern(PatternRule::new("decorator", r"@[\w.]+", TokenKind::Macro, 85)?);

    let keywords = r"\b(and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b";
    lang.add_pattern(PatternRule::new("keyword", keywords, TokenKind::Keyword, 80)?);
    lang.add_pattern(PatternRule::new("constant", r"\b(True|False|None)\b", TokenKind::Constant, 79)?);
    lang.add_pattern(PatternRule::new("number", r"\b\d[\w.]*", TokenKind::Number, 60)?);

    lang.add_pattern(PatternRule::new("punctuation", r"[()\[\]{};,.:]", TokenKind::Punctuation, 30)?);
    lang.add_pattern(PatternRule::new("operator", r"[+\-*/%&|^!<>=~]+", TokenKind::Operator, 20)?);

    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_docstring_spans_lines() {
        let lang = python_language().unwrap();
        let spans = lang.tokenize("def f():\n    \"\"\"(\n    \"\"\"\n    return [1]").unwrap();

        let strings: Vec<usize> = spans
            .iter()
            .filter(|s| s.kind == TokenKind::String)
            .map(|s| s.line)
            .collect();
        assert_eq!(strings, vec![1, 2]);

        let brackets = spans
            .iter()
            .filter(|s| s.line == 3 && s.kind == TokenKind::Punctuation)
            .count();
        assert_eq!(brackets, 2);
    }

    #[test]
    fn test_python_prefixed_string() {
        let lang = python_language().unwrap();
        let spans = lang.tokenize("print(f'{x}')").unwrap();
        let string = spans.iter().find(|s| s.kind == TokenKind::String).unwrap();
        assert_eq!((string.start, string.end), (6, 12));
    }
}
