//! C/C++ language definition

use crate::error::SyntaxError;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{MultilineRule, PatternRule};
use crate::syntax::tokens::TokenKind;

/// Create C language definition (also works for C++)
pub fn c_language() -> Result<LanguageDefinition, SyntaxError> {
    let mut lang = LanguageDefinition::new("c");
    lang.add_alias("cpp");
    lang.add_alias("objective-c");
    for ext in ["c", "h", "cpp", "hpp", "cc", "cxx"] {
        lang.add_extension(ext);
    }

    // Multiline rules
    lang.add_multiline(MultilineRule::new("block_comment", r"/\*", r"\*/", TokenKind::Comment, 1)?);
    // Strings (with escape support, continued lines end in a backslash)
    lang.add_multiline(MultilineRule::with_escape("string", r#"""#, r#"""#, TokenKind::String, 2, '\\')?);

    // Single-line patterns
    lang.add_pattern(PatternRule::new("line_comment", r"//.*$", TokenKind::Comment, 100)?);
    // `#include <stdio.h>` keeps its angle brackets out of matching
    lang.add_pattern(PatternRule::new("include", r"^\s*#\s*include\s*<[^>]*>", TokenKind::Preprocessor, 96)?);
    lang.add_pattern(PatternRule::new("preprocessor", r"^\s*#\s*\w+", TokenKind::Preprocessor, 95)?);
    lang.add_pattern(PatternRule::new("char", r"'(?:[^'\\]|\\.)*'", TokenKind::Char, 90)?);

    let keywords = r"\b(auto|break|case|char|class|const|continue|default|delete|do|double|else|enum|extern|float|for|goto|if|inline|int|long|namespace|new|private|protected|public|return|short|signed|sizeof|static|struct|switch|template|this|typedef|typename|union|unsigned|using|virtual|void|volatile|while)\b";
    lang.add_pattern(PatternRule::new("keyword", keywords, TokenKind::Keyword, 80)?);
    lang.add_pattern(PatternRule::new("number", r"\b\d[\w.]*", TokenKind::Number, 60)?);

    lang.add_pattern(PatternRule::new("punctuation", r"[()\[\]{};,.:]", TokenKind::Punctuation, 30)?);
    lang.add_pattern(PatternRule::new("operator", r"[+\-*/%&|^!<>=~?]+", TokenKind::Operator, 20)?);

    Ok(lang)
}
