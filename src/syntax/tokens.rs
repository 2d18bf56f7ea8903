//! Token kinds
//!
//! Labels the tokenizer attaches to spans of source text. The names
//! follow the usual highlighter vocabulary ("punctuation", "string",
//! "comment", ...), with "none" for text no rule claimed.

/// Lexical category of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Comments (// or /* */)
    Comment,
    /// String literals ("..." or '...')
    String,
    /// Character literals
    Char,
    /// Numeric literals
    Number,
    /// Language keywords
    Keyword,
    /// Type names
    Type,
    /// Operators (+, -, *, /, etc.)
    Operator,
    /// Punctuation ((, ), ;, etc.)
    Punctuation,
    /// Punctuation opening or closing an interpolation inside a literal
    InterpolationPunctuation,
    /// Delimiters of embedded code blocks
    Delimiter,
    /// Preprocessor directives (#include, #define)
    Preprocessor,
    /// Macro invocations (println!)
    Macro,
    /// Constants and literals such as true/false
    Constant,
    /// Lifetime annotations ('a)
    Lifetime,
    /// Markup tag names
    Tag,
    /// Markup attribute names
    AttrName,
    /// Markup attribute values
    AttrValue,
    /// Text no rule claimed
    None,
}

impl TokenKind {
    /// Get the conventional name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Number => "number",
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::InterpolationPunctuation => "interpolation-punctuation",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Preprocessor => "preprocessor",
            TokenKind::Macro => "macro",
            TokenKind::Constant => "constant",
            TokenKind::Lifetime => "lifetime",
            TokenKind::Tag => "tag",
            TokenKind::AttrName => "attr-name",
            TokenKind::AttrValue => "attr-value",
            TokenKind::None => "none",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
