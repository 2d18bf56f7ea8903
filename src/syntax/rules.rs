//! Pattern rules for tokenization
//!
//! This module defines the rule types used to split source lines into
//! labelled spans.

use regex::Regex;

use super::tokens::TokenKind;
use crate::error::SyntaxError;

fn compile(rule: &str, pattern: &str) -> Result<Regex, SyntaxError> {
    Regex::new(pattern).map_err(|err| SyntaxError::InvalidRule {
        rule: rule.to_string(),
        message: err.to_string(),
    })
}

/// A single-line pattern rule
///
/// Matches a regex pattern and assigns a token kind to the match.
/// When two rules match at the same position the higher priority wins.
#[derive(Debug)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token kind to assign to matches
    pub kind: TokenKind,
    /// Priority (higher = matched first)
    pub priority: i32,
}

impl PatternRule {
    /// Create a new pattern rule
    pub fn new(name: &str, pattern: &str, kind: TokenKind, priority: i32) -> Result<Self, SyntaxError> {
        Ok(Self {
            name: name.to_string(),
            pattern: compile(name, pattern)?,
            kind,
            priority,
        })
    }

    /// Find the first non-empty match at or after `start`.
    ///
    /// Anchors still refer to the whole line.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        find_non_empty(&self.pattern, text, start)
    }
}

/// Leftmost non-empty match at or after `start`
fn find_non_empty(regex: &Regex, text: &str, start: usize) -> Option<(usize, usize)> {
    let mut pos = start;
    while pos < text.len() {
        let m = regex.find_at(text, pos)?;
        if m.end() > m.start() {
            return Some((m.start(), m.end()));
        }
        // Empty match: step over one character and retry
        pos = text[m.start()..]
            .chars()
            .next()
            .map_or(text.len(), |c| m.start() + c.len_utf8());
    }
    None
}

/// A multi-line construct rule (block comments, strings)
///
/// These rules track state across lines for constructs that
/// can span multiple lines.
#[derive(Debug)]
pub struct MultilineRule {
    /// Name for debugging
    pub name: String,
    /// Pattern that starts the construct
    pub start: Regex,
    /// Pattern that ends the construct
    pub end: Regex,
    /// Token kind for this construct
    pub kind: TokenKind,
    /// Escape character (usually backslash)
    pub escape_char: Option<char>,
    /// Unique ID for this multiline state (1-255, 0 = normal)
    pub state_id: u8,
}

impl MultilineRule {
    /// Create a new multiline rule
    pub fn new(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        kind: TokenKind,
        state_id: u8,
    ) -> Result<Self, SyntaxError> {
        Ok(Self {
            name: name.to_string(),
            start: compile(name, start_pattern)?,
            end: compile(name, end_pattern)?,
            kind,
            escape_char: None,
            state_id,
        })
    }

    /// Create a multiline rule with escape support
    pub fn with_escape(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        kind: TokenKind,
        state_id: u8,
        escape_char: char,
    ) -> Result<Self, SyntaxError> {
        let mut rule = Self::new(name, start_pattern, end_pattern, kind, state_id)?;
        rule.escape_char = Some(escape_char);
        Ok(rule)
    }

    /// Find start of this construct in text
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        find_non_empty(&self.start, text, start)
    }

    /// Find end of this construct in text, respecting escapes
    pub fn find_end(&self, text: &str, start: usize) -> Option<usize> {
        if start >= text.len() {
            return None;
        }

        let Some(escape) = self.escape_char else {
            return self.end.find_at(text, start).map(|m| m.end());
        };

        let mut pos = start;
        while let Some(m) = self.end.find_at(text, pos) {
            let escapes = text[start..m.start()]
                .chars()
                .rev()
                .take_while(|&c| c == escape)
                .count();
            if escapes % 2 == 0 {
                return Some(m.end());
            }
            // Odd number of escapes = escaped
            pos = m.end().max(m.start() + 1);
            if pos >= text.len() {
                break;
            }
        }
        None
    }
}

/// Line state for tracking multi-line constructs
///
/// Carried from one line to the next to track whether we're inside a
/// multi-line comment, string, etc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    /// 0 = normal, non-zero = inside multiline rule with this ID
    pub multiline_id: u8,
}

impl LineState {
    /// Create state for being inside a multiline construct
    pub fn inside(state_id: u8) -> Self {
        Self { multiline_id: state_id }
    }

    /// Check if we're inside a multiline construct
    pub fn is_inside_multiline(&self) -> bool {
        self.multiline_id != 0
    }

    /// Check if we're in normal (no multiline) state
    pub fn is_normal(&self) -> bool {
        self.multiline_id == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_rule() {
        let rule = PatternRule::new("number", r"\d+", TokenKind::Number, 50).unwrap();
        assert_eq!(rule.find_at("abc 123 def", 0), Some((4, 7)));
        assert_eq!(rule.find_at("abc 123 def", 5), Some((5, 7)));
        assert_eq!(rule.find_at("no numbers", 0), None);
    }

    #[test]
    fn test_pattern_rule_keeps_line_anchors() {
        let rule = PatternRule::new("directive", r"^#\w+", TokenKind::Preprocessor, 90).unwrap();
        assert_eq!(rule.find_at("#include", 0), Some((0, 8)));
        assert_eq!(rule.find_at("x #include", 2), None);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PatternRule::new("broken", r"(", TokenKind::Punctuation, 1).unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidRule { ref rule, .. } if rule == "broken"));
    }

    #[test]
    fn test_multiline_rule() {
        let rule = MultilineRule::new(
            "block_comment",
            r"/\*",
            r"\*/",
            TokenKind::Comment,
            1,
        ).unwrap();

        assert_eq!(rule.find_start("/* comment */", 0), Some((0, 2)));
        assert_eq!(rule.find_end("/* comment */", 2), Some(13));
    }

    #[test]
    fn test_multiline_with_escape() {
        let rule = MultilineRule::with_escape(
            "string",
            r#"""#,
            r#"""#,
            TokenKind::String,
            2,
            '\\',
        ).unwrap();

        // Regular end
        assert_eq!(rule.find_end(r#"hello""#, 0), Some(6));
        // Escaped quote
        assert_eq!(rule.find_end(r#"hello\"world""#, 0), Some(13));
        // Escaped backslash does not escape the quote
        assert_eq!(rule.find_end(r#"a\\" b"#, 0), Some(4));
        // Only escaped quotes
        assert_eq!(rule.find_end(r#"a\""#, 0), None);
    }

    #[test]
    fn test_line_state() {
        let normal = LineState::default();
        assert!(normal.is_normal());
        assert!(!normal.is_inside_multiline());

        let inside = LineState::inside(1);
        assert!(!inside.is_normal());
        assert!(inside.is_inside_multiline());
    }
}
