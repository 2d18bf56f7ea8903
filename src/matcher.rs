//! Line matcher
//!
//! Finds bracket token occurrences on a single line. Offsets are
//! character offsets, not byte offsets.

use crate::registry::BracketPattern;

/// A bracket token located on a line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    /// The matched token
    pub token: String,
    /// Character offset where the token starts
    pub index: usize,
}

impl Match {
    pub fn new(token: &str, index: usize) -> Self {
        Self {
            token: token.to_string(),
            index,
        }
    }

    /// Length of the token in characters
    pub fn len(&self) -> usize {
        self.token.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// Character offset just past the token
    pub fn end(&self) -> usize {
        self.index + self.len()
    }

    /// Attach a line number
    pub fn at_line(self, line: usize) -> LineMatch {
        LineMatch {
            line,
            token: self.token,
            index: self.index,
        }
    }
}

/// A bracket token located in a document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineMatch {
    /// Zero-based line number
    pub line: usize,
    /// The matched token
    pub token: String,
    /// Character offset where the token starts
    pub index: usize,
}

impl LineMatch {
    pub fn new(line: usize, token: &str, index: usize) -> Self {
        Match::new(token, index).at_line(line)
    }

    /// Character offset just past the token
    pub fn end(&self) -> usize {
        self.index + self.token.chars().count()
    }

    /// Drop the line number
    pub fn to_match(&self) -> Match {
        Match::new(&self.token, self.index)
    }
}

/// Find all bracket occurrences on a line.
///
/// `start_at` is inclusive and `end_at` exclusive, both in characters.
/// Every call scans from the start of the line; nothing is carried
/// between calls.
pub fn find_all<'t>(
    text: &'t str,
    pattern: &'t BracketPattern,
    start_at: Option<usize>,
    end_at: Option<usize>,
) -> impl Iterator<Item = Match> + 't {
    let mut byte_pos = 0;
    let mut char_pos = 0;
    pattern
        .find_iter(text)
        .map(move |(start, token)| {
            char_pos += text[byte_pos..start].chars().count();
            byte_pos = start;
            Match::new(token, char_pos)
        })
        .skip_while(move |m| start_at.map_or(false, |s| m.index < s))
        .take_while(move |m| end_at.map_or(true, |e| m.index < e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PairConfig;
    use crate::registry::Registry;

    fn registry() -> Registry {
        Registry::build(&[
            PairConfig::new("(", ")"),
            PairConfig::new("{", "}"),
            PairConfig::new("<!--", "-->"),
        ])
    }

    fn indices(matches: impl Iterator<Item = Match>) -> Vec<usize> {
        matches.map(|m| m.index).collect()
    }

    #[test]
    fn test_find_all() {
        let registry = registry();
        let found: Vec<Match> = find_all("f(a, {b})", registry.pattern(), None, None).collect();
        assert_eq!(
            found,
            vec![
                Match::new("(", 1),
                Match::new("{", 5),
                Match::new("}", 7),
                Match::new(")", 8),
            ]
        );
    }

    #[test]
    fn test_bounds() {
        let registry = registry();
        let pattern = registry.pattern();
        assert_eq!(indices(find_all("(a(b)c)", pattern, Some(2), None)), vec![2, 4, 6]);
        assert_eq!(indices(find_all("(a(b)c)", pattern, None, Some(4))), vec![0, 2]);
        assert_eq!(indices(find_all("(a(b)c)", pattern, Some(1), Some(5))), vec![2, 4]);
        assert_eq!(indices(find_all("(a(b)c)", pattern, None, Some(0))), Vec::<usize>::new());
    }

    #[test]
    fn test_character_offsets() {
        let registry = registry();
        // "é" and "→" are multi-byte
        let found: Vec<Match> = find_all("é(→)", registry.pattern(), None, None).collect();
        assert_eq!(found, vec![Match::new("(", 1), Match::new(")", 3)]);
    }

    #[test]
    fn test_multi_character_tokens() {
        let registry = registry();
        let found: Vec<Match> = find_all("x <!-- y --> z", registry.pattern(), None, None).collect();
        assert_eq!(found, vec![Match::new("<!--", 2), Match::new("-->", 9)]);
        assert_eq!(found[1].end(), 12);
    }

    #[test]
    fn test_restartable() {
        let registry = registry();
        let first: Vec<Match> = find_all("{()}", registry.pattern(), None, None).collect();
        let second: Vec<Match> = find_all("{()}", registry.pattern(), None, None).collect();
        assert_eq!(first, second);
    }
}
