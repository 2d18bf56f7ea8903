//! Language definitions for tokenization
//!
//! This module provides the LanguageDefinition struct that combines
//! pattern rules, multiline rules, and the identifiers a language is
//! known by.

use super::rules::{LineState, MultilineRule, PatternRule};
use super::tokens::TokenKind;
use crate::error::SyntaxError;

/// A labelled span of one line, in byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Zero-based line number
    pub line: usize,
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Kind assigned by the tokenizer
    pub kind: TokenKind,
}

impl TokenSpan {
    pub fn new(line: usize, start: usize, end: usize, kind: TokenKind) -> Self {
        Self { line, start, end, kind }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Result of tokenizing a single line
#[derive(Debug)]
pub struct LineTokens {
    /// Spans covering the whole line, in order
    pub spans: Vec<TokenSpan>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}

/// Collects spans for one line, filling gaps with `TokenKind::None`
struct SpanWriter {
    line: usize,
    covered: usize,
    spans: Vec<TokenSpan>,
}

impl SpanWriter {
    fn new(line: usize) -> Self {
        Self {
            line,
            covered: 0,
            spans: Vec::new(),
        }
    }

    fn push(&mut self, start: usize, end: usize, kind: TokenKind) {
        if start > self.covered {
            self.spans.push(TokenSpan::new(self.line, self.covered, start, TokenKind::None));
        }
        if end > start {
            self.spans.push(TokenSpan::new(self.line, start, end, kind));
        }
        self.covered = self.covered.max(end);
    }

    fn finish(mut self, len: usize, end_state: LineState) -> LineTokens {
        if len > self.covered {
            self.spans.push(TokenSpan::new(self.line, self.covered, len, TokenKind::None));
        }
        LineTokens {
            spans: self.spans,
            end_state,
        }
    }
}

/// Which rule claimed the earliest position on a line
enum Candidate<'a> {
    Multiline(&'a MultilineRule),
    Pattern(&'a PatternRule),
}

/// Cached result of one rule's search on the current line
#[derive(Debug, Clone, Copy)]
enum Cached {
    Unsearched,
    Found(usize, usize),
    Exhausted,
}

impl Cached {
    /// Reuse the cached match while it still lies at or after `pos`
    fn refresh(&mut self, pos: usize, search: impl FnOnce() -> Option<(usize, usize)>) -> Option<(usize, usize)> {
        let stale = match *self {
            Cached::Unsearched => true,
            Cached::Found(start, _) => start < pos,
            Cached::Exhausted => false,
        };
        if stale {
            *self = search().map_or(Cached::Exhausted, |(start, end)| Cached::Found(start, end));
        }
        match *self {
            Cached::Found(start, end) => Some((start, end)),
            _ => None,
        }
    }
}

/// Next match of every rule on one line.
///
/// A rule is searched again only once the scan has moved past its
/// cached match, so a line is tokenized in a single pass per rule.
struct NextMatches<'a> {
    lang: &'a LanguageDefinition,
    multiline: Vec<Cached>,
    patterns: Vec<Cached>,
}

impl<'a> NextMatches<'a> {
    fn new(lang: &'a LanguageDefinition) -> Self {
        Self {
            lang,
            multiline: vec![Cached::Unsearched; lang.multiline_rules.len()],
            patterns: vec![Cached::Unsearched; lang.patterns.len()],
        }
    }

    /// Earliest rule match at or after `pos`.
    ///
    /// Multiline starts win ties against patterns; patterns tie-break
    /// by priority.
    fn earliest(&mut self, text: &str, pos: usize) -> Option<(usize, usize, Candidate<'a>)> {
        let lang = self.lang;
        let mut best: Option<(usize, usize, Candidate<'a>)> = None;
        for (rule, slot) in lang.multiline_rules.iter().zip(self.multiline.iter_mut()) {
            if let Some((start, end)) = slot.refresh(pos, || rule.find_start(text, pos)) {
                if best.as_ref().map_or(true, |(s, _, _)| start < *s) {
                    best = Some((start, end, Candidate::Multiline(rule)));
                }
            }
        }
        for (rule, slot) in lang.patterns.iter().zip(self.patterns.iter_mut()) {
            if let Some((start, end)) = slot.refresh(pos, || rule.find_at(text, pos)) {
                if best.as_ref().map_or(true, |(s, _, _)| start < *s) {
                    best = Some((start, end, Candidate::Pattern(rule)));
                }
            }
        }
        best
    }
}

/// A complete language definition
#[derive(Debug)]
pub struct LanguageDefinition {
    /// Grammar name (e.g., "rust", "markup")
    pub name: String,
    /// Host language identifiers resolving to this grammar
    pub aliases: Vec<String>,
    /// File extensions (e.g., ["rs"], ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Single-line pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
    /// Multi-line rules for comments, strings, etc.
    pub multiline_rules: Vec<MultilineRule>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            patterns: Vec::new(),
            multiline_rules: Vec::new(),
        }
    }

    /// Add a host language identifier
    pub fn add_alias(&mut self, id: &str) {
        self.aliases.push(id.to_string());
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a pattern rule
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
        // Stable: equal priorities keep insertion order
        self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a multiline rule
    pub fn add_multiline(&mut self, rule: MultilineRule) {
        self.multiline_rules.push(rule);
    }

    fn multiline_rule(&self, state_id: u8) -> Option<&MultilineRule> {
        self.multiline_rules.iter().find(|r| r.state_id == state_id)
    }

    /// Tokenize a single line of text
    ///
    /// Takes the line text and the state from the previous line.
    /// Returns spans covering the line and the state for the next line.
    pub fn tokenize_line(
        &self,
        line: usize,
        text: &str,
        prev_state: LineState,
    ) -> Result<LineTokens, SyntaxError> {
        let mut out = SpanWriter::new(line);
        let mut pos = 0;

        // Finish a construct carried over from the previous line
        if prev_state.is_inside_multiline() {
            let rule = self
                .multiline_rule(prev_state.multiline_id)
                .ok_or(SyntaxError::UnknownState(prev_state.multiline_id))?;
            match rule.find_end(text, 0) {
                Some(end) => {
                    out.push(0, end, rule.kind);
                    pos = end;
                }
                None => {
                    out.push(0, text.len(), rule.kind);
                    return Ok(out.finish(text.len(), prev_state));
                }
            }
        }

        let mut next = NextMatches::new(self);
        while pos < text.len() {
            let Some((start, end, candidate)) = next.earliest(text, pos) else {
                break;
            };

            match candidate {
                Candidate::Pattern(rule) => {
                    out.push(start, end, rule.kind);
                    pos = end;
                }
                Candidate::Multiline(rule) => match rule.find_end(text, end) {
                    Some(close) => {
                        // Complete construct on this line
                        out.push(start, close, rule.kind);
                        pos = close;
                    }
                    None if rule.state_id == 0 => {
                        // State 0 means "normal" and cannot carry a construct
                        return Err(SyntaxError::UnknownState(0));
                    }
                    None => {
                        // Continues on the next line
                        out.push(start, text.len(), rule.kind);
                        return Ok(out.finish(text.len(), LineState::inside(rule.state_id)));
                    }
                },
            }
        }

        Ok(out.finish(text.len(), LineState::default()))
    }

    /// Tokenize a whole document into a flat sequence of spans
    pub fn tokenize(&self, text: &str) -> Result<Vec<TokenSpan>, SyntaxError> {
        let mut spans = Vec::new();
        let mut state = LineState::default();

        for (line, line_text) in text.split('\n').enumerate() {
            let line_text = line_text.strip_suffix('\r').unwrap_or(line_text);
            let result = self.tokenize_line(line, line_text, state)?;
            spans.extend(result.spans);
            state = result.end_state;
        }

        Ok(spans)
    }
}
