//! Token classification of bracket occurrences
//!
//! Tokenizes a whole document once and records, per line, the kind of
//! every bracket occurrence found inside the tokenizer's spans. The
//! resolver uses the result to drop brackets that sit inside strings
//! and comments.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use thiserror::Error;

use super::grammars::GrammarSet;
use super::language::TokenSpan;
use super::tokens::TokenKind;
use crate::error::SyntaxError;
use crate::registry::{Bracket, Registry};

/// Kinds accepted as code in every language
const GLOBAL_KINDS: &[TokenKind] = &[
    TokenKind::Punctuation,
    TokenKind::InterpolationPunctuation,
    TokenKind::Delimiter,
    TokenKind::None,
];

/// Markup also treats attribute names as code (Angular style `(click)=`)
const MARKUP_KINDS: &[TokenKind] = &[
    TokenKind::Punctuation,
    TokenKind::InterpolationPunctuation,
    TokenKind::Delimiter,
    TokenKind::AttrName,
    TokenKind::None,
];

/// Token kinds a grammar accepts as structural
pub fn structural_kinds(grammar: &str) -> &'static [TokenKind] {
    match grammar {
        "markup" => MARKUP_KINDS,
        _ => GLOBAL_KINDS,
    }
}

/// Classification settings taken from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSettings {
    pub enabled: bool,
    pub max_lines: usize,
    /// Documents larger than this many bytes are not tokenized
    pub max_bytes: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_lines: 5000,
            max_bytes: 1 << 20,
        }
    }
}

/// A bracket occurrence and the kind of the span it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken {
    pub token: String,
    /// Character offset on its line
    pub index: usize,
    pub kind: TokenKind,
}

/// Why classification was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    #[error("classification disabled")]
    Disabled,

    #[error("no grammar for language {0:?}")]
    UnknownLanguage(String),

    #[error("document has {lines} lines, limit is {limit}")]
    TooManyLines { lines: usize, limit: usize },

    #[error("document has {bytes} bytes, limit is {limit}")]
    TooLarge { bytes: usize, limit: usize },

    #[error(transparent)]
    TokenizerFailed(#[from] SyntaxError),
}

/// Bracket kinds for one document version
#[derive(Debug, Clone)]
pub struct ClassifiedDocument {
    grammar: String,
    structural_kinds: &'static [TokenKind],
    lines: Vec<Vec<ClassifiedToken>>,
    structural_seen: HashSet<String>,
}

impl ClassifiedDocument {
    fn build(grammar: &str, text: &str, spans: &[TokenSpan], registry: &Registry) -> Self {
        let structural_kinds = structural_kinds(grammar);
        let line_texts: Vec<&str> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();

        let mut lines: Vec<Vec<ClassifiedToken>> = vec![Vec::new(); line_texts.len()];
        let mut structural_seen: HashSet<String> = HashSet::new();

        // Byte to character offsets, advanced monotonically per line
        let mut cursor_line = usize::MAX;
        let mut cursor_byte = 0;
        let mut cursor_char = 0;

        for span in spans {
            let Some(line_text) = line_texts.get(span.line) else {
                continue;
            };
            let Some(slice) = line_text.get(span.start..span.end) else {
                continue;
            };
            if span.line != cursor_line || span.start < cursor_byte {
                cursor_line = span.line;
                cursor_byte = 0;
                cursor_char = 0;
            }
            cursor_char += line_text[cursor_byte..span.start].chars().count();
            cursor_byte = span.start;

            let mut slice_byte = 0;
            let mut slice_char = 0;
            for (start, token) in registry.pattern().find_iter(slice) {
                slice_char += slice[slice_byte..start].chars().count();
                slice_byte = start;
                if structural_kinds.contains(&span.kind) && !structural_seen.contains(token) {
                    structural_seen.insert(token.to_string());
                }
                lines[span.line].push(ClassifiedToken {
                    token: token.to_string(),
                    index: cursor_char + slice_char,
                    kind: span.kind,
                });
            }
        }

        Self {
            grammar: grammar.to_string(),
            structural_kinds,
            lines,
            structural_seen,
        }
    }

    /// Grammar the document was tokenized with
    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    /// Classified bracket occurrences of a line, in order
    pub fn line(&self, line: usize) -> &[ClassifiedToken] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kind of `token` starting at character `index` of `line`.
    ///
    /// None when the tokenizer saw a different token there, or none.
    pub fn kind_of(&self, line: usize, token: &str, index: usize) -> Option<TokenKind> {
        let tokens = self.line(line);
        let pos = tokens.binary_search_by_key(&index, |t| t.index).ok()?;
        let found = &tokens[pos];
        (found.token == token).then_some(found.kind)
    }

    /// Whether the token was found with a structural kind anywhere
    pub fn seen_as_structural(&self, token: &str) -> bool {
        self.structural_seen.contains(token)
    }

    pub fn is_structural(&self, kind: TokenKind) -> bool {
        self.structural_kinds.contains(&kind)
    }
}

/// Outcome of classifying a document
#[derive(Debug, Clone)]
pub enum Classification {
    Available(ClassifiedDocument),
    Unavailable(Unavailable),
}

impl Classification {
    pub fn is_available(&self) -> bool {
        matches!(self, Classification::Available(_))
    }

    /// Whether a bracket occurrence counts as code.
    ///
    /// `index` is the character offset of the occurrence on its line.
    /// Anything the classification cannot speak for is accepted.
    pub fn accepts(&self, bracket: Bracket<'_>, line: usize, index: usize) -> bool {
        let Classification::Available(doc) = self else {
            return true;
        };
        if !bracket.definition.parse_enabled {
            return true;
        }
        // A pair never seen as code is probably mislabelled by the grammar
        if !doc.seen_as_structural(bracket.token()) && !doc.seen_as_structural(bracket.opposite()) {
            return true;
        }
        match doc.kind_of(line, bracket.token(), index) {
            Some(kind) => doc.is_structural(kind),
            None => true,
        }
    }
}

/// Run a tokenizer, turning a panic into an error
fn guarded<F>(tokenize: F) -> Result<Vec<TokenSpan>, SyntaxError>
where
    F: FnOnce() -> Result<Vec<TokenSpan>, SyntaxError>,
{
    match panic::catch_unwind(AssertUnwindSafe(tokenize)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(SyntaxError::Panicked(message))
        }
    }
}

/// Classify the bracket occurrences of a document
pub fn classify(
    text: &str,
    language_id: &str,
    line_count: usize,
    settings: &ClassifierSettings,
    grammars: &GrammarSet,
    registry: &Registry,
) -> Classification {
    let result = classify_inner(text, language_id, line_count, settings, grammars, registry);
    match &result {
        Classification::Available(doc) => {
            debug!("classified {:?} document with grammar {}", language_id, doc.grammar())
        }
        Classification::Unavailable(Unavailable::TokenizerFailed(err)) => {
            warn!("tokenizer failed for {:?}: {}", language_id, err)
        }
        Classification::Unavailable(reason) => debug!("classification unavailable: {}", reason),
    }
    result
}

fn classify_inner(
    text: &str,
    language_id: &str,
    line_count: usize,
    settings: &ClassifierSettings,
    grammars: &GrammarSet,
    registry: &Registry,
) -> Classification {
    if !settings.enabled {
        return Classification::Unavailable(Unavailable::Disabled);
    }
    if line_count > settings.max_lines {
        return Classification::Unavailable(Unavailable::TooManyLines {
            lines: line_count,
            limit: settings.max_lines,
        });
    }
    if text.len() > settings.max_bytes {
        return Classification::Unavailable(Unavailable::TooLarge {
            bytes: text.len(),
            limit: settings.max_bytes,
        });
    }
    let Some(lang) = grammars.resolve(language_id) else {
        return Classification::Unavailable(Unavailable::UnknownLanguage(language_id.to_string()));
    };

    match guarded(|| lang.tokenize(text)) {
        Ok(spans) => Classification::Available(ClassifiedDocument::build(&lang.name, text, &spans, registry)),
        Err(err) => Classification::Unavailable(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PairConfig;
    use crate::syntax::{LanguageDefinition, MultilineRule};

    fn registry() -> Registry {
        Registry::build(&[
            PairConfig::new("(", ")"),
            PairConfig::new("[", "]"),
            PairConfig::new("<", ">"),
        ])
    }

    fn run(text: &str, language_id: &str) -> Classification {
        let lines = text.split('\n').count();
        classify(
            text,
            language_id,
            lines,
            &ClassifierSettings::default(),
            &GrammarSet::builtin(),
            &registry(),
        )
    }

    fn available(classification: &Classification) -> &ClassifiedDocument {
        match classification {
            Classification::Available(doc) => doc,
            Classification::Unavailable(reason) => panic!("unavailable: {}", reason),
        }
    }

    #[test]
    fn test_kinds_by_offset() {
        let result = run("let s = \"(\";\nf(x, \")\")", "rust");
        let doc = available(&result);

        assert_eq!(doc.grammar(), "rust");
        assert_eq!(doc.kind_of(0, "(", 9), Some(TokenKind::String));
        assert_eq!(doc.kind_of(1, "(", 1), Some(TokenKind::Punctuation));
        assert_eq!(doc.kind_of(1, ")", 6), Some(TokenKind::String));
        assert_eq!(doc.kind_of(1, ")", 8), Some(TokenKind::Punctuation));
        // Another token at that offset
        assert_eq!(doc.kind_of(1, ")", 1), None);
        assert_eq!(doc.kind_of(1, ")", 7), None);
        assert_eq!(doc.kind_of(7, "(", 0), None);
    }

    #[test]
    fn test_accepts_filters_literals() {
        let registry = registry();
        let result = run("let s = \"(\";\nf(x)", "rust");
        let open = registry.lookup("(").unwrap();

        assert!(!result.accepts(open, 0, 9));
        assert!(result.accepts(open, 1, 1));
        // Nothing recorded there
        assert!(result.accepts(open, 1, 3));
    }

    #[test]
    fn test_never_structural_pair_is_not_filtered() {
        let registry = registry();
        // "<" and ">" only ever appear inside strings
        let result = run("let s = \"<\";\nlet t = \">\";", "rust");
        let lt = registry.lookup("<").unwrap();
        assert!(!available(&result).seen_as_structural("<"));
        assert!(result.accepts(lt, 0, 9));
    }

    #[test]
    fn test_parse_disabled_pair_is_not_filtered() {
        let mut pair = PairConfig::new("(", ")");
        pair.parse = Some(false);
        let registry = Registry::build(&[pair]);
        let result = classify(
            "f(\"(\")",
            "rust",
            1,
            &ClassifierSettings::default(),
            &GrammarSet::builtin(),
            &registry,
        );
        let open = registry.lookup("(").unwrap();
        assert!(result.is_available());
        assert!(result.accepts(open, 0, 3));
    }

    #[test]
    fn test_unavailable_reasons() {
        let registry = registry();
        let grammars = GrammarSet::builtin();

        let disabled = ClassifierSettings {
            enabled: false,
            ..ClassifierSettings::default()
        };
        assert!(matches!(
            classify("()", "rust", 1, &disabled, &grammars, &registry),
            Classification::Unavailable(Unavailable::Disabled)
        ));

        let small = ClassifierSettings {
            max_lines: 2,
            ..ClassifierSettings::default()
        };
        assert!(matches!(
            classify("(\n\n)", "rust", 3, &small, &grammars, &registry),
            Classification::Unavailable(Unavailable::TooManyLines { lines: 3, limit: 2 })
        ));

        let narrow = ClassifierSettings {
            max_bytes: 8,
            ..ClassifierSettings::default()
        };
        assert!(matches!(
            classify("f(\"(\", x)", "rust", 1, &narrow, &grammars, &registry),
            Classification::Unavailable(Unavailable::TooLarge { bytes: 9, limit: 8 })
        ));
        assert!(classify("f(x)", "rust", 1, &narrow, &grammars, &registry).is_available());

        let unknown = run("(\"(\")", "cobol");
        assert!(matches!(
            unknown,
            Classification::Unavailable(Unavailable::UnknownLanguage(ref id)) if id == "cobol"
        ));
        // Unavailable accepts everything
        assert!(unknown.accepts(registry.lookup("(").unwrap(), 0, 1));
    }

    #[test]
    fn test_host_identifier_resolution() {
        let result = run("const a = [\"]\"];", "typescriptreact");
        let doc = available(&result);
        assert_eq!(doc.grammar(), "javascript");
        assert_eq!(doc.kind_of(0, "]", 12), Some(TokenKind::String));
        assert_eq!(doc.kind_of(0, "]", 14), Some(TokenKind::Punctuation));
    }

    #[test]
    fn test_offsets_count_characters() {
        let result = run("let é = \"(\"; f(ß)", "rust");
        let doc = available(&result);
        assert_eq!(doc.kind_of(0, "(", 9), Some(TokenKind::String));
        assert_eq!(doc.kind_of(0, "(", 14), Some(TokenKind::Punctuation));
        assert_eq!(doc.kind_of(0, ")", 16), Some(TokenKind::Punctuation));
    }

    #[test]
    fn test_tokenizer_error_becomes_unavailable() {
        let mut lang = LanguageDefinition::new("broken");
        lang.add_multiline(MultilineRule::new("heredoc", r"<<", r">>", TokenKind::String, 0).unwrap());
        let mut grammars = GrammarSet::new();
        grammars.add_language(lang);
        let registry = registry();

        let result = classify(
            "<< (\n)",
            "broken",
            2,
            &ClassifierSettings::default(),
            &grammars,
            &registry,
        );
        assert!(matches!(
            result,
            Classification::Unavailable(Unavailable::TokenizerFailed(SyntaxError::UnknownState(0)))
        ));
        assert!(result.accepts(registry.lookup("(").unwrap(), 0, 3));
    }

    #[test]
    fn test_long_line_classified() {
        let text = format!("{{{}}}", "(a)".repeat(20_000));
        let result = run(&text, "rust");
        let doc = available(&result);
        assert_eq!(doc.line(0).len(), 40_000);
        assert_eq!(doc.kind_of(0, ")", 60_000), Some(TokenKind::Punctuation));
    }

    #[test]
    fn test_tokenizer_panic_is_contained() {
        let err = guarded(|| panic!("grammar exploded")).unwrap_err();
        assert_eq!(err, SyntaxError::Panicked("grammar exploded".to_string()));
    }

    #[test]
    fn test_markup_accepts_attribute_names() {
        assert!(structural_kinds("markup").contains(&TokenKind::AttrName));
        assert!(!structural_kinds("rust").contains(&TokenKind::AttrName));
        assert!(structural_kinds("rust").contains(&TokenKind::None));
    }
}
