//! Resolution engine
//!
//! Owns the configuration, the bracket registry, the grammars and the
//! current document session, and turns host events into resolutions.
//! Every event bumps a generation counter so a host can drop a
//! highlight computed before the latest reset.

use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::deadline::Deadline;
use crate::document::Document;
use crate::matcher::LineMatch;
use crate::registry::Registry;
use crate::resolver::{resolve, PairMatch};
use crate::session::Session;
use crate::syntax::{ClassifierSettings, GrammarSet};

/// A caret position, zero-based, character offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A host selection; resolution only runs for an empty one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    /// A bare caret
    pub fn caret(line: usize, character: usize) -> Self {
        let position = Position::new(line, character);
        Self {
            anchor: position,
            active: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }
}

/// A span of one line, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl From<&LineMatch> for Span {
    fn from(m: &LineMatch) -> Self {
        Span {
            start: Position::new(m.line, m.index),
            end: Position::new(m.line, m.end()),
        }
    }
}

/// A resolved pair ready for the highlighter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Generation the highlight was computed in
    pub generation: u64,
    pub pair: PairMatch,
    /// Style of the pair, None for the global style
    pub style: Option<String>,
}

impl Highlight {
    /// Ranges to decorate: the entry token and its complement
    pub fn spans(&self) -> Vec<Span> {
        let mut spans = vec![Span::from(&self.pair.start)];
        spans.extend(self.pair.end.as_ref().map(Span::from));
        spans
    }
}

/// Host-facing resolution engine
#[derive(Debug)]
pub struct Engine {
    config: Config,
    registry: Arc<Registry>,
    grammars: GrammarSet,
    session: Option<Session>,
    generation: u64,
}

impl Engine {
    /// Create an engine with the built-in grammars
    pub fn new(config: Config) -> Self {
        Self::with_grammars(config, GrammarSet::builtin())
    }

    pub fn with_grammars(config: Config, grammars: GrammarSet) -> Self {
        let registry = Arc::new(Registry::build(&config.pairs));
        Self {
            config,
            registry,
            grammars,
            session: None,
            generation: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn grammars(&self) -> &GrammarSet {
        &self.grammars
    }

    /// Current session, if one was started
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Replace the configuration and rebuild the registry
    pub fn reconfigure(&mut self, config: Config) {
        self.registry = Arc::new(Registry::build(&config.pairs));
        self.config = config;
        self.reset();
    }

    /// Discard the session and invalidate earlier highlights
    pub fn reset(&mut self) -> u64 {
        self.session = None;
        self.invalidate()
    }

    fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        debug!("engine reset, generation {}", self.generation);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a highlight from `generation` may still be shown
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn classifier_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            enabled: self.config.parse,
            max_lines: self.config.max_classify_lines,
            max_bytes: self.config.max_classify_bytes,
        }
    }

    /// Session for `doc`, started anew when the language changed
    fn session_for<D: Document + ?Sized>(&mut self, doc: &D) -> &mut Session {
        if self
            .session
            .as_ref()
            .map_or(false, |s| s.language_id() != doc.language_id())
        {
            debug!("language changed to {:?}", doc.language_id());
            self.session = None;
        }
        let settings = self.classifier_settings();
        let registry = &self.registry;
        let grammars = &self.grammars;
        self.session
            .get_or_insert_with(|| Session::new(Arc::clone(registry), doc, &settings, grammars))
    }

    /// Resolve at the caret, whatever the outcome
    pub fn resolve_at<D: Document + ?Sized>(&mut self, doc: &D, selection: Selection) -> Option<PairMatch> {
        if !selection.is_empty() {
            return None;
        }
        let deadline = Deadline::after(self.config.timeout());
        let caret = selection.active;
        let session = self.session_for(doc);
        let adjacent = session.adjacent(doc, caret.line, caret.character)?;

        let result = resolve(session, doc, &adjacent.entry, adjacent.direction, &deadline);
        debug!(
            "{:?} at {}:{} -> {:?}",
            result.start.token, result.start.line, result.start.index, result.termination
        );
        Some(result)
    }

    /// Resolve at the caret, returning only a resolved pair
    pub fn run<D: Document + ?Sized>(&mut self, doc: &D, selection: Selection) -> Option<Highlight> {
        let generation = self.generation;
        let pair = self.resolve_at(doc, selection)?;
        if !pair.is_resolved() {
            return None;
        }
        let style = self
            .registry
            .lookup(&pair.start.token)
            .and_then(|b| b.definition.style.clone());
        Some(Highlight {
            generation,
            pair,
            style,
        })
    }

    /// The caret moved; the session survives
    pub fn on_selection_change<D: Document + ?Sized>(&mut self, doc: &D, selection: Selection) -> Option<Highlight> {
        self.invalidate();
        self.run(doc, selection)
    }

    /// The document text changed
    pub fn on_text_change<D: Document + ?Sized>(&mut self, doc: &D, selection: Selection) -> Option<Highlight> {
        self.reset();
        self.run(doc, selection)
    }

    /// Another document became active
    pub fn on_active_editor_change<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        selection: Selection,
    ) -> Option<Highlight> {
        self.reset();
        self.run(doc, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PairConfig;
    use crate::document::TextDocument;
    use crate::resolver::Termination;
    use std::time::{Duration, Instant};

    fn engine() -> Engine {
        Engine::new(Config::default())
    }

    #[test]
    fn test_run_resolves_pair() {
        let mut engine = engine();
        let doc = TextDocument::new("fn main() {\n    f(1);\n}", "rust");

        let highlight = engine.run(&doc, Selection::caret(0, 10)).unwrap();
        assert_eq!(highlight.pair.end, Some(LineMatch::new(2, "}", 0)));
        assert_eq!(highlight.generation, engine.generation());
        assert!(engine.is_current(highlight.generation));
        assert_eq!(
            highlight.spans(),
            vec![
                Span {
                    start: Position::new(0, 10),
                    end: Position::new(0, 11)
                },
                Span {
                    start: Position::new(2, 0),
                    end: Position::new(2, 1)
                },
            ]
        );
    }

    #[test]
    fn test_long_line_resolves_within_budget() {
        let mut engine = engine();
        let doc = TextDocument::new(&format!("{{{}}}", "(a)".repeat(20_000)), "rust");

        let started = Instant::now();
        let pair = engine.resolve_at(&doc, Selection::caret(0, 0)).unwrap();
        assert_eq!(pair.termination, Termination::Resolved);
        assert_eq!(pair.end, Some(LineMatch::new(0, "}", 60_001)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_range_selection_skips_resolution() {
        let mut engine = engine();
        let doc = TextDocument::new("()", "plaintext");
        let selection = Selection {
            anchor: Position::new(0, 0),
            active: Position::new(0, 1),
        };
        assert!(engine.resolve_at(&doc, selection).is_none());
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_unresolved_is_not_highlighted() {
        let mut engine = engine();
        let doc = TextDocument::new("(", "plaintext");
        assert_eq!(
            engine.resolve_at(&doc, Selection::caret(0, 0)).map(|p| p.termination),
            Some(Termination::BoundaryReached)
        );
        assert!(engine.run(&doc, Selection::caret(0, 0)).is_none());
    }

    #[test]
    fn test_events_invalidate_older_highlights() {
        let mut engine = engine();
        let doc = TextDocument::new("(x)", "plaintext");

        let first = engine.on_selection_change(&doc, Selection::caret(0, 0)).unwrap();
        assert!(engine.session().is_some());

        let second = engine.on_selection_change(&doc, Selection::caret(0, 3)).unwrap();
        assert!(!engine.is_current(first.generation));
        assert!(engine.is_current(second.generation));
        assert_eq!(second.pair.end, Some(LineMatch::new(0, "(", 0)));
    }

    #[test]
    fn test_text_change_starts_new_session() {
        let mut engine = engine();
        let mut doc = TextDocument::new("(x)", "plaintext");
        engine.on_selection_change(&doc, Selection::caret(0, 0));
        assert_eq!(engine.session().map(|s| s.cached_lines()), Some(1));

        doc.set_text("((x)");
        let highlight = engine.on_text_change(&doc, Selection::caret(0, 1)).unwrap();
        assert_eq!(highlight.pair.end, Some(LineMatch::new(0, ")", 3)));
    }

    #[test]
    fn test_language_change_reclassifies() {
        let mut engine = engine();
        let mut doc = TextDocument::new("(\")\")", "plaintext");
        let plain = engine.resolve_at(&doc, Selection::caret(0, 0)).unwrap();
        assert_eq!(plain.end, Some(LineMatch::new(0, ")", 2)));

        doc.set_language_id("rust");
        let rust = engine.on_selection_change(&doc, Selection::caret(0, 0)).unwrap();
        assert_eq!(rust.pair.end, Some(LineMatch::new(0, ")", 4)));
        assert_eq!(engine.session().map(|s| s.language_id()), Some("rust"));
    }

    #[test]
    fn test_reconfigure_and_style() {
        let mut engine = engine();
        let doc = TextDocument::new("<a>", "plaintext");
        assert!(engine.run(&doc, Selection::caret(0, 0)).is_none());

        let mut angle = PairConfig::new("<", ">");
        angle.style = Some("angle".to_string());
        let config = Config {
            pairs: vec![angle],
            ..Config::default()
        };
        let before = engine.generation();
        engine.reconfigure(config);
        assert!(engine.generation() > before);

        let highlight = engine.run(&doc, Selection::caret(0, 0)).unwrap();
        assert_eq!(highlight.style.as_deref(), Some("angle"));
        assert_eq!(highlight.pair.end, Some(LineMatch::new(0, ">", 2)));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut engine = engine();
        let doc = TextDocument::new("{\n [()]\n}", "json");
        let first = engine.run(&doc, Selection::caret(2, 1));
        let second = engine.run(&doc, Selection::caret(2, 1));
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
