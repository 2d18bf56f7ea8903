//! Document session
//!
//! A session holds everything cached for one document version: the
//! classification and the filtered bracket matches of every line that
//! has been asked for. A text or language change starts a new session;
//! nothing is patched in place.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};

use crate::adjacency::{pick_adjacent, Adjacent};
use crate::document::Document;
use crate::matcher::{find_all, Match};
use crate::registry::Registry;
use crate::syntax::{classify, Classification, ClassifierSettings, GrammarSet};

/// Cached per-document state
#[derive(Debug)]
pub struct Session {
    registry: Arc<Registry>,
    language_id: String,
    classification: Classification,
    memo: HashMap<usize, Vec<Match>>,
}

impl Session {
    /// Start a session, classifying the document once
    pub fn new<D: Document + ?Sized>(
        registry: Arc<Registry>,
        doc: &D,
        settings: &ClassifierSettings,
        grammars: &GrammarSet,
    ) -> Self {
        let classification = classify(
            &doc.full_text(),
            doc.language_id(),
            doc.line_count(),
            settings,
            grammars,
            &registry,
        );
        debug!(
            "new session for {:?} ({} lines, classification {})",
            doc.language_id(),
            doc.line_count(),
            if classification.is_available() { "available" } else { "unavailable" }
        );
        Self::with_classification(registry, doc.language_id(), classification)
    }

    /// Start a session with a precomputed classification
    pub fn with_classification(registry: Arc<Registry>, language_id: &str, classification: Classification) -> Self {
        Self {
            registry,
            language_id: language_id.to_string(),
            classification,
            memo: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Language the session was built for
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Structural bracket matches of a whole line, memoized
    pub fn line_matches<D: Document + ?Sized>(&mut self, doc: &D, line: usize) -> &[Match] {
        let registry = &self.registry;
        let classification = &self.classification;
        self.memo.entry(line).or_insert_with(|| {
            trace!("matching line {}", line);
            let text = doc.line_text(line).unwrap_or("");
            find_all(text, registry.pattern(), None, None)
                .filter(|m| {
                    registry
                        .lookup(&m.token)
                        .map_or(false, |bracket| classification.accepts(bracket, line, m.index))
                })
                .collect()
        })
    }

    /// Structural matches of a line within `[start_at, end_at)`
    pub fn matches_between<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        line: usize,
        start_at: Option<usize>,
        end_at: Option<usize>,
    ) -> Vec<Match> {
        self.line_matches(doc, line)
            .iter()
            .filter(|m| start_at.map_or(true, |s| m.index >= s))
            .filter(|m| end_at.map_or(true, |e| m.index < e))
            .cloned()
            .collect()
    }

    /// Structural bracket touching the caret, if any
    pub fn adjacent<D: Document + ?Sized>(&mut self, doc: &D, line: usize, cursor: usize) -> Option<Adjacent> {
        if line >= doc.line_count() {
            return None;
        }
        let registry = Arc::clone(&self.registry);
        let matches = self.line_matches(doc, line);
        pick_adjacent(matches, line, cursor, &registry)
    }

    /// Number of memoized lines
    pub fn cached_lines(&self) -> usize {
        self.memo.len()
    }
}
