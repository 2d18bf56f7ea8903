//! Document text source
//!
//! The resolver only ever reads a document through the `Document` trait.
//! `TextDocument` is the owned implementation used by the command line
//! front end and the tests.

use std::borrow::Cow;
use std::path::Path;

/// Read-only view of a document held by the host
pub trait Document {
    /// Number of lines (always at least one for a real document)
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator, None when out of range
    fn line_text(&self, line: usize) -> Option<&str>;

    /// Whole document text, lines joined by '\n'
    fn full_text(&self) -> Cow<'_, str>;

    /// Host language identifier (e.g. "rust", "typescriptreact")
    fn language_id(&self) -> &str;
}

/// A document owned in memory
#[derive(Debug, Clone)]
pub struct TextDocument {
    lines: Vec<String>,
    language_id: String,
}

impl TextDocument {
    /// Create a document from text
    pub fn new(text: &str, language_id: impl Into<String>) -> Self {
        // split('\n') keeps the empty line after a trailing newline
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self {
            lines,
            language_id: language_id.into(),
        }
    }

    /// Read a document from disk
    pub fn from_file(path: &Path, language_id: impl Into<String>) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(&content, language_id))
    }

    /// Change the language identifier
    pub fn set_language_id(&mut self, language_id: impl Into<String>) {
        self.language_id = language_id.into();
    }

    /// Replace the full text
    pub fn set_text(&mut self, text: &str) {
        let language_id = std::mem::take(&mut self.language_id);
        *self = Self::new(text, language_id);
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|l| l.as_str())
    }

    fn full_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.lines.join("\n"))
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }
}
