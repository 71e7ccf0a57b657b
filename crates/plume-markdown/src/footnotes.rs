//! Abbreviation footnotes accumulated during serialization.

use smol_str::SmolStr;

/// Insertion-ordered table of `word -> definition` pairs, emitted as
/// trailing `*[word]: definition` lines. First registration of a word wins.
#[derive(Debug, Clone, Default)]
pub struct FootnoteTable {
    entries: Vec<(SmolStr, SmolStr)>,
}

impl FootnoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an abbreviation. Re-registering the same word is a no-op.
    pub fn register(&mut self, word: impl Into<SmolStr>, definition: impl Into<SmolStr>) {
        let word = word.into();
        if self.entries.iter().any(|(w, _)| *w == word) {
            return;
        }
        self.entries.push((word, definition.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the trailing definition lines, in registration order.
    pub fn render_trailing(&self) -> String {
        let mut out = String::new();
        for (word, definition) in &self.entries {
            out.push_str("\n\n*[");
            out.push_str(word);
            out.push_str("]: ");
            out.push_str(definition);
        }
        out
    }
}
