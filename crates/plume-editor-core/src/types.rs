//! Core editor types: selection and edit tracking.
//!
//! These types are framework-agnostic and can be used with any text buffer
//! implementation.

use std::ops::Range;

use web_time::Instant;

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor
/// is now. They may be in any order - use `start()` and `end()` for ordered
/// bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret) at the given offset.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Ordered start offset.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Ordered end offset.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Whether this is a caret (no selected content).
    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// Whether head precedes anchor.
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    /// Selected length in chars.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Ordered char range.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Info about the last edit applied to a buffer.
#[derive(Clone, Debug, Copy)]
pub struct EditInfo {
    /// Character offset where the edit occurred
    pub edit_char_pos: usize,
    /// Number of characters inserted
    pub inserted_len: usize,
    /// Number of characters deleted
    pub deleted_len: usize,
    /// Whether the edit contains a newline (line-structure-affecting)
    pub contains_newline: bool,
    /// Document length (in chars) after this edit was applied.
    /// Used to detect stale edit info - if current doc length doesn't match,
    /// the edit info is from a previous cycle and shouldn't be used.
    pub doc_len_after: usize,
    /// When this edit occurred.
    pub timestamp: Instant,
}

impl PartialEq for EditInfo {
    fn eq(&self, other: &Self) -> bool {
        // Compare all fields except timestamp (not meaningful for equality)
        self.edit_char_pos == other.edit_char_pos
            && self.inserted_len == other.inserted_len
            && self.deleted_len == other.deleted_len
            && self.contains_newline == other.contains_newline
            && self.doc_len_after == other.doc_len_after
    }
}

impl EditInfo {
    /// Check if this edit info is stale (doc has changed since this edit).
    pub fn is_stale(&self, current_doc_len: usize) -> bool {
        self.doc_len_after != current_doc_len
    }

    /// Get the range that was affected by this edit.
    ///
    /// For insertions: the range of inserted text.
    /// For deletions: an empty range at the deletion point.
    pub fn affected_range(&self) -> Range<usize> {
        self.edit_char_pos..self.edit_char_pos + self.inserted_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        // Forward selection
        let sel = Selection::new(5, 10);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
        assert!(!sel.is_backwards());

        // Backward selection
        let sel = Selection::new(10, 5);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
        assert!(sel.is_backwards());

        let caret = Selection::caret(3);
        assert!(caret.is_caret());
        assert_eq!(caret.len(), 0);
    }

    #[test]
    fn test_edit_info_equality_ignores_timestamp() {
        let a = EditInfo {
            edit_char_pos: 1,
            inserted_len: 2,
            deleted_len: 0,
            contains_newline: false,
            doc_len_after: 10,
            timestamp: Instant::now(),
        };
        let b = EditInfo {
            timestamp: Instant::now(),
            ..a
        };
        assert_eq!(a, b);
        assert!(a.is_stale(11));
        assert!(!a.is_stale(10));
        assert_eq!(a.affected_range(), 1..3);
    }
}
