//! High-level actions dispatched by the editing surface.
//!
//! The surface owns input events and rendering; it hands the engine a
//! buffer snapshot, a selection, and one action, and applies whatever
//! comes back.

use crate::construct::ConstructKind;
use crate::error::EngineError;
use crate::text::TextBuffer;
use crate::toggle::{number_lines, toggle_construct, ToggleOutcome};
use crate::types::Selection;

/// An action the editing surface can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    /// Toggle a Markdown construct around the selection.
    Toggle(ConstructKind),
    /// Number the selected lines `1. `, `2. `, ...
    NumberLines,
}

/// Run one action against a buffer snapshot.
pub fn apply_action<T: TextBuffer>(
    buf: &T,
    sel: Selection,
    action: EditorAction,
) -> Result<ToggleOutcome, EngineError> {
    match action {
        EditorAction::Toggle(kind) => toggle_construct(buf, sel, kind),
        EditorAction::NumberLines => number_lines(buf, sel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditorRope;

    #[test]
    fn test_action_dispatch() {
        let buf = EditorRope::from_str("alpha\nbeta");
        let out = apply_action(
            &buf,
            Selection::new(0, 5),
            EditorAction::Toggle(ConstructKind::Bold),
        )
        .unwrap();
        assert_eq!(out.text, "**alpha**\nbeta");

        let out = apply_action(&buf, Selection::new(0, 10), EditorAction::NumberLines).unwrap();
        assert_eq!(out.text, "1. alpha\n2. beta");
    }

    #[test]
    fn test_action_bounds_error() {
        let buf = EditorRope::from_str("ab");
        assert!(apply_action(&buf, Selection::new(0, 9), EditorAction::NumberLines).is_err());
    }
}
