//! Line-oriented helpers shared by the classifier and the toggle engine.

use smol_str::SmolStr;

use crate::text::TextBuffer;
use crate::types::Selection;

/// Inclusive range of lines covered by a selection.
///
/// When a multi-line selection ends exactly at column 0 of a line, that
/// line is not treated as selected; dragging to the start of the next line
/// should not pull it into block operations.
pub fn selected_lines<T: TextBuffer>(buf: &T, sel: Selection) -> (usize, usize) {
    let first = buf.line_of(sel.start());
    let mut last = buf.line_of(sel.end());
    if last > first && sel.end() == buf.line_start(last) {
        last -= 1;
    }
    (first, last)
}

/// Text of a whole line, without its trailing newline.
pub fn line_text<T: TextBuffer>(buf: &T, line: usize) -> SmolStr {
    buf.slice(buf.line_start(line)..buf.line_end(line))
        .unwrap_or_default()
}

/// Text between the start of the offset's line and the offset itself.
pub fn segment_before<T: TextBuffer>(buf: &T, offset: usize) -> SmolStr {
    let line = buf.line_of(offset);
    buf.slice(buf.line_start(line)..offset).unwrap_or_default()
}

/// Text between the offset and the end of its line.
pub fn segment_after<T: TextBuffer>(buf: &T, offset: usize) -> SmolStr {
    let line = buf.line_of(offset);
    let end = buf.line_end(line).max(offset);
    buf.slice(offset..end).unwrap_or_default()
}

/// Trailing run of non-whitespace chars of a segment.
pub fn trailing_word(segment: &str) -> &str {
    let cut = segment
        .rfind(char::is_whitespace)
        .map(|i| i + segment[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    &segment[cut..]
}

/// Leading run of non-whitespace chars of a segment.
pub fn leading_word(segment: &str) -> &str {
    let cut = segment.find(char::is_whitespace).unwrap_or(segment.len());
    &segment[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditorRope;

    #[test]
    fn test_selected_lines() {
        let buf = EditorRope::from_str("aa\nbb\ncc");
        assert_eq!(selected_lines(&buf, Selection::new(0, 8)), (0, 2));
        assert_eq!(selected_lines(&buf, Selection::new(1, 4)), (0, 1));
        assert_eq!(selected_lines(&buf, Selection::caret(4)), (1, 1));
    }

    #[test]
    fn test_selection_ending_at_column_zero_excludes_line() {
        let buf = EditorRope::from_str("aa\nbb\ncc");
        // end sits at the very start of line 1
        assert_eq!(selected_lines(&buf, Selection::new(0, 3)), (0, 0));
        // a caret at column 0 still belongs to its own line
        assert_eq!(selected_lines(&buf, Selection::caret(3)), (1, 1));
    }

    #[test]
    fn test_segments() {
        let buf = EditorRope::from_str("foo ||bar|| baz\nnext");
        assert_eq!(segment_before(&buf, 6).as_str(), "foo ||");
        assert_eq!(segment_after(&buf, 9).as_str(), "|| baz");
        assert_eq!(line_text(&buf, 1).as_str(), "next");
    }

    #[test]
    fn test_word_runs() {
        assert_eq!(trailing_word("foo ||"), "||");
        assert_eq!(trailing_word("||"), "||");
        assert_eq!(trailing_word("foo "), "");
        assert_eq!(leading_word("|| baz"), "||");
        assert_eq!(leading_word(" baz"), "");
        assert_eq!(leading_word(""), "");
    }
}
