//! Symmetric enabling and disabling of Markdown constructs around a
//! selection.
//!
//! The engine never mutates the caller's buffer: it computes a full
//! replacement text plus a re-anchored selection covering the same logical
//! content, and the caller applies it. Disabling assumes the buffer is
//! well-formed for the construct being removed (the classifier said so);
//! a malformed buffer leaves text and selection untouched.

use tracing::debug;

use crate::classify::active_construct;
use crate::construct::{
    AdmonitionKind, ConstructKind, ALIGN_CLOSE_CENTER, ALIGN_CLOSE_RIGHT, ALIGN_OPEN,
    BLOCK_PREFIX, CHECKLIST_PREFIX,
};
use crate::error::EngineError;
use crate::lines::LineShifter;
use crate::text::{EditorRope, TextBuffer};
use crate::text_helpers::{line_text, selected_lines};
use crate::types::Selection;

/// Replacement buffer text and re-anchored selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub text: String,
    pub selection: Selection,
}

/// Toggle a construct, classifying the current selection state first.
pub fn toggle_construct<T: TextBuffer>(
    buf: &T,
    sel: Selection,
    target: ConstructKind,
) -> Result<ToggleOutcome, EngineError> {
    let verdict = active_construct(buf, sel);
    apply_toggle(buf, sel, target, verdict)
}

/// Toggle a construct with a caller-supplied classifier verdict.
///
/// Disables when the verdict names the target, enables otherwise. The
/// verdict is a parameter so callers tracking construct state themselves
/// (toolbar buttons) can force either leg, including cases the classifier
/// cannot see such as display math away from its line anchors.
pub fn apply_toggle<T: TextBuffer>(
    buf: &T,
    sel: Selection,
    target: ConstructKind,
    verdict: Option<ConstructKind>,
) -> Result<ToggleOutcome, EngineError> {
    check_bounds(buf, sel)?;
    let mut work = EditorRope::from_str(&buf.to_string());
    let disable = verdict == Some(target);
    let selection = if disable {
        disable_construct(&mut work, sel, target)
    } else {
        enable_construct(&mut work, sel, target)
    };
    debug!(?target, disable, "toggled construct");
    Ok(ToggleOutcome {
        text: work.to_string(),
        selection,
    })
}

/// Prefix every selected line with `N. `, numbering from 1 by position in
/// the range regardless of any digits already in the text.
pub fn number_lines<T: TextBuffer>(
    buf: &T,
    sel: Selection,
) -> Result<ToggleOutcome, EngineError> {
    check_bounds(buf, sel)?;
    let mut work = EditorRope::from_str(&buf.to_string());
    let (first, last) = selected_lines(&work, sel);
    let inserted = LineShifter::new(&mut work).number_lines(first, last);
    Ok(ToggleOutcome {
        text: work.to_string(),
        selection: Selection::new(sel.start(), sel.end() + inserted),
    })
}

fn check_bounds<T: TextBuffer>(buf: &T, sel: Selection) -> Result<(), EngineError> {
    if sel.end() > buf.len_chars() {
        return Err(EngineError::SelectionOutOfBounds {
            start: sel.start(),
            end: sel.end(),
            len: buf.len_chars(),
        });
    }
    Ok(())
}

fn enable_construct(work: &mut EditorRope, sel: Selection, target: ConstructKind) -> Selection {
    let (start, end) = (sel.start(), sel.end());
    if let Some(delim) = target.inline_delimiter() {
        let width = delim.chars().count();
        // End marker first so the start offset stays valid.
        work.insert(end, delim);
        work.insert(start, delim);
        return Selection::new(start + width, end + width);
    }
    match target {
        ConstructKind::AlignCenter | ConstructKind::AlignRight => {
            let close = if target == ConstructKind::AlignCenter {
                ALIGN_CLOSE_CENTER
            } else {
                ALIGN_CLOSE_RIGHT
            };
            let line = work.line_of(start);
            work.insert(work.line_end(line), close);
            work.insert(work.line_start(line), ALIGN_OPEN);
            let shift = ALIGN_OPEN.chars().count();
            Selection::new(start + shift, end + shift)
        }
        ConstructKind::Admonition(kind) => enable_admonition(work, sel, kind),
        ConstructKind::Checklist => {
            let (first, last) = selected_lines(work, sel);
            let inserted = LineShifter::new(work).prefix_lines(first, last, CHECKLIST_PREFIX);
            Selection::new(start, end + inserted)
        }
        _ => sel,
    }
}

fn enable_admonition(work: &mut EditorRope, sel: Selection, kind: AdmonitionKind) -> Selection {
    let (start, end) = (sel.start(), sel.end());
    let (first, last) = selected_lines(work, sel);
    let line_count = last - first + 1;
    let prefix_width = BLOCK_PREFIX.chars().count();

    let mut shifter = LineShifter::new(work);
    let marker_len = shifter.insert_line(first, kind.marker());
    // Content lines sit one index lower after the marker insert.
    shifter.prefix_lines(first + 1, last + 1, BLOCK_PREFIX);

    Selection::new(
        start + marker_len + prefix_width,
        end + marker_len + prefix_width * line_count,
    )
}

fn disable_construct(work: &mut EditorRope, sel: Selection, target: ConstructKind) -> Selection {
    if let Some(delim) = target.inline_delimiter() {
        return disable_inline(work, sel, delim);
    }
    match target {
        ConstructKind::AlignCenter | ConstructKind::AlignRight => {
            disable_align(work, sel, target)
        }
        ConstructKind::Admonition(_) => disable_admonition(work, sel),
        ConstructKind::Checklist => disable_checklist(work, sel),
        _ => sel,
    }
}

/// Remove the delimiter occurrence nearest before the selection start and
/// the one nearest after the selection end, on their respective lines.
///
/// A candidate immediately followed by another delimiter of the same kind
/// is skipped; with three or more occurrences on one line the
/// nearest-match policy is otherwise kept as is, ambiguity included.
fn disable_inline(work: &mut EditorRope, sel: Selection, delim: &str) -> Selection {
    let (start, end) = (sel.start(), sel.end());
    let width = delim.chars().count();

    let start_line = work.line_of(start);
    let end_line = work.line_of(end);
    let start_base = work.line_start(start_line);
    let end_base = work.line_start(end_line);
    let start_text = line_text(work, start_line);
    let end_text = line_text(work, end_line);

    let before = delimiter_occurrences(&start_text, delim)
        .into_iter()
        .filter(|&pos| pos + width <= start - start_base)
        .next_back();
    let after = delimiter_occurrences(&end_text, delim)
        .into_iter()
        .find(|&pos| pos >= end - end_base);

    let (Some(before), Some(after)) = (before, after) else {
        // Malformed for this construct; leave everything untouched.
        return sel;
    };

    let after_abs = end_base + after;
    let before_abs = start_base + before;
    work.delete(after_abs..after_abs + width);
    work.delete(before_abs..before_abs + width);
    Selection::new(start - width, end - width)
}

/// Char positions of delimiter occurrences in a line, excluding any that
/// is immediately followed by another occurrence of the same delimiter.
fn delimiter_occurrences(line: &str, delim: &str) -> Vec<usize> {
    line.match_indices(delim)
        .filter(|(byte, _)| !line[byte + delim.len()..].starts_with(delim))
        .map(|(byte, _)| line[..byte].chars().count())
        .collect()
}

fn disable_align(work: &mut EditorRope, sel: Selection, target: ConstructKind) -> Selection {
    let (start, end) = (sel.start(), sel.end());
    let close = if target == ConstructKind::AlignCenter {
        ALIGN_CLOSE_CENTER
    } else {
        ALIGN_CLOSE_RIGHT
    };
    let line = work.line_of(start);
    let text = line_text(work, line);

    if text.ends_with(close) {
        let line_end = work.line_end(line);
        work.delete(line_end - close.chars().count()..line_end);
    }
    if line_text(work, line).starts_with(ALIGN_OPEN) {
        let line_start = work.line_start(line);
        let width = ALIGN_OPEN.chars().count();
        work.delete(line_start..line_start + width);
        return Selection::new(start - width, end - width);
    }
    Selection::new(start, end)
}

fn disable_admonition(work: &mut EditorRope, sel: Selection) -> Selection {
    let (first, last) = selected_lines(work, sel);
    if first == 0 {
        // No room for a marker line above; malformed.
        return sel;
    }
    let prefix_width = BLOCK_PREFIX.chars().count();

    let mut shifter = LineShifter::new(work);
    let marker_len = shifter.remove_line(first - 1);
    let stripped =
        shifter.strip_lines(first - 1, last - 1, prefix_width, |line| {
            line.starts_with(BLOCK_PREFIX)
        });

    Selection::new(
        work.line_start(first - 1),
        sel.end() - marker_len - prefix_width * stripped,
    )
}

fn disable_checklist(work: &mut EditorRope, sel: Selection) -> Selection {
    let (first, last) = selected_lines(work, sel);
    let width = CHECKLIST_PREFIX.chars().count();
    let stripped = LineShifter::new(work).strip_lines(first, last, width, |line| {
        let bytes = line.as_bytes();
        bytes.len() >= 6 && bytes.starts_with(b"- [") && bytes[4] == b']' && bytes[5] == b' '
    });
    Selection::new(sel.start(), sel.end() - width * stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rope(text: &str) -> EditorRope {
        EditorRope::from_str(text)
    }

    #[test]
    fn test_keyboard_disable_reanchors_content() {
        let buf = rope("foo ||bar|| baz");
        let out = toggle_construct(&buf, Selection::new(6, 9), ConstructKind::Keyboard).unwrap();
        assert_eq!(out.text, "foo bar baz");
        assert_eq!(out.selection, Selection::new(4, 7));
        assert_eq!(&out.text[4..7], "bar");
    }

    #[test]
    fn test_keyboard_enable() {
        let buf = rope("foo bar baz");
        let out = toggle_construct(&buf, Selection::new(4, 7), ConstructKind::Keyboard).unwrap();
        assert_eq!(out.text, "foo ||bar|| baz");
        assert_eq!(out.selection, Selection::new(6, 9));
    }

    #[test]
    fn test_checklist_enable() {
        let buf = rope("a\nb");
        let out = toggle_construct(&buf, Selection::new(0, 3), ConstructKind::Checklist).unwrap();
        assert_eq!(out.text, "- [ ] a\n- [ ] b");
        assert_eq!(out.selection, Selection::new(0, 15));
    }

    #[test]
    fn test_checklist_disable_handles_checked_boxes() {
        let buf = rope("- [ ] a\n- [x] b");
        let out = toggle_construct(&buf, Selection::new(0, 15), ConstructKind::Checklist).unwrap();
        assert_eq!(out.text, "a\nb");
        assert_eq!(out.selection, Selection::new(0, 3));
    }

    #[test]
    fn test_admonition_round_trip() {
        let buf = rope("x\ny");
        let target = ConstructKind::Admonition(AdmonitionKind::Information);
        let enabled = toggle_construct(&buf, Selection::new(0, 3), target).unwrap();
        assert_eq!(enabled.text, "[[information]]\n| x\n| y");
        assert_eq!(enabled.selection, Selection::new(18, 23));

        let buf = rope(&enabled.text);
        let disabled = toggle_construct(&buf, enabled.selection, target).unwrap();
        assert_eq!(disabled.text, "x\ny");
        assert_eq!(disabled.selection, Selection::new(0, 3));
    }

    #[test]
    fn test_neutral_admonition_marker() {
        let buf = rope("contenu");
        let target = ConstructKind::Admonition(AdmonitionKind::Neutral);
        let out = toggle_construct(&buf, Selection::new(0, 7), target).unwrap();
        assert_eq!(out.text, "[[neutre|Titre]]\n| contenu");
        assert_eq!(out.selection, Selection::new(19, 26));
    }

    #[test]
    fn test_align_round_trip() {
        let buf = rope("pushed");
        let enabled =
            toggle_construct(&buf, Selection::new(0, 6), ConstructKind::AlignRight).unwrap();
        assert_eq!(enabled.text, "-> pushed ->");
        assert_eq!(enabled.selection, Selection::new(3, 9));

        let buf = rope(&enabled.text);
        let disabled =
            toggle_construct(&buf, enabled.selection, ConstructKind::AlignRight).unwrap();
        assert_eq!(disabled.text, "pushed");
        assert_eq!(disabled.selection, Selection::new(0, 6));
    }

    #[test]
    fn test_wrap_kinds_round_trip_through_classifier() {
        let kinds = [
            ConstructKind::Bold,
            ConstructKind::Italic,
            ConstructKind::Strike,
            ConstructKind::Superscript,
            ConstructKind::Subscript,
            ConstructKind::Keyboard,
            ConstructKind::CodeInline,
        ];
        for kind in kinds {
            let buf = rope("one two three");
            let sel = Selection::new(4, 7);
            let enabled = toggle_construct(&buf, sel, kind).unwrap();
            let buf = rope(&enabled.text);
            let disabled = toggle_construct(&buf, enabled.selection, kind).unwrap();
            assert_eq!(disabled.text, "one two three", "{kind:?}");
            assert_eq!(disabled.selection, sel, "{kind:?}");
        }
    }

    #[test]
    fn test_bold_enable_and_disable_via_verdict() {
        // A caller tracking construct state itself can bypass the
        // classifier and force the disable leg.
        let buf = rope("make it pop");
        let enabled =
            toggle_construct(&buf, Selection::new(5, 7), ConstructKind::Bold).unwrap();
        assert_eq!(enabled.text, "make **it** pop");
        assert_eq!(enabled.selection, Selection::new(7, 9));

        let buf = rope(&enabled.text);
        let disabled = apply_toggle(
            &buf,
            enabled.selection,
            ConstructKind::Bold,
            Some(ConstructKind::Bold),
        )
        .unwrap();
        assert_eq!(disabled.text, "make it pop");
        assert_eq!(disabled.selection, Selection::new(5, 7));
    }

    #[test]
    fn test_toggle_round_trip_every_inline_kind() {
        let kinds = [
            ConstructKind::Bold,
            ConstructKind::Italic,
            ConstructKind::Strike,
            ConstructKind::Superscript,
            ConstructKind::Subscript,
            ConstructKind::Keyboard,
            ConstructKind::CodeInline,
            ConstructKind::Math,
        ];
        for kind in kinds {
            let buf = rope("one two three");
            let sel = Selection::new(4, 7);
            let enabled = apply_toggle(&buf, sel, kind, None).unwrap();
            let buf = rope(&enabled.text);
            let disabled = apply_toggle(&buf, enabled.selection, kind, Some(kind)).unwrap();
            assert_eq!(disabled.text, "one two three", "{kind:?}");
            assert_eq!(disabled.selection, sel, "{kind:?}");
        }
    }

    #[test]
    fn test_toggle_round_trip_every_block_kind() {
        let mut kinds = vec![
            ConstructKind::Checklist,
            ConstructKind::AlignCenter,
            ConstructKind::AlignRight,
        ];
        kinds.extend(AdmonitionKind::ALL.map(ConstructKind::Admonition));
        for kind in kinds {
            let buf = rope("first\nsecond");
            let sel = Selection::new(0, 12);
            let enabled = toggle_construct(&buf, sel, kind).unwrap();
            let buf = rope(&enabled.text);
            let disabled = apply_toggle(&buf, enabled.selection, kind, Some(kind)).unwrap();
            assert_eq!(disabled.text, "first\nsecond", "{kind:?}");
            assert_eq!(disabled.selection, sel, "{kind:?}");
        }
    }

    #[test]
    fn test_inline_disable_nearest_occurrence_policy() {
        // Three backtick pairs on one line: the nearest occurrence on each
        // side of the selection is removed, the rest stay.
        let buf = rope("`a`b`c`");
        let out = apply_toggle(
            &buf,
            Selection::new(3, 4),
            ConstructKind::CodeInline,
            Some(ConstructKind::CodeInline),
        )
        .unwrap();
        assert_eq!(out.text, "`abc`");
        assert_eq!(out.selection, Selection::new(2, 3));
    }

    #[test]
    fn test_inline_disable_without_delimiters_is_noop() {
        let buf = rope("no markers here");
        let out = apply_toggle(
            &buf,
            Selection::new(3, 10),
            ConstructKind::Keyboard,
            Some(ConstructKind::Keyboard),
        )
        .unwrap();
        assert_eq!(out.text, "no markers here");
        assert_eq!(out.selection, Selection::new(3, 10));
    }

    #[test]
    fn test_number_lines_by_position() {
        let buf = rope("9 lives\nbeta\ngamma");
        let out = number_lines(&buf, Selection::new(0, 18)).unwrap();
        assert_eq!(out.text, "1. 9 lives\n2. beta\n3. gamma");
        assert_eq!(out.selection, Selection::new(0, 27));
    }

    #[test]
    fn test_selection_out_of_bounds() {
        let buf = rope("ab");
        let err = toggle_construct(&buf, Selection::new(0, 5), ConstructKind::Bold).unwrap_err();
        assert_eq!(
            err,
            EngineError::SelectionOutOfBounds {
                start: 0,
                end: 5,
                len: 2
            }
        );
        insta::assert_snapshot!(
            err.to_string(),
            @"selection 0..5 out of bounds for buffer of 2 chars"
        );
    }
}
