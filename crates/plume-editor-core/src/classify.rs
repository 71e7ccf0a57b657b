//! Selection state classification.
//!
//! Given a buffer and a selection, report the single Markdown construct
//! currently wrapping it, if any. Checks run as a fixed-priority decision
//! tree so a later form never fires on text already claimed by an earlier
//! one: same-line inline delimiters, then same-line bracket pairs, then
//! admonition blocks, then checklists.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::construct::{AdmonitionKind, ConstructKind, BLOCK_PREFIX};
use crate::text::TextBuffer;
use crate::text_helpers::{
    leading_word, line_text, segment_after, segment_before, selected_lines, trailing_word,
};
use crate::types::Selection;

/// Inline delimiters the classifier recognizes, in test order. Longer
/// delimiters sit strictly before their prefixes (`**` before `*`, `~~`
/// before `~`).
const INLINE_DELIMITERS: &[(&str, ConstructKind)] = &[
    ("||", ConstructKind::Keyboard),
    ("`", ConstructKind::CodeInline),
    ("**", ConstructKind::Bold),
    ("~~", ConstructKind::Strike),
    ("*", ConstructKind::Italic),
    ("~", ConstructKind::Subscript),
    ("^", ConstructKind::Superscript),
];

static ALIGN_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^->\s*").unwrap());
static ALIGN_AFTER_RIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*->$").unwrap());
static ALIGN_AFTER_CENTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*<-$").unwrap());
static MATH_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\$\s*").unwrap());
static MATH_AFTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\$\$$").unwrap());
static ADMONITION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[([a-z]+)(?:\|[^\]]*)?\]\]\s*$").unwrap());
static CHECKLIST_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- \[.\]\s*").unwrap());

/// Report the construct wrapping the selection, if any.
///
/// A selection that does not fit the buffer reports nothing.
pub fn active_construct<T: TextBuffer>(buf: &T, sel: Selection) -> Option<ConstructKind> {
    if sel.end() > buf.len_chars() {
        return None;
    }

    let found = inline_construct(buf, sel)
        .or_else(|| bracket_construct(buf, sel))
        .or_else(|| admonition_construct(buf, sel))
        .or_else(|| checklist_construct(buf, sel));
    trace!(?found, start = sel.start(), end = sel.end(), "classified selection");
    found
}

/// Step 1: symmetric delimiters flush against the selection, on one line.
fn inline_construct<T: TextBuffer>(buf: &T, sel: Selection) -> Option<ConstructKind> {
    if buf.line_of(sel.start()) != buf.line_of(sel.end()) {
        return None;
    }
    let before = segment_before(buf, sel.start());
    let after = segment_after(buf, sel.end());
    let opening = trailing_word(&before);
    let closing = leading_word(&after);

    INLINE_DELIMITERS
        .iter()
        .find(|(delim, _)| opening.ends_with(delim) && closing.starts_with(delim))
        .map(|&(_, kind)| kind)
}

/// Step 2: asymmetric same-line bracket pairs (alignment, display math).
fn bracket_construct<T: TextBuffer>(buf: &T, sel: Selection) -> Option<ConstructKind> {
    if buf.line_of(sel.start()) != buf.line_of(sel.end()) {
        return None;
    }
    let before = segment_before(buf, sel.start());
    let after = segment_after(buf, sel.end());

    if ALIGN_BEFORE.is_match(&before) {
        if ALIGN_AFTER_CENTER.is_match(&after) {
            return Some(ConstructKind::AlignCenter);
        }
        if ALIGN_AFTER_RIGHT.is_match(&after) {
            return Some(ConstructKind::AlignRight);
        }
    }
    if MATH_BEFORE.is_match(&before) && MATH_AFTER.is_match(&after) {
        return Some(ConstructKind::Math);
    }
    None
}

/// Step 3: admonition block, keyed off the marker line above the selection.
fn admonition_construct<T: TextBuffer>(buf: &T, sel: Selection) -> Option<ConstructKind> {
    if sel.is_caret() {
        return None;
    }
    let (first, last) = selected_lines(buf, sel);
    if first == 0 {
        return None;
    }
    let marker = line_text(buf, first - 1);
    let caps = ADMONITION_MARKER.captures(&marker)?;
    let kind = AdmonitionKind::from_token(&caps[1])?;

    for line in first..=last {
        let text = line_text(buf, line);
        if !text.is_empty() && !text.starts_with(BLOCK_PREFIX) {
            return None;
        }
    }
    Some(ConstructKind::Admonition(kind))
}

/// Step 4: checklist, every selected line a checkbox or empty.
fn checklist_construct<T: TextBuffer>(buf: &T, sel: Selection) -> Option<ConstructKind> {
    if sel.is_caret() {
        return None;
    }
    let (first, last) = selected_lines(buf, sel);
    for line in first..=last {
        let text = line_text(buf, line);
        if !text.is_empty() && !CHECKLIST_LINE.is_match(&text) {
            return None;
        }
    }
    Some(ConstructKind::Checklist)
}
