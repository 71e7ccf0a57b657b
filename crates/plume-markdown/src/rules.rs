//! The ordered dispatch table turning tree nodes into Markdown.
//!
//! Rules are evaluated in the order they appear in `RULES`; the first
//! matching rule produces the node's text and no later rule is consulted.
//! A node no rule matches falls through to generic text extraction in the
//! writer (post-order concatenation of its children).

use crate::embed::rewrite_embed_url;
use crate::tree::{NodeKind, RichNode};
use crate::writer::Serializer;

/// Path fragment identifying bundled smiley assets; inline images under it
/// serialize as their alt text alone.
pub const SMILEY_PATH: &str = "/smileys/";

/// Admonition container classes, in the order the markers are emitted.
pub const ADMONITION_CLASSES: &[&str] =
    &["information", "question", "warning", "error", "spoiler"];

/// One dispatch rule: a predicate over the node and the transform run when
/// it is the first to match.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&RichNode) -> bool,
    pub apply: fn(&mut Serializer, &RichNode) -> String,
}

/// The rule table. Order is semantic: align divs are claimed before
/// admonition divs, quote figures before video figures, and so on.
pub static RULES: &[Rule] = &[
    Rule { name: "line-break", matches: is_line_break, apply: line_break },
    Rule { name: "bold", matches: is_strong, apply: bold },
    Rule { name: "italic", matches: is_emphasis, apply: italic },
    Rule { name: "strike", matches: is_strike, apply: strike },
    Rule { name: "superscript", matches: is_sup, apply: superscript },
    Rule { name: "subscript", matches: is_sub, apply: subscript },
    Rule { name: "abbreviation", matches: is_abbr, apply: abbreviation },
    Rule { name: "keyboard", matches: is_kbd, apply: keyboard },
    Rule { name: "heading", matches: is_heading, apply: heading },
    Rule { name: "unordered-list", matches: is_unordered_list, apply: unordered_list },
    Rule { name: "ordered-list", matches: is_ordered_list, apply: ordered_list },
    Rule { name: "align-div", matches: is_align_div, apply: align_div },
    Rule { name: "quote-figure", matches: is_quote_figure, apply: quote_figure },
    Rule { name: "image-figure", matches: is_image_figure, apply: image_figure },
    Rule { name: "inline-image", matches: is_image, apply: inline_image },
    Rule { name: "link", matches: is_link, apply: link },
    Rule { name: "admonition", matches: is_admonition, apply: admonition },
    Rule { name: "code-inline", matches: is_code_inline, apply: code_inline },
    Rule { name: "code-table", matches: is_code_table, apply: code_table },
    Rule { name: "math", matches: is_math, apply: math },
    Rule { name: "video-figure", matches: is_video_figure, apply: video_figure },
    Rule { name: "iframe", matches: is_iframe, apply: iframe },
    Rule { name: "horizontal-rule", matches: is_hr, apply: horizontal_rule },
    Rule { name: "paragraph", matches: is_paragraph, apply: paragraph },
];

// === Predicates ===

fn is_line_break(n: &RichNode) -> bool {
    n.kind == NodeKind::LineBreak
}

fn is_strong(n: &RichNode) -> bool {
    n.kind == NodeKind::Strong
}

fn is_emphasis(n: &RichNode) -> bool {
    n.kind == NodeKind::Emphasis
}

fn is_strike(n: &RichNode) -> bool {
    n.kind == NodeKind::Strike
}

fn is_sup(n: &RichNode) -> bool {
    n.kind == NodeKind::Sup
}

fn is_sub(n: &RichNode) -> bool {
    n.kind == NodeKind::Sub
}

fn is_abbr(n: &RichNode) -> bool {
    n.kind == NodeKind::Abbr
}

fn is_kbd(n: &RichNode) -> bool {
    n.kind == NodeKind::Kbd
}

fn is_heading(n: &RichNode) -> bool {
    matches!(n.kind, NodeKind::Heading(3..=6))
}

fn is_unordered_list(n: &RichNode) -> bool {
    n.kind == NodeKind::UnorderedList
}

fn is_ordered_list(n: &RichNode) -> bool {
    n.kind == NodeKind::OrderedList
}

fn is_align_div(n: &RichNode) -> bool {
    n.kind == NodeKind::Div && matches!(n.attr("align"), Some("center") | Some("right"))
}

fn is_quote_figure(n: &RichNode) -> bool {
    n.kind == NodeKind::Figure
        && n.find_child(&NodeKind::Blockquote).is_some()
        && n.find_child(&NodeKind::Caption).is_some()
}

fn is_image_figure(n: &RichNode) -> bool {
    n.kind == NodeKind::Figure
        && n.find_child(&NodeKind::Image).is_some()
        && n.find_child(&NodeKind::Caption).is_some()
}

fn is_image(n: &RichNode) -> bool {
    n.kind == NodeKind::Image
}

fn is_link(n: &RichNode) -> bool {
    n.kind == NodeKind::Link
}

fn is_admonition(n: &RichNode) -> bool {
    n.kind == NodeKind::Div && ADMONITION_CLASSES.iter().any(|c| n.has_class(c))
}

fn is_code_inline(n: &RichNode) -> bool {
    n.kind == NodeKind::CodeInline
}

fn is_code_table(n: &RichNode) -> bool {
    n.kind == NodeKind::CodeTable
}

fn is_math(n: &RichNode) -> bool {
    n.kind == NodeKind::Math
}

fn is_video_figure(n: &RichNode) -> bool {
    n.kind == NodeKind::Figure
        && n.find_child(&NodeKind::Iframe).is_some()
        && n.find_child(&NodeKind::Caption).is_some()
}

fn is_iframe(n: &RichNode) -> bool {
    n.kind == NodeKind::Iframe
}

fn is_hr(n: &RichNode) -> bool {
    n.kind == NodeKind::HorizontalRule
}

fn is_paragraph(n: &RichNode) -> bool {
    n.kind == NodeKind::Paragraph
}

// === Transforms ===

fn line_break(_s: &mut Serializer, _n: &RichNode) -> String {
    "  \n".to_string()
}

fn bold(s: &mut Serializer, n: &RichNode) -> String {
    s.wrap_inline(n, "**")
}

fn italic(s: &mut Serializer, n: &RichNode) -> String {
    s.wrap_inline(n, "*")
}

fn strike(s: &mut Serializer, n: &RichNode) -> String {
    s.wrap_inline(n, "~~")
}

fn superscript(s: &mut Serializer, n: &RichNode) -> String {
    s.wrap_inline(n, "^")
}

fn subscript(s: &mut Serializer, n: &RichNode) -> String {
    s.wrap_inline(n, "~")
}

fn abbreviation(s: &mut Serializer, n: &RichNode) -> String {
    let word = n.flat_text();
    if let Some(title) = n.attr("title") {
        if !title.is_empty() {
            s.register_footnote(&word, title);
        }
    }
    word
}

fn keyboard(s: &mut Serializer, n: &RichNode) -> String {
    s.wrap_inline(n, "||")
}

fn heading(s: &mut Serializer, n: &RichNode) -> String {
    let NodeKind::Heading(level) = n.kind else {
        return String::new();
    };
    let body = s.render_children(n);
    format!("\n{} {}", "#".repeat(level as usize - 2), body)
}

fn unordered_list(s: &mut Serializer, n: &RichNode) -> String {
    let mut out = String::new();
    for child in &n.children {
        if child.kind == NodeKind::ListItem {
            let body = s.render_children(child);
            out.push_str("\n- ");
            out.push_str(body.trim_start_matches('\n'));
        } else {
            out.push_str(&s.render(child));
        }
    }
    out
}

fn ordered_list(s: &mut Serializer, n: &RichNode) -> String {
    // Item numbers are assigned once over the whole list, by 1-based
    // position among the list-item children.
    let mut out = String::new();
    let mut position = 0usize;
    for child in &n.children {
        if child.kind == NodeKind::ListItem {
            position += 1;
            let body = s.render_children(child);
            out.push('\n');
            out.push_str(&position.to_string());
            out.push_str(". ");
            out.push_str(body.trim_start_matches('\n'));
        } else {
            out.push_str(&s.render(child));
        }
    }
    out
}

fn align_div(s: &mut Serializer, n: &RichNode) -> String {
    let body = s.render_children(n);
    let body = body.trim();
    match n.attr("align") {
        Some("center") => format!("\n-> {body} <-"),
        Some("right") => format!("\n-> {body} ->"),
        _ => String::new(),
    }
}

fn quote_figure(s: &mut Serializer, n: &RichNode) -> String {
    let Some(quote) = n.find_child(&NodeKind::Blockquote) else {
        return String::new();
    };
    let caption = n
        .find_child(&NodeKind::Caption)
        .map(|c| c.flat_text())
        .unwrap_or_default();
    let body = s.render_children(quote);
    let body = body.trim_matches('\n');

    let mut out = String::new();
    for line in body.split('\n') {
        out.push_str("\n> ");
        out.push_str(line);
    }
    out.push_str("\nSource:");
    out.push_str(caption.trim());
    out
}

fn image_figure(_s: &mut Serializer, n: &RichNode) -> String {
    let src = n
        .find_child(&NodeKind::Image)
        .and_then(|img| img.attr("src"))
        .unwrap_or_default();
    let caption = n
        .find_child(&NodeKind::Caption)
        .map(|c| c.flat_text())
        .unwrap_or_default();
    format!("![{}]({})", caption.trim(), src)
}

fn inline_image(_s: &mut Serializer, n: &RichNode) -> String {
    let alt = n.attr("alt").unwrap_or_default();
    let src = n.attr("src").unwrap_or_default();
    if src.contains(SMILEY_PATH) {
        return alt.to_string();
    }
    format!("![{alt}]({src})")
}

fn link(_s: &mut Serializer, n: &RichNode) -> String {
    if n.has_class("spoiler-title") {
        return String::new();
    }
    let text = n.flat_text();
    let href = n.attr("href").unwrap_or_default();
    if href.is_empty() {
        return text;
    }
    if text.trim() == href {
        return href.to_string();
    }
    format!("[{text}]({href})")
}

fn admonition(s: &mut Serializer, n: &RichNode) -> String {
    let kind = ADMONITION_CLASSES
        .iter()
        .find(|c| n.has_class(c))
        .copied()
        .unwrap_or("information");
    let body = s.render_children(n);
    // Each child paragraph arrives with its leading newline; the first one
    // is dropped so the marker line is followed directly by content.
    let body = body.strip_prefix('\n').unwrap_or(&body);

    let mut out = format!("\n[[{kind}]]");
    for line in body.split('\n') {
        out.push_str("\n| ");
        out.push_str(line);
    }
    out
}

fn code_inline(_s: &mut Serializer, n: &RichNode) -> String {
    format!("`{}`", n.flat_text())
}

fn code_table(_s: &mut Serializer, n: &RichNode) -> String {
    let cell = n
        .find_descendant(&|c| c.has_class("code"))
        .unwrap_or(n);
    let raw = cell.flat_text();
    let raw = raw.trim_end_matches('\n');
    if raw.lines().count() <= 2 {
        let mut out = String::new();
        for line in raw.split('\n') {
            out.push_str("\n    ");
            out.push_str(line);
        }
        out
    } else {
        format!("\n```\n{raw}\n```")
    }
}

fn math(_s: &mut Serializer, n: &RichNode) -> String {
    format!("${}$", n.flat_text().trim())
}

fn video_figure(s: &mut Serializer, n: &RichNode) -> String {
    let player = n
        .find_child(&NodeKind::Iframe)
        .map(|p| s.render(p))
        .unwrap_or_default();
    let caption = n
        .find_child(&NodeKind::Caption)
        .map(|c| c.flat_text())
        .unwrap_or_default();
    format!("{player}\nVideo:{}", caption.trim())
}

fn iframe(_s: &mut Serializer, n: &RichNode) -> String {
    // Unknown embed providers are dropped silently.
    n.attr("src")
        .and_then(rewrite_embed_url)
        .unwrap_or_default()
}

fn horizontal_rule(_s: &mut Serializer, _n: &RichNode) -> String {
    "\n\n------\n\n".to_string()
}

fn paragraph(s: &mut Serializer, n: &RichNode) -> String {
    format!("\n{}", s.render_children(n))
}
