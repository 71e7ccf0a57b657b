//! The serialization fold and document post-processing.

use tracing::{debug, trace};

use crate::footnotes::FootnoteTable;
use crate::rules::RULES;
use crate::tree::{NodeKind, RichNode};

/// Mutable serialization state threaded through the rule transforms.
///
/// The tree itself is never modified; the only accumulated state is the
/// abbreviation footnote table.
#[derive(Debug, Default)]
pub struct Serializer {
    footnotes: FootnoteTable,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a node through the first matching rule, or fall back to
    /// generic text extraction.
    pub fn render(&mut self, node: &RichNode) -> String {
        for rule in RULES {
            if (rule.matches)(node) {
                trace!(rule = rule.name, "rule matched");
                return (rule.apply)(self, node);
            }
        }
        self.render_children(node)
    }

    /// Concatenate the rendered children, falling back to the node's own
    /// text when it has none.
    pub fn render_children(&mut self, node: &RichNode) -> String {
        if node.children.is_empty() {
            return node.text.clone().unwrap_or_default();
        }
        let mut out = String::new();
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for child in &node.children {
            out.push_str(&self.render(child));
        }
        out
    }

    /// Wrap an inline formatting node in its delimiter.
    ///
    /// A node with only text content wraps its flattened text. A node with
    /// element children instead emits its text pieces verbatim and wraps
    /// each element child's flattened text in this node's delimiter, so
    /// nested emphasis does not stack delimiters.
    pub fn wrap_inline(&mut self, node: &RichNode, delim: &str) -> String {
        let has_element_children = node.children.iter().any(|c| !c.is_text());
        if !has_element_children {
            return format!("{delim}{}{delim}", node.flat_text());
        }
        let mut out = String::new();
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for child in &node.children {
            if child.is_text() {
                out.push_str(child.text.as_deref().unwrap_or_default());
            } else {
                out.push_str(delim);
                out.push_str(&child.flat_text());
                out.push_str(delim);
            }
        }
        out
    }

    /// Record an abbreviation for the trailing footnote block.
    pub fn register_footnote(&mut self, word: &str, definition: &str) {
        self.footnotes.register(word, definition);
    }

    pub fn footnotes(&self) -> &FootnoteTable {
        &self.footnotes
    }
}

/// Serialize a content tree to Markdown.
///
/// Runs the rule fold over the root, then applies document-level fixups:
/// the leading newline of an initial paragraph is stripped, stray
/// hard-break artifacts (`\n  \n`) collapse to blank lines, and collected
/// abbreviation footnotes are appended.
pub fn to_markdown(root: &RichNode) -> String {
    let mut ser = Serializer::new();
    let mut out = ser.render(root);

    if starts_with_paragraph(root) {
        if let Some(stripped) = out.strip_prefix('\n') {
            out = stripped.to_string();
        }
    }
    while out.contains("\n  \n") {
        out = out.replace("\n  \n", "\n\n");
    }
    out.push_str(&ser.footnotes.render_trailing());

    debug!(
        chars = out.chars().count(),
        footnotes = ser.footnotes.len(),
        "serialized content tree"
    );
    out
}

/// Whether the document opens with a paragraph, ignoring leading
/// whitespace-only text nodes.
fn starts_with_paragraph(root: &RichNode) -> bool {
    if root.kind == NodeKind::Paragraph {
        return true;
    }
    for child in &root.children {
        if child.is_text()
            && child
                .text
                .as_deref()
                .map(|t| t.trim().is_empty())
                .unwrap_or(true)
        {
            continue;
        }
        return child.kind == NodeKind::Paragraph;
    }
    false
}
