//! The typed content tree consumed by the serializer.
//!
//! A `RichNode` mirrors the shape of a DOM element: a kind discriminator,
//! a string attribute map, ordered children, and optional text. Trees are
//! built by the caller per conversion call and discarded afterwards; the
//! serializer never mutates them.

use std::collections::BTreeMap;

use smol_str::SmolStr;

/// Closed set of node kinds the rule table dispatches on.
///
/// Anything the editing surface cannot classify arrives as `Other` and
/// falls through to generic text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    LineBreak,
    Paragraph,
    Strong,
    Emphasis,
    Strike,
    Sup,
    Sub,
    Abbr,
    Kbd,
    Heading(u8),
    OrderedList,
    UnorderedList,
    ListItem,
    Div,
    Blockquote,
    Caption,
    Figure,
    Image,
    Link,
    CodeInline,
    CodeTable,
    Math,
    Iframe,
    HorizontalRule,
    Other(SmolStr),
}

/// A node in the rich-content tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichNode {
    pub kind: NodeKind,
    pub attrs: BTreeMap<SmolStr, SmolStr>,
    pub children: Vec<RichNode>,
    pub text: Option<String>,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Text
    }
}

impl RichNode {
    /// Create an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            attrs: BTreeMap::new(),
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Builder: set the children.
    pub fn with_children(mut self, children: Vec<RichNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder: set direct text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|v| v.as_str())
    }

    /// Check whether the whitespace-separated `class` attribute contains
    /// the given class name.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Whether this node is a plain text node.
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Flattened text content of the whole subtree, in document order.
    pub fn flat_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First child of the given kind, if any.
    pub fn find_child(&self, kind: &NodeKind) -> Option<&RichNode> {
        self.children.iter().find(|c| &c.kind == kind)
    }

    /// First node of the given kind anywhere in the subtree.
    pub fn find_descendant(&self, pred: &dyn Fn(&RichNode) -> bool) -> Option<&RichNode> {
        if pred(self) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|c| c.find_descendant(pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_text() {
        let node = RichNode::new(NodeKind::Strong).with_children(vec![
            RichNode::text("a"),
            RichNode::new(NodeKind::Emphasis).with_children(vec![RichNode::text("b")]),
            RichNode::text("c"),
        ]);
        assert_eq!(node.flat_text(), "abc");
    }

    #[test]
    fn test_has_class() {
        let node = RichNode::new(NodeKind::Div).with_attr("class", "information custom-block");
        assert!(node.has_class("information"));
        assert!(node.has_class("custom-block"));
        assert!(!node.has_class("info"));

        let bare = RichNode::new(NodeKind::Div);
        assert!(!bare.has_class("information"));
    }

    #[test]
    fn test_find_descendant() {
        let tree = RichNode::new(NodeKind::Figure).with_children(vec![
            RichNode::new(NodeKind::Blockquote)
                .with_children(vec![RichNode::new(NodeKind::Paragraph)]),
            RichNode::new(NodeKind::Caption),
        ]);
        let found = tree.find_descendant(&|n| n.kind == NodeKind::Paragraph);
        assert!(found.is_some());
        assert!(tree
            .find_descendant(&|n| n.kind == NodeKind::Iframe)
            .is_none());
    }
}
