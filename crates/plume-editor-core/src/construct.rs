//! The closed set of toggleable Markdown constructs.
//!
//! A single-valued enum keeps "at most one active construct per selection"
//! structural: the classifier returns one `ConstructKind` or nothing, never
//! a bag of flags.

use std::fmt;

/// Callout flavor of an admonition block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdmonitionKind {
    Information,
    Question,
    Warning,
    Error,
    Secret,
    Neutral,
}

impl AdmonitionKind {
    pub const ALL: [AdmonitionKind; 6] = [
        AdmonitionKind::Information,
        AdmonitionKind::Question,
        AdmonitionKind::Warning,
        AdmonitionKind::Error,
        AdmonitionKind::Secret,
        AdmonitionKind::Neutral,
    ];

    /// The bracket-marker token, as written in the buffer.
    pub fn token(self) -> &'static str {
        match self {
            AdmonitionKind::Information => "information",
            AdmonitionKind::Question => "question",
            AdmonitionKind::Warning => "attention",
            AdmonitionKind::Error => "erreur",
            AdmonitionKind::Secret => "secret",
            AdmonitionKind::Neutral => "neutre",
        }
    }

    /// Full marker line inserted on enable. The neutral flavor carries a
    /// placeholder title after the separator.
    pub fn marker(self) -> &'static str {
        match self {
            AdmonitionKind::Information => "[[information]]",
            AdmonitionKind::Question => "[[question]]",
            AdmonitionKind::Warning => "[[attention]]",
            AdmonitionKind::Error => "[[erreur]]",
            AdmonitionKind::Secret => "[[secret]]",
            AdmonitionKind::Neutral => "[[neutre|Titre]]",
        }
    }

    /// Parse a marker token back to its kind.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.token() == token)
    }
}

impl fmt::Display for AdmonitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A Markdown formatting construct that can be toggled around a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Bold,
    Italic,
    Strike,
    Superscript,
    Subscript,
    Keyboard,
    CodeInline,
    Math,
    AlignCenter,
    AlignRight,
    Checklist,
    Admonition(AdmonitionKind),
}

/// Prefix added to each content line of an admonition block.
pub const BLOCK_PREFIX: &str = "| ";

/// Prefix added to each line of a checklist.
pub const CHECKLIST_PREFIX: &str = "- [ ] ";

/// Leading marker of an aligned line.
pub const ALIGN_OPEN: &str = "-> ";

/// Trailing marker of a centered line.
pub const ALIGN_CLOSE_CENTER: &str = " <-";

/// Trailing marker of a right-aligned line.
pub const ALIGN_CLOSE_RIGHT: &str = " ->";

impl ConstructKind {
    /// The symmetric inline delimiter for this construct, if it is an
    /// inline one.
    pub fn inline_delimiter(self) -> Option<&'static str> {
        match self {
            ConstructKind::Bold => Some("**"),
            ConstructKind::Italic => Some("*"),
            ConstructKind::Strike => Some("~~"),
            ConstructKind::Superscript => Some("^"),
            ConstructKind::Subscript => Some("~"),
            ConstructKind::Keyboard => Some("||"),
            ConstructKind::CodeInline => Some("`"),
            ConstructKind::Math => Some("$$"),
            _ => None,
        }
    }

    /// Whether toggling this construct operates on whole lines.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            ConstructKind::Checklist | ConstructKind::Admonition(_)
        )
    }

    /// Whether this construct wraps a single line in alignment markers.
    pub fn is_align(self) -> bool {
        matches!(self, ConstructKind::AlignCenter | ConstructKind::AlignRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admonition_tokens_round_trip() {
        for kind in AdmonitionKind::ALL {
            assert_eq!(AdmonitionKind::from_token(kind.token()), Some(kind));
            assert!(kind.marker().starts_with("[["));
            assert!(kind.marker().ends_with("]]"));
        }
        assert_eq!(AdmonitionKind::from_token("warning"), None);
    }

    #[test]
    fn test_neutral_marker_carries_title() {
        assert_eq!(AdmonitionKind::Neutral.marker(), "[[neutre|Titre]]");
        assert_eq!(AdmonitionKind::Neutral.token(), "neutre");
    }

    #[test]
    fn test_construct_categories() {
        assert_eq!(ConstructKind::Keyboard.inline_delimiter(), Some("||"));
        assert_eq!(ConstructKind::Math.inline_delimiter(), Some("$$"));
        assert_eq!(ConstructKind::Checklist.inline_delimiter(), None);
        assert!(ConstructKind::Checklist.is_block());
        assert!(ConstructKind::Admonition(AdmonitionKind::Secret).is_block());
        assert!(ConstructKind::AlignCenter.is_align());
        assert!(!ConstructKind::Bold.is_block());
    }
}
