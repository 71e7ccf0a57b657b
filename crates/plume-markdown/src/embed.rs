//! Embed URL rewriting for known video players.
//!
//! Player iframes carry provider-specific embed URLs; the serializer emits
//! the canonical watch URL instead. The table is ordered and the first
//! matching rule wins; an URL no rule matches is reported as `None` and the
//! caller drops the embed (a deliberate lossy fallback).

use std::sync::LazyLock;

use regex::Regex;

/// One rewrite rule: a pattern over the embed URL and a replacement
/// template (`$1` style capture references).
struct EmbedRule {
    pattern: Regex,
    template: &'static str,
}

static EMBED_RULES: LazyLock<Vec<EmbedRule>> = LazyLock::new(|| {
    vec![
        EmbedRule {
            pattern: Regex::new(r"(?:www\.)?youtube\.com/embed/([\w-]+)").unwrap(),
            template: "http://youtu.be/$1",
        },
        EmbedRule {
            pattern: Regex::new(r"player\.vimeo\.com/video/(\d+)").unwrap(),
            template: "http://vimeo.com/$1",
        },
        EmbedRule {
            pattern: Regex::new(r"(?:www\.)?dailymotion\.com/embed/video/(\w+)").unwrap(),
            template: "http://dailymotion.com/video/$1",
        },
    ]
});

/// Rewrite a known embed URL to its canonical watch URL.
///
/// Returns `None` when no rule matches.
pub fn rewrite_embed_url(url: &str) -> Option<String> {
    for rule in EMBED_RULES.iter() {
        if let Some(caps) = rule.pattern.captures(url) {
            let mut out = String::new();
            caps.expand(rule.template, &mut out);
            return Some(out);
        }
    }
    None
}
