//! plume-markdown: rich-content tree to Markdown serialization.
//!
//! This crate provides:
//! - `RichNode` / `NodeKind` - the typed content tree handed over by the
//!   editing surface (the tree is already parsed; no HTML parsing here)
//! - An ordered rule table turning each node kind into Markdown text
//! - `to_markdown` - the bottom-up fold producing the final document,
//!   with abbreviation footnotes inlined at the end
//! - `rewrite_embed_url` - the pattern table for known video embeds

pub mod embed;
pub mod footnotes;
pub mod rules;
pub mod tree;
pub mod writer;

pub use embed::rewrite_embed_url;
pub use footnotes::FootnoteTable;
pub use smol_str::SmolStr;
pub use tree::{NodeKind, RichNode};
pub use writer::to_markdown;
