//! plume-editor-core: Pure Rust Markdown authoring logic without framework
//! dependencies.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `EditorRope` - ropey-backed implementation
//! - `active_construct` - classify which construct wraps a selection
//! - `toggle_construct` / `apply_toggle` - symmetric enable/disable of
//!   Markdown constructs, returning a replacement buffer and selection
//! - Re-exports of the tree-to-Markdown serializer from `plume-markdown`

pub mod actions;
pub mod classify;
pub mod construct;
pub mod error;
pub mod lines;
pub mod text;
pub mod text_helpers;
pub mod toggle;
pub mod types;

pub use actions::{apply_action, EditorAction};
pub use classify::active_construct;
pub use construct::{
    AdmonitionKind, ConstructKind, ALIGN_OPEN, BLOCK_PREFIX, CHECKLIST_PREFIX,
};
pub use error::EngineError;
pub use lines::LineShifter;
pub use plume_markdown::{
    rewrite_embed_url, to_markdown, FootnoteTable, NodeKind, RichNode,
};
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
pub use text_helpers::selected_lines;
pub use toggle::{apply_toggle, number_lines, toggle_construct, ToggleOutcome};
pub use types::{EditInfo, Selection};
