//! Engine error types.

use thiserror::Error;

/// Errors surfaced by the toggle engine.
///
/// The engine is total for well-formed input; the only hard failure is a
/// selection that does not fit the buffer it was paired with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("selection {start}..{end} out of bounds for buffer of {len} chars")]
    SelectionOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
}
