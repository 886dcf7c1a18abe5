//! Contract violations surfaced to the calling widget layer.
//!
//! These are programmer errors: the rejected call leaves state untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("caret position {position} is outside 0..={len}")]
    CaretOutOfRange { position: usize, len: usize },

    #[error("selection {start}+{length} extends past text length {len}")]
    SelectionOutOfRange {
        start: usize,
        length: usize,
        len: usize,
    },

    #[error("item index {index} is outside a list of {count} items")]
    IndexOutOfRange { index: usize, count: usize },
}
