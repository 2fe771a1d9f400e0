use thiserror::Error;

use crate::kind::TagKind;

/// Errors raised by direct edits of a tag tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("compound keys must not be empty")]
    EmptyKey,
    #[error("an absent value cannot be stored")]
    AbsentValue,
    #[error("expected a compound or list, got {0}")]
    NotStructured(TagKind),
    #[error("list holds {expected} elements, cannot add {found}")]
    ListKind { expected: TagKind, found: TagKind },
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}
