use tagpath_tag::{TagError, TagKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("no tag at '{path}'")]
    TagNotFound { path: String },
    #[error("expected {expected} at '{path}', found {found}")]
    KindMismatch {
        path: String,
        expected: TagKind,
        found: TagKind,
    },
    #[error("index {index} out of range at '{path}' (length {len})")]
    IndexOutOfRange {
        path: String,
        index: isize,
        len: usize,
    },
    #[error("invalid query at {position}: {message}")]
    Syntax { position: usize, message: String },
    #[error(transparent)]
    Tag(#[from] TagError),
}

impl QueryError {
    /// True when the addressed tag simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::TagNotFound { .. })
    }

    /// True for failures caused by the shape of the tree rather than by a
    /// missing tag or a malformed query.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            QueryError::KindMismatch { .. }
                | QueryError::IndexOutOfRange { .. }
                | QueryError::Tag(_)
        )
    }
}
