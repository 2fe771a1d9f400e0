use tagpath_literal::ParseError;
use tagpath_query::QueryError;
use tagpath_tag::TagError;
use thiserror::Error;

/// Errors raised by container reads, writes and erases.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContainerError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{0} is read-only")]
    ReadOnly(String),
    #[error("{0} is already in use")]
    Busy(String),
    #[error("i/o error on {path}: {message}")]
    Io { path: String, message: String },
    #[error("{0}")]
    Source(String),
}

impl ContainerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContainerError::Query(e) if e.is_not_found())
    }

    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        ContainerError::Query(QueryError::TagNotFound { path: path.into() })
    }
}

/// Errors raised while building or completing a [`Reference`](crate::Reference).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("undefined object: {0}")]
    UndefinedObject(String),
    #[error("no sibling container for 'self'")]
    UndefinedSelf,
    #[error("cannot infer a type for {0}")]
    UndefinedType(String),
    #[error("reference is not resolved yet")]
    NotPrepared,
    #[error("reference is not waiting for a selection")]
    NotAwaitingSelection,
    #[error("invalid json: {0}")]
    Json(String),
    #[error("file {0} is outside the allowed folder")]
    FileAccess(String),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Errors raised by edit actions and the session driving them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActionError {
    #[error("nothing at {0}")]
    NoValue(String),
    #[error("the root cannot be renamed")]
    RootRename,
    #[error("the new name is empty")]
    EmptyName,
    #[error("no action is waiting for a selection")]
    NothingAwaiting,
    #[error("cannot {action} {query}: {source}")]
    Failed {
        action: &'static str,
        query: String,
        source: ContainerError,
    },
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error(transparent)]
    Query(#[from] QueryError),
}
