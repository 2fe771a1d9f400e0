use tagpath_tag::{TagError, TagKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unbalanced brackets at {position}: {text}")]
    Unbalanced { position: usize, text: String },
    #[error("unterminated string: {0}")]
    UnterminatedString(String),
    #[error("unable to locate name/value separator in: {0}")]
    MissingSeparator(String),
    #[error("empty name in: {0}")]
    EmptyName(String),
    #[error("unexpected token '{token}' at: {at}")]
    UnexpectedToken { token: char, at: String },
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("cannot parse '{text}' as {kind}")]
    NotParsable { text: String, kind: TagKind },
    #[error(transparent)]
    Tag(#[from] TagError),
}
