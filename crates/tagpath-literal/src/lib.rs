//! Literal text for tag trees.
//!
//! The grammar is the one produced by `Display` on
//! [`Tag`](tagpath_tag::Tag): `{key:value,...}` compounds, `[a,b]` lists,
//! `[1,2]b` / `[1,2]i` / `[1,2]l` arrays, and scalars carrying a kind suffix
//! (`1b 2s 3 4l 1.5f 2.5d`). Strings are double-quoted or bare.
//!
//! [`parse_as`] converts a single token when the kind is already known.

pub mod error;
pub mod escape;
pub mod parser;
mod scalar;
mod scan;
pub mod typed;

pub use error::ParseError;
pub use escape::unescape;
pub use parser::{parse, parse_with, ParseOptions};
pub use typed::parse_as;
