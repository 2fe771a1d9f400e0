//! Path queries over tag trees.
//!
//! A [`Query`] is an ordered list of [`Selector`]s. It reads, writes and
//! detaches nodes of a [`Tag`](tagpath_tag::Tag) tree, and has a compact
//! text form.
//!
//! # Example
//!
//! ```
//! use tagpath_query::{Query, QueryError};
//! use tagpath_tag::{Compound, Tag};
//!
//! let mut root = Tag::Compound(Compound::new());
//! let query: Query = "items[0].id".parse().unwrap();
//! query.set(&mut root, Tag::from("stone")).unwrap();
//! assert_eq!(root.to_string(), r#"{items:[{id:"stone"}]}"#);
//!
//! let missing = Query::parse("nope").unwrap();
//! assert!(matches!(missing.get(&root), Err(QueryError::TagNotFound { .. })));
//! ```

pub mod error;
pub mod query;
pub mod selector;
mod text;

pub use error::QueryError;
pub use query::Query;
pub use selector::Selector;
